//! # View Projection
//!
//! Combines the sorted, filtered collection with the metadata the
//! presentation/export collaborators need: total count after filtering,
//! an applied-filter summary for the "clear filters" affordance, and a
//! shallow projection of each record into the requested field groups.
//!
//! No business logic lives here beyond assembly: actual XLSX/CSV/PDF
//! encoding is delegated to an external exporter that receives the
//! assembled payload.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use tablero_core::{Client, Invoice, Product};

use crate::filter::FilterParams;

// =============================================================================
// Export Format
// =============================================================================

/// Target file format. Carried as metadata only; this core never encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    #[default]
    Csv,
    Pdf,
}

impl ExportFormat {
    /// Parses `"xlsx" | "csv" | "pdf"`; unknown values yield `None`.
    pub fn parse(value: &str) -> Option<ExportFormat> {
        match value.trim() {
            "xlsx" => Some(ExportFormat::Xlsx),
            "csv" => Some(ExportFormat::Csv),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

// =============================================================================
// Field Selection
// =============================================================================

/// Which field groups the caller wants in the export. Only groups set to
/// `true` contribute columns; the default selects nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldSelection {
    pub basic_info: bool,
    pub contact_info: bool,
    pub address: bool,
    pub statistics: bool,
    pub order_history: bool,
    pub promotions: bool,
    pub ratings: bool,
    pub notes: bool,
    pub preferences: bool,
    pub segmentation: bool,
}

impl FieldSelection {
    /// Every group enabled.
    pub fn all() -> FieldSelection {
        FieldSelection {
            basic_info: true,
            contact_info: true,
            address: true,
            statistics: true,
            order_history: true,
            promotions: true,
            ratings: true,
            notes: true,
            preferences: true,
            segmentation: true,
        }
    }
}

// =============================================================================
// Export Payload
// =============================================================================

/// What the external exporter receives: headers, stringified rows and the
/// list-view metadata.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ExportPayload {
    pub format: ExportFormat,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Record count after filtering (not after pagination).
    pub total_count: usize,
    /// Human-readable active filter dimensions.
    pub applied_filters: Vec<String>,
}

// =============================================================================
// Exportable Trait
// =============================================================================

/// Per-entity shallow projection into the selected field groups.
///
/// `columns` and `row` must agree on length and order for any selection;
/// [`project_for_export`] relies on that.
pub trait Exportable {
    fn export_columns(selection: &FieldSelection) -> Vec<String>;
    fn export_row(&self, selection: &FieldSelection) -> Vec<String>;
}

impl Exportable for Client {
    fn export_columns(selection: &FieldSelection) -> Vec<String> {
        let mut columns = Vec::new();
        if selection.basic_info {
            columns.extend(["id", "name", "type", "signup_date"].map(String::from));
        }
        if selection.contact_info {
            columns.extend(["email", "phone"].map(String::from));
        }
        if selection.address {
            columns.extend(["address", "postal_code"].map(String::from));
        }
        if selection.statistics {
            columns.extend(
                ["total_spend", "average_ticket", "average_ticket_previous"].map(String::from),
            );
        }
        if selection.order_history {
            columns.extend(["order_count", "last_order_date"].map(String::from));
        }
        if selection.promotions {
            columns.push("has_active_promotion".to_string());
        }
        if selection.ratings {
            columns.push("rating".to_string());
        }
        if selection.notes {
            columns.push("notes".to_string());
        }
        if selection.preferences {
            columns.extend(
                ["favorite_brand", "favorite_product", "favorite_point_of_sale"]
                    .map(String::from),
            );
        }
        if selection.segmentation {
            columns.push("segments".to_string());
        }
        columns
    }

    fn export_row(&self, selection: &FieldSelection) -> Vec<String> {
        let mut row = Vec::new();
        if selection.basic_info {
            row.push(self.id.clone());
            row.push(self.name.clone());
            row.push(format!("{:?}", self.client_type));
            row.push(self.signup_date.to_rfc3339());
        }
        if selection.contact_info {
            row.push(self.email.clone().unwrap_or_default());
            row.push(self.phone.clone().unwrap_or_default());
        }
        if selection.address {
            row.push(self.address.clone().unwrap_or_default());
            row.push(self.postal_code.clone());
        }
        if selection.statistics {
            row.push(self.total_spend.to_string());
            row.push(self.average_ticket.to_string());
            row.push(self.average_ticket_previous.to_string());
        }
        if selection.order_history {
            row.push(self.order_count.to_string());
            row.push(
                self.last_order_date
                    .map(|d| d.to_rfc3339())
                    .unwrap_or_default(),
            );
        }
        if selection.promotions {
            row.push(self.has_active_promotion.to_string());
        }
        if selection.ratings {
            row.push(format!("{:.1}", self.rating));
        }
        if selection.notes {
            row.push(self.notes.clone().unwrap_or_default());
        }
        if selection.preferences {
            row.push(self.favorite_brand.clone().unwrap_or_default());
            row.push(self.favorite_product.clone().unwrap_or_default());
            row.push(self.favorite_point_of_sale.clone().unwrap_or_default());
        }
        if selection.segmentation {
            let tags: Vec<&str> = self.segments.iter().map(|s| s.badge().label).collect();
            row.push(tags.join("|"));
        }
        row
    }
}

impl Exportable for Invoice {
    fn export_columns(selection: &FieldSelection) -> Vec<String> {
        let mut columns = Vec::new();
        if selection.basic_info {
            columns.extend(["id", "client", "date", "point_of_sale", "brand"].map(String::from));
        }
        if selection.statistics {
            columns.extend(["total", "payment_method", "verified"].map(String::from));
        }
        if selection.order_history {
            columns.push("line_items".to_string());
        }
        columns
    }

    fn export_row(&self, selection: &FieldSelection) -> Vec<String> {
        let mut row = Vec::new();
        if selection.basic_info {
            row.push(self.id.clone());
            row.push(self.client_name.clone());
            row.push(self.issued_at.to_rfc3339());
            row.push(self.point_of_sale.clone().unwrap_or_default());
            row.push(self.brand.clone().unwrap_or_default());
        }
        if selection.statistics {
            row.push(self.total.to_string());
            row.push(self.payment_method.label().to_string());
            row.push(self.verified.to_string());
        }
        if selection.order_history {
            row.push(self.line_items.join("|"));
        }
        row
    }
}

impl Exportable for Product {
    fn export_columns(selection: &FieldSelection) -> Vec<String> {
        let mut columns = Vec::new();
        if selection.basic_info {
            columns.extend(["code", "name", "category", "brand"].map(String::from));
        }
        if selection.statistics {
            columns.extend(["cost_price", "sale_price", "margin", "sales_rank"].map(String::from));
        }
        if selection.order_history {
            columns.push("total_stock".to_string());
        }
        columns
    }

    fn export_row(&self, selection: &FieldSelection) -> Vec<String> {
        let mut row = Vec::new();
        if selection.basic_info {
            row.push(self.code.clone());
            row.push(self.name.clone());
            row.push(self.category.clone());
            row.push(self.brand.clone());
        }
        if selection.statistics {
            row.push(self.cost_price.to_string());
            row.push(self.sale_price.to_string());
            row.push(format!("{:.2}", self.margin()));
            row.push(self.sales_rank.to_string());
        }
        if selection.order_history {
            row.push(self.total_stock().to_string());
        }
        row
    }
}

// =============================================================================
// Projection
// =============================================================================

/// Assembles the export payload for an ordered, filtered collection.
///
/// `params` is only used for the applied-filter summary; filtering has
/// already happened upstream.
pub fn project_for_export<T: Exportable>(
    records: &[T],
    selection: &FieldSelection,
    format: ExportFormat,
    params: &FilterParams,
) -> ExportPayload {
    let payload = ExportPayload {
        format,
        columns: T::export_columns(selection),
        rows: records.iter().map(|r| r.export_row(selection)).collect(),
        total_count: records.len(),
        applied_filters: params.summary(),
    };

    tracing::debug!(
        rows = payload.rows.len(),
        columns = payload.columns.len(),
        ?format,
        "assembled export payload"
    );
    payload
}

// =============================================================================
// Unit Tests
// =============================================================================
