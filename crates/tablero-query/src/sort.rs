//! # Sort Comparator Builder
//!
//! Translates a `(column, direction)` pair into a comparator per entity
//! type.
//!
//! ## Rules
//! - String columns compare case-insensitively (lower-cased comparison)
//! - Numeric columns compare by value, dates by timestamp
//! - Unknown column names yield a neutral comparator (`Ordering::Equal`
//!   for all pairs) rather than an error
//! - Sorting is STABLE: equal keys keep their relative order, which keeps
//!   pagination reproducible across recomputations
//!
//! The column-toggle contract (same column twice flips direction, a new
//! column resets to ascending) lives in [`toggle_sort`] as a pure state
//! transition; the engine itself holds no sort state.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use tablero_core::{Client, Invoice, Product, Promotion};

// =============================================================================
// Direction & State
// =============================================================================

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub const fn toggled(&self) -> SortDirection {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The sort state a list view holds between user clicks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: &str) -> SortState {
        SortState {
            column: column.to_string(),
            direction: SortDirection::Asc,
        }
    }
}

/// Pure state transition for a column-header click: selecting the current
/// column toggles direction, selecting a new column resets to ascending.
pub fn toggle_sort(current: &SortState, column: &str) -> SortState {
    if current.column == column {
        SortState {
            column: current.column.clone(),
            direction: current.direction.toggled(),
        }
    } else {
        SortState::new(column)
    }
}

// =============================================================================
// Comparison Helpers
// =============================================================================

fn cmp_str(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn cmp_opt_str(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_str(a, b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Missing dates sort first ascending (a client who never ordered appears
/// before the oldest order date).
fn cmp_opt_date(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// NaN-tolerant float comparison; incomparable pairs are treated as equal
/// so the comparator stays total.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// =============================================================================
// Sortable Trait
// =============================================================================

/// Per-entity column comparator. Unknown columns compare `Equal`, which
/// combined with a stable sort is a no-op.
pub trait Sortable {
    fn compare_by(&self, other: &Self, column: &str) -> Ordering;
}

impl Sortable for Client {
    fn compare_by(&self, other: &Self, column: &str) -> Ordering {
        match column {
            "name" => cmp_str(&self.name, &other.name),
            "id" => cmp_str(&self.id, &other.id),
            "postal_code" => cmp_str(&self.postal_code, &other.postal_code),
            "signup_date" => self.signup_date.cmp(&other.signup_date),
            "last_order" => cmp_opt_date(self.last_order_date, other.last_order_date),
            "average_ticket" => self.average_ticket.cmp(&other.average_ticket),
            "total_spend" => self.total_spend.cmp(&other.total_spend),
            "orders" => self.order_count.cmp(&other.order_count),
            "rating" => cmp_f64(self.rating, other.rating),
            _ => Ordering::Equal,
        }
    }
}

impl Sortable for Invoice {
    fn compare_by(&self, other: &Self, column: &str) -> Ordering {
        match column {
            "id" => cmp_str(&self.id, &other.id),
            "client" => cmp_str(&self.client_name, &other.client_name),
            "date" => self.issued_at.cmp(&other.issued_at),
            "point_of_sale" => {
                cmp_opt_str(self.point_of_sale.as_deref(), other.point_of_sale.as_deref())
            }
            "total" => self.total.cmp(&other.total),
            "payment_method" => cmp_str(self.payment_method.label(), other.payment_method.label()),
            _ => Ordering::Equal,
        }
    }
}

impl Sortable for Product {
    fn compare_by(&self, other: &Self, column: &str) -> Ordering {
        match column {
            "code" => cmp_str(&self.code, &other.code),
            "name" => cmp_str(&self.name, &other.name),
            "category" => cmp_str(&self.category, &other.category),
            "cost" => self.cost_price.cmp(&other.cost_price),
            "price" => self.sale_price.cmp(&other.sale_price),
            "margin" => cmp_f64(self.margin(), other.margin()),
            "rank" => self.sales_rank.cmp(&other.sales_rank),
            _ => Ordering::Equal,
        }
    }
}

impl Sortable for Promotion {
    fn compare_by(&self, other: &Self, column: &str) -> Ordering {
        match column {
            "id" => cmp_str(&self.id, &other.id),
            "name" => cmp_str(&self.name, &other.name),
            "kind" => format!("{:?}", self.kind).cmp(&format!("{:?}", other.kind)),
            "start" => self.valid_from.cmp(&other.valid_from),
            "end" => self.valid_until.cmp(&other.valid_until),
            _ => Ordering::Equal,
        }
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Returns the records ordered by `column`/`direction`.
///
/// Uses Rust's stable `sort_by`, so equal keys (including every pair under
/// an unknown column) preserve their input order.
pub fn sort_records<T: Sortable + Clone>(
    records: &[T],
    column: &str,
    direction: SortDirection,
) -> Vec<T> {
    let mut ordered = records.to_vec();
    ordered.sort_by(|a, b| {
        let cmp = a.compare_by(b, column);
        match direction {
            SortDirection::Asc => cmp,
            SortDirection::Desc => cmp.reverse(),
        }
    });

    tracing::debug!(count = ordered.len(), column, ?direction, "sorted records");
    ordered
}

// =============================================================================
// Unit Tests
// =============================================================================
