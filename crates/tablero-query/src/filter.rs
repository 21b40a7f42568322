//! # Filter Predicate Builder
//!
//! Translates a parameter set (brand, points of sale, time window, channel,
//! free-text search) into a composable predicate over domain records.
//!
//! ## Composition Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Predicate Composition                           │
//! │                                                                     │
//! │  matches = brand_ok AND pos_ok AND period_ok AND channel_ok         │
//! │            AND text_ok                                              │
//! │                                                                     │
//! │  Absence/default of any dimension = "no constraint":                │
//! │    brand: None            → every record passes                     │
//! │    points_of_sale: []     → every record passes                     │
//! │    period: None           → every record passes                     │
//! │    channel: All           → every record passes                     │
//! │    free_text: ""          → every record passes                     │
//! │                                                                     │
//! │  Unknown option values parse to the no-op, NEVER to an error.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Predicates are pure and total: no side effects, defined for every
//! record of the target entity type. The reference instant (`now`) is a
//! parameter, never read from a clock, so recomputation is deterministic.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use tablero_core::{Client, Invoice, PaymentMethod, Product, Promotion};

// =============================================================================
// Period
// =============================================================================

/// Time window a record's relevant date must fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Days7,
    Days30,
    Days90,
    CurrentMonth,
    CurrentYear,
}

impl Period {
    /// Parses the wire values `"7" | "30" | "90" | "month" | "year"`.
    /// Unknown values yield `None`, which the filter treats as no-op.
    pub fn parse(value: &str) -> Option<Period> {
        match value.trim() {
            "7" => Some(Period::Days7),
            "30" => Some(Period::Days30),
            "90" => Some(Period::Days90),
            "month" => Some(Period::CurrentMonth),
            "year" => Some(Period::CurrentYear),
            _ => None,
        }
    }

    /// Resolves the cutoff instant: records dated at or after the cutoff
    /// pass the period filter.
    pub fn cutoff(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Period::Days7 => now - chrono::Duration::days(7),
            Period::Days30 => now - chrono::Duration::days(30),
            Period::Days90 => now - chrono::Duration::days(90),
            Period::CurrentMonth => start_of_day(now.with_day(1).unwrap_or(now)),
            Period::CurrentYear => {
                let jan_first = now
                    .with_month(1)
                    .and_then(|d| d.with_day(1))
                    .unwrap_or(now);
                start_of_day(jan_first)
            }
        }
    }
}

/// Truncates an instant to midnight UTC of the same day.
fn start_of_day(instant: DateTime<Utc>) -> DateTime<Utc> {
    let date = instant.date_naive();
    match date.and_hms_opt(0, 0, 0) {
        Some(naive) => Utc.from_utc_datetime(&naive),
        None => instant,
    }
}

// =============================================================================
// Channel
// =============================================================================

/// Sales channel filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// No channel restriction.
    #[default]
    All,
    InStore,
    Online,
}

impl Channel {
    /// Parses `"all" | "in-store" | "online"`; unknown values degrade to
    /// `All` (the no-op) rather than erroring.
    pub fn parse(value: &str) -> Channel {
        match value.trim() {
            "in-store" => Channel::InStore,
            "online" => Channel::Online,
            _ => Channel::All,
        }
    }

    /// Whether an invoice paid with `method` belongs to this channel.
    /// `Mixed` tenders include an in-store leg and an online leg, so they
    /// match either restriction.
    pub fn matches_payment(&self, method: PaymentMethod) -> bool {
        match self {
            Channel::All => true,
            Channel::InStore => !matches!(method, PaymentMethod::Online),
            Channel::Online => matches!(method, PaymentMethod::Online | PaymentMethod::Mixed),
        }
    }
}

// =============================================================================
// Filter Parameters
// =============================================================================

/// The full parameter set for one list view recomputation.
///
/// The UI layer owns this state and passes it in on every change; the
/// engine never retains it between calls.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FilterParams {
    /// Brand restriction; `None` means all brands.
    pub brand: Option<String>,
    /// Allowed points of sale; empty means unrestricted.
    pub points_of_sale: Vec<String>,
    /// Time window; `None` means unrestricted.
    pub period: Option<Period>,
    /// Sales channel; `All` means unrestricted.
    pub channel: Channel,
    /// Case-insensitive substring search; empty means unrestricted.
    pub free_text: String,
}

impl FilterParams {
    /// Builds params from raw option strings as the dashboard sends them.
    /// `brand = "all"` and unknown period/channel values become no-ops.
    pub fn from_options(
        brand: &str,
        points_of_sale: &[String],
        period: &str,
        channel: &str,
        free_text: &str,
    ) -> FilterParams {
        let brand = brand.trim();
        FilterParams {
            brand: if brand.is_empty() || brand == "all" {
                None
            } else {
                Some(brand.to_string())
            },
            points_of_sale: points_of_sale.to_vec(),
            period: Period::parse(period),
            channel: Channel::parse(channel),
            free_text: free_text.trim().to_string(),
        }
    }

    /// True when no dimension constrains anything.
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.points_of_sale.is_empty()
            && self.period.is_none()
            && self.channel == Channel::All
            && self.free_text.is_empty()
    }

    /// Human-readable list of active filter dimensions, used by the
    /// "clear filters" affordance and the export payload.
    pub fn summary(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if let Some(brand) = &self.brand {
            parts.push(format!("brand: {brand}"));
        }
        if !self.points_of_sale.is_empty() {
            parts.push(format!("points of sale: {}", self.points_of_sale.join(", ")));
        }
        if let Some(period) = self.period {
            let label = match period {
                Period::Days7 => "last 7 days",
                Period::Days30 => "last 30 days",
                Period::Days90 => "last 90 days",
                Period::CurrentMonth => "current month",
                Period::CurrentYear => "current year",
            };
            parts.push(format!("period: {label}"));
        }
        match self.channel {
            Channel::All => {}
            Channel::InStore => parts.push("channel: in-store".to_string()),
            Channel::Online => parts.push("channel: online".to_string()),
        }
        if !self.free_text.is_empty() {
            parts.push(format!("search: \"{}\"", self.free_text));
        }
        parts
    }

    // -------------------------------------------------------------------------
    // Per-dimension checks shared by the entity predicates
    // -------------------------------------------------------------------------

    fn brand_allows(&self, record_brand: Option<&str>) -> bool {
        match &self.brand {
            None => true,
            Some(wanted) => record_brand.is_some_and(|b| b.eq_ignore_ascii_case(wanted)),
        }
    }

    /// Brand check for records carrying a brand *list* (promotions).
    /// An empty list on the record means "applies to all brands".
    fn brand_allows_any(&self, record_brands: &[String]) -> bool {
        match &self.brand {
            None => true,
            Some(wanted) => {
                record_brands.is_empty()
                    || record_brands.iter().any(|b| b.eq_ignore_ascii_case(wanted))
            }
        }
    }

    fn pos_allows(&self, record_pos: Option<&str>) -> bool {
        if self.points_of_sale.is_empty() {
            return true;
        }
        record_pos.is_some_and(|pos| self.points_of_sale.iter().any(|p| p == pos))
    }

    fn pos_allows_any<'a, I: IntoIterator<Item = &'a str>>(&self, record_pos: I) -> bool {
        if self.points_of_sale.is_empty() {
            return true;
        }
        record_pos
            .into_iter()
            .any(|pos| self.points_of_sale.iter().any(|p| p == pos))
    }

    fn period_allows(&self, date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        match self.period {
            None => true,
            Some(period) => date.is_some_and(|d| d >= period.cutoff(now)),
        }
    }

    /// Case-insensitive substring match against any of the given fields.
    fn text_matches(&self, fields: &[&str]) -> bool {
        if self.free_text.is_empty() {
            return true;
        }
        let needle = self.free_text.to_lowercase();
        fields
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

// =============================================================================
// Filterable Trait
// =============================================================================

/// Per-entity filter predicate. Pure and total: never errors, never
/// mutates, defined for every record.
pub trait Filterable {
    fn matches(&self, params: &FilterParams, now: DateTime<Utc>) -> bool;
}

impl Filterable for Client {
    fn matches(&self, params: &FilterParams, now: DateTime<Utc>) -> bool {
        // Clients carry no order channel, so the channel dimension is a
        // documented no-op here (absence of a constraint).
        params.brand_allows(self.favorite_brand.as_deref())
            && params.pos_allows(self.favorite_point_of_sale.as_deref())
            && params.period_allows(self.last_order_date, now)
            && params.text_matches(&[&self.name, &self.id, &self.postal_code])
    }
}

impl Filterable for Invoice {
    fn matches(&self, params: &FilterParams, now: DateTime<Utc>) -> bool {
        params.brand_allows(self.brand.as_deref())
            && params.pos_allows(self.point_of_sale.as_deref())
            && params.period_allows(Some(self.issued_at), now)
            && params.channel.matches_payment(self.payment_method)
            && params.text_matches(&[
                &self.id,
                &self.client_name,
                self.point_of_sale.as_deref().unwrap_or(""),
                self.payment_method.label(),
            ])
    }
}

impl Filterable for Product {
    fn matches(&self, params: &FilterParams, _now: DateTime<Utc>) -> bool {
        // Products carry no date or channel; those dimensions pass.
        params.brand_allows(Some(&self.brand))
            && params.pos_allows_any(self.stock.iter().map(|s| s.point_of_sale.as_str()))
            && params.text_matches(&[&self.code, &self.name, &self.category])
    }
}

impl Filterable for Promotion {
    fn matches(&self, params: &FilterParams, now: DateTime<Utc>) -> bool {
        // Period keeps promotions whose window is still open at the cutoff:
        // a campaign that ended before the window started is filtered out.
        params.brand_allows_any(&self.brands)
            && params.pos_allows_any(self.points_of_sale.iter().map(String::as_str))
            && params.period_allows(Some(self.valid_until), now)
            && params.text_matches(&[&self.id, &self.name, &self.discount])
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Filters a collection down to the records matching `params`.
///
/// Idempotent: filtering an already-filtered result with the same params
/// returns an equal collection. Adding a dimension can only narrow the
/// subset (AND composition).
pub fn filter_records<T: Filterable + Clone>(
    records: &[T],
    params: &FilterParams,
    now: DateTime<Utc>,
) -> Vec<T> {
    let subset: Vec<T> = records
        .iter()
        .filter(|r| r.matches(params, now))
        .cloned()
        .collect();

    tracing::debug!(
        input = records.len(),
        output = subset.len(),
        empty_params = params.is_empty(),
        "filtered records"
    );

    subset
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{client, invoice, product, promotion};
    use chrono::Duration;

    #[test]
    fn test_empty_params_keep_everything() {
        let now = Utc::now();
        let clients = vec![
            client("c-1", "Ana García", Some(5), now),
            client("c-2", "Luis Pérez", None, now),
        ];
        let subset = filter_records(&clients, &FilterParams::default(), now);
        assert_eq!(subset.len(), 2);
    }

    #[test]
    fn test_period_parse_unknown_is_noop() {
        assert_eq!(Period::parse("7"), Some(Period::Days7));
        assert_eq!(Period::parse("month"), Some(Period::CurrentMonth));
        assert_eq!(Period::parse("banana"), None);
        assert_eq!(Period::parse(""), None);

        // Unknown period string in from_options must not exclude records
        let now = Utc::now();
        let clients = vec![client("c-1", "Ana García", Some(400), now)];
        let params = FilterParams::from_options("all", &[], "banana", "all", "");
        assert_eq!(filter_records(&clients, &params, now).len(), 1);
    }

    #[test]
    fn test_channel_parse_unknown_is_noop() {
        assert_eq!(Channel::parse("online"), Channel::Online);
        assert_eq!(Channel::parse("in-store"), Channel::InStore);
        assert_eq!(Channel::parse("carrier-pigeon"), Channel::All);
    }

    #[test]
    fn test_brand_all_is_noop() {
        let params = FilterParams::from_options("all", &[], "", "all", "");
        assert!(params.brand.is_none());
        assert!(params.is_empty());
    }

    #[test]
    fn test_period_filter_on_clients() {
        let now = Utc::now();
        let clients = vec![
            client("c-1", "Ana García", Some(5), now),
            client("c-2", "Luis Pérez", Some(200), now),
            client("c-3", "Marta Ruiz", None, now),
        ];
        let params = FilterParams {
            period: Some(Period::Days30),
            ..Default::default()
        };
        let subset = filter_records(&clients, &params, now);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].id, "c-1");
    }

    #[test]
    fn test_free_text_is_case_insensitive() {
        let now = Utc::now();
        let clients = vec![
            client("c-1", "Ana García", Some(5), now),
            client("c-2", "Luis Pérez", Some(5), now),
        ];
        let params = FilterParams {
            free_text: "GARCÍA".to_lowercase(),
            ..Default::default()
        };
        let subset = filter_records(&clients, &params, now);
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].name, "Ana García");

        // Postal code is searchable too
        let params = FilterParams {
            free_text: "28001".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_records(&clients, &params, now).len(), 2);
    }

    #[test]
    fn test_filter_idempotence() {
        let now = Utc::now();
        let clients = vec![
            client("c-1", "Ana García", Some(5), now),
            client("c-2", "Luis Pérez", Some(200), now),
            client("c-3", "Marta Ruiz", Some(10), now),
        ];
        let params = FilterParams {
            period: Some(Period::Days30),
            free_text: "a".to_string(),
            ..Default::default()
        };
        let once = filter_records(&clients, &params, now);
        let twice = filter_records(&once, &params, now);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.id, b.id);
        }
    }

    #[test]
    fn test_monotonic_narrowing() {
        let now = Utc::now();
        let clients = vec![
            client("c-1", "Ana García", Some(5), now),
            client("c-2", "Luis Pérez", Some(10), now),
            client("c-3", "Marta Ruiz", Some(200), now),
        ];
        let period_only = FilterParams {
            period: Some(Period::Days30),
            ..Default::default()
        };
        let period_and_text = FilterParams {
            period: Some(Period::Days30),
            free_text: "ana".to_string(),
            ..Default::default()
        };
        let wide = filter_records(&clients, &period_only, now);
        let narrow = filter_records(&clients, &period_and_text, now);

        // Adding a dimension can only narrow; narrow ⊆ wide
        assert!(narrow.len() <= wide.len());
        for c in &narrow {
            assert!(wide.iter().any(|w| w.id == c.id));
        }
    }

    #[test]
    fn test_invoice_channel_mapping() {
        let now = Utc::now();
        let invoices = vec![
            invoice("FAC-001", "Ana García", 4590, PaymentMethod::Cash, now),
            invoice("FAC-002", "Luis Pérez", 2850, PaymentMethod::Online, now),
            invoice("FAC-003", "Marta Ruiz", 3860, PaymentMethod::Mixed, now),
        ];
        let online = FilterParams {
            channel: Channel::Online,
            ..Default::default()
        };
        let subset = filter_records(&invoices, &online, now);
        // Online + Mixed match the online channel
        assert_eq!(subset.len(), 2);

        let in_store = FilterParams {
            channel: Channel::InStore,
            ..Default::default()
        };
        let subset = filter_records(&invoices, &in_store, now);
        // Cash + Mixed match in-store
        assert_eq!(subset.len(), 2);
    }

    #[test]
    fn test_invoice_free_text_over_client_and_payment() {
        let now = Utc::now();
        let invoices = vec![
            invoice("FAC-001", "Ana García", 4590, PaymentMethod::Cash, now),
            invoice("FAC-002", "Luis Pérez", 2850, PaymentMethod::Card, now),
        ];
        let by_client = FilterParams {
            free_text: "pérez".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_records(&invoices, &by_client, now).len(), 1);

        let by_payment = FilterParams {
            free_text: "efectivo".to_string(),
            ..Default::default()
        };
        assert_eq!(filter_records(&invoices, &by_payment, now).len(), 1);
    }

    #[test]
    fn test_product_pos_filter_matches_stock_locations() {
        let now = Utc::now();
        let products = vec![
            product("PAN-001", "Barra clásica", 85, 250),
            product("BOL-001", "Croissant", 60, 180),
        ];
        // testutil stocks every product at pdv-centro only
        let params = FilterParams {
            points_of_sale: vec!["pdv-centro".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_records(&products, &params, now).len(), 2);

        let params = FilterParams {
            points_of_sale: vec!["pdv-sur".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_records(&products, &params, now).len(), 0);
    }

    #[test]
    fn test_promotion_brand_empty_list_means_all() {
        let now = Utc::now();
        let mut open = promotion("p-1", "Semana del pan", now);
        open.brands.clear();
        let scoped = promotion("p-2", "Solo Horno Sol", now);

        let params = FilterParams {
            brand: Some("Horno Sol".to_string()),
            ..Default::default()
        };
        // Both pass: p-1 applies to all brands, p-2 is scoped to the brand
        assert_eq!(filter_records(&[open, scoped], &params, now).len(), 2);

        let params = FilterParams {
            brand: Some("Otra Marca".to_string()),
            ..Default::default()
        };
        let promos = vec![promotion("p-3", "Scoped", now)];
        assert_eq!(filter_records(&promos, &params, now).len(), 0);
    }

    #[test]
    fn test_filter_params_wire_format() {
        // The dashboard sends params as JSON with snake_case enum values
        let json = r#"{
            "brand": "Horno Sol",
            "points_of_sale": ["pdv-centro"],
            "period": "days30",
            "channel": "in_store",
            "free_text": "ana"
        }"#;
        let params: FilterParams = serde_json::from_str(json).expect("valid wire params");
        assert_eq!(params.brand.as_deref(), Some("Horno Sol"));
        assert_eq!(params.period, Some(Period::Days30));
        assert_eq!(params.channel, Channel::InStore);

        // Round trip preserves the params exactly
        let encoded = serde_json::to_string(&params).expect("serializable");
        let decoded: FilterParams = serde_json::from_str(&encoded).expect("round trip");
        assert_eq!(decoded.free_text, params.free_text);
        assert_eq!(decoded.period, params.period);
    }

    #[test]
    fn test_period_cutoff_month_and_year() {
        let now = Utc
            .with_ymd_and_hms(2025, 6, 15, 12, 30, 0)
            .single()
            .expect("valid test date");

        let month_cutoff = Period::CurrentMonth.cutoff(now);
        assert_eq!(month_cutoff, Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap());

        let year_cutoff = Period::CurrentYear.cutoff(now);
        assert_eq!(year_cutoff, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());

        let week_cutoff = Period::Days7.cutoff(now);
        assert_eq!(week_cutoff, now - Duration::days(7));
    }
}
