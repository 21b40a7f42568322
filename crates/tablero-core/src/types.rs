//! # Domain Types
//!
//! Core domain types for the Tablero dashboard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐              │
//! │  │   Client     │  │   Invoice    │  │   Product    │              │
//! │  │ ──────────── │  │ ──────────── │  │ ──────────── │              │
//! │  │ id, name     │  │ id           │  │ code         │              │
//! │  │ segments     │  │ client ref + │  │ cost/sale    │              │
//! │  │ spend/ticket │  │ name snapshot│  │ margin()     │              │
//! │  │ rating       │  │ total, PDV   │  │ stock by PDV │              │
//! │  └──────────────┘  └──────────────┘  └──────────────┘              │
//! │                                                                     │
//! │  ┌──────────────┐  ┌─────────────────────┐  ┌──────────────┐      │
//! │  │  Promotion   │  │ PromotionRedemption │  │ Notification │      │
//! │  │ ──────────── │  │ ─────────────────── │  │ ──────────── │      │
//! │  │ kind, window │  │ sent / redeemed     │  │ read flag    │      │
//! │  │ caps, scope  │  │ delivery channel    │  │ (COW lists)  │      │
//! │  └──────────────┘  └─────────────────────┘  └──────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Invoice.client_name` freezes the client name at issue time, so list
//! search and display never need a join back to the client collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Client Classification
// =============================================================================

/// Lifecycle category of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ClientType {
    /// Signed up recently, few orders yet.
    New,
    /// Orders with normal frequency.
    Regular,
    /// Long-standing, high-frequency client.
    Loyal,
    /// Orders rarely.
    Occasional,
}

impl ClientType {
    /// All categories, in dashboard display order.
    pub const ALL: [ClientType; 4] = [
        ClientType::New,
        ClientType::Regular,
        ClientType::Loyal,
        ClientType::Occasional,
    ];
}

/// Non-exclusive segment tag used for promotion targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Vip,
    AtRisk,
    HighFrequency,
    MultiStore,
}

/// Visual descriptor for a badge in the dashboard UI.
///
/// The frontend used to key these off raw strings with a fallback entry;
/// here the mapping is an exhaustive match so a new segment cannot ship
/// without a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct BadgeDescriptor {
    pub label: &'static str,
    pub color: &'static str,
}

impl Segment {
    /// Badge shown next to the client name in list views.
    pub const fn badge(&self) -> BadgeDescriptor {
        match self {
            Segment::Vip => BadgeDescriptor {
                label: "VIP",
                color: "gold",
            },
            Segment::AtRisk => BadgeDescriptor {
                label: "En riesgo",
                color: "red",
            },
            Segment::HighFrequency => BadgeDescriptor {
                label: "Alta frecuencia",
                color: "green",
            },
            Segment::MultiStore => BadgeDescriptor {
                label: "Multitienda",
                color: "blue",
            },
        }
    }
}

// =============================================================================
// Client
// =============================================================================

/// A client of the retail operation.
///
/// ## Invariant
/// `average_ticket` and `average_ticket_previous` are independent
/// snapshots maintained by an external system. They are never derived
/// from invoice history here; the statistics calculator only compares
/// them (growth/decline) and aggregates them.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Client {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Full display name.
    pub name: String,

    /// Contact email, if known.
    pub email: Option<String>,

    /// Contact phone, if known.
    pub phone: Option<String>,

    /// Street address, if known.
    pub address: Option<String>,

    /// Postal code (searchable in list views).
    pub postal_code: String,

    /// When the client signed up.
    #[ts(as = "String")]
    pub signup_date: DateTime<Utc>,

    /// Last order timestamp; `None` if the client never ordered.
    #[ts(as = "Option<String>")]
    pub last_order_date: Option<DateTime<Utc>>,

    /// Current average ticket snapshot (externally maintained).
    pub average_ticket: Money,

    /// Previous-period average ticket snapshot (externally maintained).
    pub average_ticket_previous: Money,

    /// Lifetime spend.
    pub total_spend: Money,

    /// Rating, 0.0 to 5.0 stars.
    pub rating: f64,

    /// Lifetime order count.
    pub order_count: i64,

    /// Whether a promotion is currently active for this client.
    pub has_active_promotion: bool,

    /// Lifecycle category.
    pub client_type: ClientType,

    /// Segment tags (non-exclusive).
    pub segments: Vec<Segment>,

    /// Preferred brand, if the client shows one.
    pub favorite_brand: Option<String>,

    /// Most ordered product, if any.
    pub favorite_product: Option<String>,

    /// Most visited point of sale, if any.
    pub favorite_point_of_sale: Option<String>,

    /// Free-form notes kept by managers.
    pub notes: Option<String>,
}

impl Client {
    /// Days elapsed since the last order, `None` if the client never ordered.
    pub fn days_since_last_order(&self, now: DateTime<Utc>) -> Option<i64> {
        self.last_order_date
            .map(|last| (now - last).num_days())
    }

    /// Whether the client counts as active: ordered within the threshold.
    /// A client with no orders is inactive by definition.
    pub fn is_active(&self, now: DateTime<Utc>, threshold_days: i64) -> bool {
        match self.days_since_last_order(now) {
            Some(days) => days <= threshold_days,
            None => false,
        }
    }

    /// Whether the client is in a given segment.
    pub fn has_segment(&self, segment: Segment) -> bool {
        self.segments.contains(&segment)
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// How an invoice was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Online,
    /// Split tender across methods.
    Mixed,
}

impl PaymentMethod {
    /// All methods, in dashboard display order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Online,
        PaymentMethod::Mixed,
    ];

    /// Label used for free-text matching and display.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "efectivo",
            PaymentMethod::Card => "tarjeta",
            PaymentMethod::Online => "online",
            PaymentMethod::Mixed => "mixto",
        }
    }
}

/// An issued invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Business identifier (e.g. "FAC-2025-0042").
    pub id: String,

    /// Client this invoice belongs to.
    pub client_id: String,

    /// Client name at issue time (frozen).
    pub client_name: String,

    /// When the invoice was issued.
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,

    /// Invoice total (never negative).
    pub total: Money,

    /// Product names on the invoice lines.
    pub line_items: Vec<String>,

    /// Verifactu verification status (opaque external flag).
    pub verified: bool,

    /// Payment method.
    pub payment_method: PaymentMethod,

    /// Point of sale that issued the invoice, if recorded.
    pub point_of_sale: Option<String>,

    /// Brand the invoice was issued under, if recorded.
    pub brand: Option<String>,
}

// =============================================================================
// Product
// =============================================================================

/// Stock held at one point of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLocation {
    pub point_of_sale: String,
    pub quantity: i64,
}

/// A product in the catalogue.
///
/// Cost price comes from an externally computed cost breakdown
/// (escandallo); cost ≤ sale is expected but not enforced.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Business code (e.g. "PAN-001").
    pub code: String,

    /// Display name.
    pub name: String,

    /// Category (e.g. "Panadería").
    pub category: String,

    /// Brand the product is sold under.
    pub brand: String,

    /// Cost price (externally computed).
    pub cost_price: Money,

    /// Sale price.
    pub sale_price: Money,

    /// Sales ranking position (1 = best seller).
    pub sales_rank: i64,

    /// Stock per point of sale.
    pub stock: Vec<StockLocation>,
}

impl Product {
    /// Margin fraction: `(sale - cost) / sale`, 0.0 when sale price is zero.
    pub fn margin(&self) -> f64 {
        (self.sale_price - self.cost_price).ratio_to(self.sale_price)
    }

    /// Total stock units across all points of sale.
    pub fn total_stock(&self) -> i64 {
        self.stock.iter().map(|s| s.quantity).sum()
    }
}

// =============================================================================
// Promotion
// =============================================================================

/// Mechanics of a promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    Percentage,
    Fixed,
    Pack,
    BuyXGetY,
    Welcome,
    Birthday,
    AtRisk,
    Vip,
}

impl PromotionKind {
    /// Badge shown on the promotion card.
    pub const fn badge(&self) -> BadgeDescriptor {
        match self {
            PromotionKind::Percentage => BadgeDescriptor {
                label: "% descuento",
                color: "purple",
            },
            PromotionKind::Fixed => BadgeDescriptor {
                label: "Importe fijo",
                color: "teal",
            },
            PromotionKind::Pack => BadgeDescriptor {
                label: "Pack",
                color: "orange",
            },
            PromotionKind::BuyXGetY => BadgeDescriptor {
                label: "NxM",
                color: "pink",
            },
            PromotionKind::Welcome => BadgeDescriptor {
                label: "Bienvenida",
                color: "green",
            },
            PromotionKind::Birthday => BadgeDescriptor {
                label: "Cumpleaños",
                color: "blue",
            },
            PromotionKind::AtRisk => BadgeDescriptor {
                label: "Recuperación",
                color: "red",
            },
            PromotionKind::Vip => BadgeDescriptor {
                label: "VIP",
                color: "gold",
            },
        }
    }
}

/// A promotion campaign.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Promotion {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Campaign name.
    pub name: String,

    /// Human-readable discount description (e.g. "2x1 en bollería").
    pub discount: String,

    /// Promotion mechanics.
    pub kind: PromotionKind,

    /// Validity window start.
    #[ts(as = "String")]
    pub valid_from: DateTime<Utc>,

    /// Validity window end.
    #[ts(as = "String")]
    pub valid_until: DateTime<Utc>,

    /// Maximum redemptions per client, if capped.
    pub per_client_cap: Option<u32>,

    /// Maximum total redemptions, if capped.
    pub total_cap: Option<u32>,

    /// Brands the promotion applies to; empty means all brands.
    pub brands: Vec<String>,

    /// Points of sale the promotion applies to; empty means all.
    pub points_of_sale: Vec<String>,

    /// Target audience category, if the campaign is targeted.
    pub audience: Option<ClientType>,
}

impl Promotion {
    /// Whether `now` falls inside the validity window (inclusive).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_from <= now && now <= self.valid_until
    }
}

// =============================================================================
// Promotion Redemption Log
// =============================================================================

/// Channel a promotion was delivered through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryChannel {
    Push,
    Sms,
    Email,
}

impl DeliveryChannel {
    /// All channels, in dashboard display order.
    pub const ALL: [DeliveryChannel; 3] = [
        DeliveryChannel::Push,
        DeliveryChannel::Sms,
        DeliveryChannel::Email,
    ];
}

/// One promotion sent to one client, and whether it was redeemed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PromotionRedemption {
    pub promotion_id: String,
    pub client_id: String,
    #[ts(as = "String")]
    pub sent_at: DateTime<Utc>,
    /// `None` until the client redeems.
    #[ts(as = "Option<String>")]
    pub redeemed_at: Option<DateTime<Utc>>,
    pub channel: DeliveryChannel,
}

impl PromotionRedemption {
    /// Whether the client redeemed this send.
    pub fn is_redeemed(&self) -> bool {
        self.redeemed_at.is_some()
    }
}

// =============================================================================
// Notification
// =============================================================================

/// A dashboard notification. Lives in copy-on-write lists in the store;
/// marking read or dismissing produces a new collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub body: String,
    pub read: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn client_with_last_order(days_ago: Option<i64>, now: DateTime<Utc>) -> Client {
        Client {
            id: "c-1".to_string(),
            name: "Ana García".to_string(),
            email: Some("ana@example.com".to_string()),
            phone: None,
            address: None,
            postal_code: "28001".to_string(),
            signup_date: now - Duration::days(400),
            last_order_date: days_ago.map(|d| now - Duration::days(d)),
            average_ticket: Money::from_cents(1500),
            average_ticket_previous: Money::from_cents(1400),
            total_spend: Money::from_cents(45000),
            rating: 4.5,
            order_count: 30,
            has_active_promotion: false,
            client_type: ClientType::Regular,
            segments: vec![Segment::HighFrequency],
            favorite_brand: None,
            favorite_product: None,
            favorite_point_of_sale: None,
            notes: None,
        }
    }

    #[test]
    fn test_client_activity_threshold() {
        let now = Utc::now();
        assert!(client_with_last_order(Some(10), now).is_active(now, 90));
        assert!(!client_with_last_order(Some(100), now).is_active(now, 90));
        // Never ordered = inactive
        assert!(!client_with_last_order(None, now).is_active(now, 90));
    }

    #[test]
    fn test_product_margin() {
        let product = Product {
            code: "PAN-001".to_string(),
            name: "Barra clásica".to_string(),
            category: "Panadería".to_string(),
            brand: "Horno Sol".to_string(),
            cost_price: Money::from_cents(85),
            sale_price: Money::from_cents(250),
            sales_rank: 1,
            stock: vec![
                StockLocation {
                    point_of_sale: "pdv-centro".to_string(),
                    quantity: 40,
                },
                StockLocation {
                    point_of_sale: "pdv-norte".to_string(),
                    quantity: 25,
                },
            ],
        };
        assert!((product.margin() - 0.66).abs() < 1e-9);
        assert_eq!(product.total_stock(), 65);
    }

    #[test]
    fn test_product_margin_zero_sale_price_guard() {
        let product = Product {
            code: "X".to_string(),
            name: "Muestra gratuita".to_string(),
            category: "Otros".to_string(),
            brand: "Horno Sol".to_string(),
            cost_price: Money::from_cents(50),
            sale_price: Money::zero(),
            sales_rank: 99,
            stock: vec![],
        };
        assert_eq!(product.margin(), 0.0);
    }

    #[test]
    fn test_promotion_window() {
        let now = Utc::now();
        let promo = Promotion {
            id: "p-1".to_string(),
            name: "Semana del pan".to_string(),
            discount: "10% en panadería".to_string(),
            kind: PromotionKind::Percentage,
            valid_from: now - Duration::days(2),
            valid_until: now + Duration::days(5),
            per_client_cap: Some(1),
            total_cap: None,
            brands: vec!["Horno Sol".to_string()],
            points_of_sale: vec![],
            audience: None,
        };
        assert!(promo.is_active_at(now));
        assert!(!promo.is_active_at(now + Duration::days(6)));
        assert!(!promo.is_active_at(now - Duration::days(3)));
    }

    #[test]
    fn test_segment_badges_are_exhaustive() {
        // Every segment must render a badge with a non-empty label
        for segment in [
            Segment::Vip,
            Segment::AtRisk,
            Segment::HighFrequency,
            Segment::MultiStore,
        ] {
            assert!(!segment.badge().label.is_empty());
        }
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.label(), "efectivo");
        assert_eq!(PaymentMethod::Online.label(), "online");
    }

    #[test]
    fn test_enums_serialize_snake_case() {
        // The frontend receives these as snake_case strings
        assert_eq!(
            serde_json::to_string(&ClientType::Occasional).unwrap(),
            "\"occasional\""
        );
        assert_eq!(serde_json::to_string(&Segment::AtRisk).unwrap(), "\"at_risk\"");
        assert_eq!(
            serde_json::to_string(&PromotionKind::BuyXGetY).unwrap(),
            "\"buy_x_get_y\""
        );

        let decoded: PaymentMethod = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(decoded, PaymentMethod::Mixed);
    }
}
