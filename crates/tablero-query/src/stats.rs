//! # Aggregate Statistics Calculator
//!
//! Computes the named metric sets shown on the dashboard header cards,
//! one pure function per entity type. Each metric is independently
//! defined; there is no shared mutable state between them.
//!
//! ## Zero-Denominator Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Every ratio / average / percentage guards the empty case:          │
//! │                                                                     │
//! │    computeStatistics([])  →  all counts 0, all sums 0.00 €,        │
//! │                              all averages 0, all percentages 0      │
//! │                                                                     │
//! │  Never NaN, never a division error, never a panic.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Weighted vs Simple Average
//! `global_average_ticket` divides total spend by total ORDERS (weighted
//! by order count); `average_ticket_per_client` divides by CLIENT count.
//! These are different numbers and the dashboard shows both.

use serde::Serialize;
use ts_rs::TS;

use chrono::{DateTime, Utc};
use tablero_core::{
    Client, ClientType, DeliveryChannel, Invoice, Money, PaymentMethod, Product, Promotion,
    PromotionRedemption, Segment, DEFAULT_ACTIVE_THRESHOLD_DAYS, DEFAULT_SATISFACTION_MIN_RATING,
};

// =============================================================================
// Configuration
// =============================================================================

/// Business thresholds for the statistics calculator.
///
/// These used to be hardcoded in the views; they are configuration here so
/// a tenant can tune what "active" and "satisfied" mean.
#[derive(Debug, Clone, Copy, Serialize, TS)]
#[ts(export)]
pub struct StatsConfig {
    /// A client is active if it ordered within this many days.
    pub active_threshold_days: i64,
    /// A client is satisfied if its rating is at least this.
    pub satisfaction_min_rating: f64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            active_threshold_days: DEFAULT_ACTIVE_THRESHOLD_DAYS,
            satisfaction_min_rating: DEFAULT_SATISFACTION_MIN_RATING,
        }
    }
}

// =============================================================================
// Client Statistics
// =============================================================================

/// Client counts per lifecycle category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ClientTypeBreakdown {
    pub new: usize,
    pub regular: usize,
    pub loyal: usize,
    pub occasional: usize,
}

impl ClientTypeBreakdown {
    /// Count for one category.
    pub const fn get(&self, client_type: ClientType) -> usize {
        match client_type {
            ClientType::New => self.new,
            ClientType::Regular => self.regular,
            ClientType::Loyal => self.loyal,
            ClientType::Occasional => self.occasional,
        }
    }
}

/// The client metric set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ClientStatistics {
    pub total_count: usize,
    /// Ordered within the activity threshold.
    pub active_count: usize,
    pub inactive_count: usize,
    pub count_by_type: ClientTypeBreakdown,
    pub vip_count: usize,
    pub total_orders: i64,
    pub total_spend: Money,
    /// Total spend / total orders (order-weighted).
    pub global_average_ticket: Money,
    /// Total spend / client count (simple per-client mean).
    pub average_ticket_per_client: Money,
    /// Clients with an active promotion.
    pub promoted_count: usize,
    pub promoted_average_ticket: Money,
    /// Average ticket grew vs the previous snapshot.
    pub growth_count: usize,
    pub decline_count: usize,
    pub stable_count: usize,
    pub average_rating: f64,
    /// Share of clients rating at or above the satisfaction threshold.
    pub satisfaction_percentage: f64,
}

/// Computes the client metric set over a (usually pre-filtered) collection.
pub fn compute_client_statistics(
    clients: &[Client],
    config: &StatsConfig,
    now: DateTime<Utc>,
) -> ClientStatistics {
    let total_count = clients.len();

    let active_count = clients
        .iter()
        .filter(|c| c.is_active(now, config.active_threshold_days))
        .count();

    let mut count_by_type = ClientTypeBreakdown::default();
    for client in clients {
        match client.client_type {
            ClientType::New => count_by_type.new += 1,
            ClientType::Regular => count_by_type.regular += 1,
            ClientType::Loyal => count_by_type.loyal += 1,
            ClientType::Occasional => count_by_type.occasional += 1,
        }
    }

    let vip_count = clients.iter().filter(|c| c.has_segment(Segment::Vip)).count();

    let total_orders: i64 = clients.iter().map(|c| c.order_count).sum();
    let total_spend: Money = clients.iter().map(|c| c.total_spend).sum();

    let promoted: Vec<&Client> = clients.iter().filter(|c| c.has_active_promotion).collect();
    let promoted_count = promoted.len();
    let promoted_spend: Money = promoted.iter().map(|c| c.total_spend).sum();

    let growth_count = clients
        .iter()
        .filter(|c| c.average_ticket > c.average_ticket_previous)
        .count();
    let decline_count = clients
        .iter()
        .filter(|c| c.average_ticket < c.average_ticket_previous)
        .count();

    let average_rating = if total_count == 0 {
        0.0
    } else {
        clients.iter().map(|c| c.rating).sum::<f64>() / total_count as f64
    };

    let satisfied = clients
        .iter()
        .filter(|c| c.rating >= config.satisfaction_min_rating)
        .count();
    let satisfaction_percentage = if total_count == 0 {
        0.0
    } else {
        satisfied as f64 / total_count as f64 * 100.0
    };

    let stats = ClientStatistics {
        total_count,
        active_count,
        inactive_count: total_count - active_count,
        count_by_type,
        vip_count,
        total_orders,
        total_spend,
        global_average_ticket: total_spend.divided_by(total_orders),
        average_ticket_per_client: total_spend.divided_by(total_count as i64),
        promoted_count,
        promoted_average_ticket: promoted_spend.divided_by(promoted_count as i64),
        growth_count,
        decline_count,
        stable_count: total_count - growth_count - decline_count,
        average_rating,
        satisfaction_percentage,
    };

    tracing::debug!(
        total = stats.total_count,
        active = stats.active_count,
        "computed client statistics"
    );
    stats
}

// =============================================================================
// Invoice Statistics
// =============================================================================

/// Count and total per payment method.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PaymentMethodBreakdown {
    pub method: PaymentMethod,
    pub count: usize,
    pub total: Money,
}

/// The invoice metric set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct InvoiceStatistics {
    pub count: usize,
    pub total: Money,
    /// Invoices with Verifactu verification.
    pub verified_count: usize,
    pub by_payment_method: Vec<PaymentMethodBreakdown>,
}

/// Computes invoice totals over a (usually pre-filtered) collection.
pub fn compute_invoice_statistics(invoices: &[Invoice]) -> InvoiceStatistics {
    let by_payment_method = PaymentMethod::ALL
        .iter()
        .map(|&method| {
            let matching = invoices.iter().filter(|i| i.payment_method == method);
            let (count, total) = matching.fold((0usize, Money::zero()), |(n, sum), i| {
                (n + 1, sum + i.total)
            });
            PaymentMethodBreakdown {
                method,
                count,
                total,
            }
        })
        .collect();

    let stats = InvoiceStatistics {
        count: invoices.len(),
        total: invoices.iter().map(|i| i.total).sum(),
        verified_count: invoices.iter().filter(|i| i.verified).count(),
        by_payment_method,
    };

    tracing::debug!(count = stats.count, total = %stats.total, "computed invoice statistics");
    stats
}

// =============================================================================
// Product Statistics
// =============================================================================

/// The product metric set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct ProductStatistics {
    pub count: usize,
    /// Mean of per-product margin fractions (each zero-guarded).
    pub average_margin: f64,
    /// Mean sale price.
    pub average_price: Money,
    /// Stock units summed over every location of every product.
    pub total_stock_units: i64,
}

/// Computes product metrics over a (usually pre-filtered) collection.
pub fn compute_product_statistics(products: &[Product]) -> ProductStatistics {
    let count = products.len();

    let average_margin = if count == 0 {
        0.0
    } else {
        products.iter().map(|p| p.margin()).sum::<f64>() / count as f64
    };

    let total_price: Money = products.iter().map(|p| p.sale_price).sum();

    ProductStatistics {
        count,
        average_margin,
        average_price: total_price.divided_by(count as i64),
        total_stock_units: products.iter().map(|p| p.total_stock()).sum(),
    }
}

// =============================================================================
// Promotion Statistics
// =============================================================================

/// Sends and redemptions per delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ChannelBreakdown {
    pub channel: DeliveryChannel,
    pub sent: usize,
    pub redeemed: usize,
}

/// The promotion metric set, combining campaign definitions with the
/// redemption log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct PromotionStatistics {
    pub total_count: usize,
    /// Campaigns whose validity window contains `now`.
    pub active_count: usize,
    pub sent_count: usize,
    pub redeemed_count: usize,
    /// Redeemed / sent, as a percentage.
    pub redemption_percentage: f64,
    pub by_channel: Vec<ChannelBreakdown>,
}

/// Computes promotion metrics over campaigns plus their redemption log.
pub fn compute_promotion_statistics(
    promotions: &[Promotion],
    redemptions: &[PromotionRedemption],
    now: DateTime<Utc>,
) -> PromotionStatistics {
    let sent_count = redemptions.len();
    let redeemed_count = redemptions.iter().filter(|r| r.is_redeemed()).count();

    let by_channel = DeliveryChannel::ALL
        .iter()
        .map(|&channel| ChannelBreakdown {
            channel,
            sent: redemptions.iter().filter(|r| r.channel == channel).count(),
            redeemed: redemptions
                .iter()
                .filter(|r| r.channel == channel && r.is_redeemed())
                .count(),
        })
        .collect();

    PromotionStatistics {
        total_count: promotions.len(),
        active_count: promotions.iter().filter(|p| p.is_active_at(now)).count(),
        sent_count,
        redeemed_count,
        redemption_percentage: if sent_count == 0 {
            0.0
        } else {
            redeemed_count as f64 / sent_count as f64 * 100.0
        },
        by_channel,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_records, FilterParams};
    use crate::testutil::{client, invoice, product, promotion, redemption};
    use chrono::Duration;

    #[test]
    fn test_empty_collection_all_metrics_zero() {
        let now = Utc::now();
        let stats = compute_client_statistics(&[], &StatsConfig::default(), now);

        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.active_count, 0);
        assert_eq!(stats.inactive_count, 0);
        assert_eq!(stats.vip_count, 0);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_spend, Money::zero());
        assert_eq!(stats.global_average_ticket, Money::zero());
        assert_eq!(stats.average_ticket_per_client, Money::zero());
        assert_eq!(stats.promoted_average_ticket, Money::zero());
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(stats.satisfaction_percentage, 0.0);
        assert!(!stats.average_rating.is_nan());
        assert!(!stats.satisfaction_percentage.is_nan());

        let inv_stats = compute_invoice_statistics(&[]);
        assert_eq!(inv_stats.count, 0);
        assert_eq!(inv_stats.total, Money::zero());

        let prod_stats = compute_product_statistics(&[]);
        assert_eq!(prod_stats.average_margin, 0.0);
        assert_eq!(prod_stats.average_price, Money::zero());
    }

    #[test]
    fn test_weighted_vs_simple_average_ticket() {
        let now = Utc::now();
        // Client A: 1 order, 10 € spend. Client B: 9 orders, 90 € spend.
        let mut a = client("c-1", "Ana García", Some(5), now);
        a.order_count = 1;
        a.total_spend = Money::from_cents(1000);
        let mut b = client("c-2", "Luis Pérez", Some(5), now);
        b.order_count = 9;
        b.total_spend = Money::from_cents(9000);

        let stats = compute_client_statistics(&[a, b], &StatsConfig::default(), now);

        // 100 € over 10 orders = 10 € weighted
        assert_eq!(stats.global_average_ticket, Money::from_cents(1000));
        // 100 € over 2 clients = 50 € per client
        assert_eq!(stats.average_ticket_per_client, Money::from_cents(5000));
        assert_ne!(stats.global_average_ticket, stats.average_ticket_per_client);
    }

    #[test]
    fn test_active_inactive_scenario() {
        let now = Utc::now();
        // 2 clients last ordered 100 days ago, 3 within the last 10 days
        let clients = vec![
            client("c-1", "Ana García", Some(100), now),
            client("c-2", "Luis Pérez", Some(100), now),
            client("c-3", "Marta Ruiz", Some(10), now),
            client("c-4", "Pablo Gil", Some(3), now),
            client("c-5", "Sara Vega", Some(8), now),
        ];
        let stats = compute_client_statistics(&clients, &StatsConfig::default(), now);
        assert_eq!(stats.active_count, 3);
        assert_eq!(stats.inactive_count, 2);
    }

    #[test]
    fn test_activity_threshold_is_configurable() {
        let now = Utc::now();
        let clients = vec![client("c-1", "Ana García", Some(100), now)];

        let default_cfg = StatsConfig::default();
        assert_eq!(
            compute_client_statistics(&clients, &default_cfg, now).active_count,
            0
        );

        let lenient = StatsConfig {
            active_threshold_days: 180,
            ..StatsConfig::default()
        };
        assert_eq!(
            compute_client_statistics(&clients, &lenient, now).active_count,
            1
        );
    }

    #[test]
    fn test_growth_decline_stable_partition() {
        let now = Utc::now();
        let mut growing = client("c-1", "Ana García", Some(5), now);
        growing.average_ticket = Money::from_cents(1600);
        growing.average_ticket_previous = Money::from_cents(1400);

        let mut declining = client("c-2", "Luis Pérez", Some(5), now);
        declining.average_ticket = Money::from_cents(1200);
        declining.average_ticket_previous = Money::from_cents(1400);

        let mut stable = client("c-3", "Marta Ruiz", Some(5), now);
        stable.average_ticket = Money::from_cents(1400);
        stable.average_ticket_previous = Money::from_cents(1400);

        let stats =
            compute_client_statistics(&[growing, declining, stable], &StatsConfig::default(), now);
        assert_eq!(stats.growth_count, 1);
        assert_eq!(stats.decline_count, 1);
        assert_eq!(stats.stable_count, 1);
    }

    #[test]
    fn test_satisfaction_and_rating() {
        let now = Utc::now();
        let mut happy = client("c-1", "Ana García", Some(5), now);
        happy.rating = 5.0;
        let mut fine = client("c-2", "Luis Pérez", Some(5), now);
        fine.rating = 4.0;
        let mut unhappy = client("c-3", "Marta Ruiz", Some(5), now);
        unhappy.rating = 2.0;

        let stats =
            compute_client_statistics(&[happy, fine, unhappy], &StatsConfig::default(), now);
        assert!((stats.average_rating - 11.0 / 3.0).abs() < 1e-9);
        // 2 of 3 rate >= 4.0
        assert!((stats.satisfaction_percentage - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_type_breakdown_covers_all_clients() {
        let now = Utc::now();
        let mut a = client("c-1", "Ana García", Some(5), now);
        a.client_type = ClientType::New;
        let mut b = client("c-2", "Luis Pérez", Some(5), now);
        b.client_type = ClientType::Loyal;
        let c = client("c-3", "Marta Ruiz", Some(5), now); // Regular fixture default

        let stats = compute_client_statistics(&[a, b, c], &StatsConfig::default(), now);
        let breakdown = stats.count_by_type;
        assert_eq!(breakdown.get(ClientType::New), 1);
        assert_eq!(breakdown.get(ClientType::Loyal), 1);
        assert_eq!(breakdown.get(ClientType::Regular), 1);
        assert_eq!(breakdown.get(ClientType::Occasional), 0);

        let covered: usize = ClientType::ALL.iter().map(|&t| breakdown.get(t)).sum();
        assert_eq!(covered, stats.total_count);
    }

    #[test]
    fn test_filtered_invoice_sum_matches_exactly_the_matched_records() {
        let now = Utc::now();
        let invoices = vec![
            invoice("FAC-001", "Ana García", 4590, PaymentMethod::Cash, now),
            invoice("FAC-002", "Luis Pérez", 2850, PaymentMethod::Card, now),
            invoice("FAC-003", "Ana García", 3860, PaymentMethod::Online, now),
        ];
        // Free text matches the 2 invoices of Ana García
        let params = FilterParams {
            free_text: "ana garcía".to_string(),
            ..Default::default()
        };
        let subset = filter_records(&invoices, &params, now);
        assert_eq!(subset.len(), 2);

        let stats = compute_invoice_statistics(&subset);
        assert_eq!(stats.total, Money::from_cents(4590 + 3860));
    }

    #[test]
    fn test_invoice_payment_breakdown() {
        let now = Utc::now();
        let invoices = vec![
            invoice("FAC-001", "Ana García", 1000, PaymentMethod::Cash, now),
            invoice("FAC-002", "Luis Pérez", 2000, PaymentMethod::Cash, now),
            invoice("FAC-003", "Marta Ruiz", 3000, PaymentMethod::Online, now),
        ];
        let stats = compute_invoice_statistics(&invoices);

        let cash = stats
            .by_payment_method
            .iter()
            .find(|b| b.method == PaymentMethod::Cash)
            .expect("cash bucket");
        assert_eq!(cash.count, 2);
        assert_eq!(cash.total, Money::from_cents(3000));

        let mixed = stats
            .by_payment_method
            .iter()
            .find(|b| b.method == PaymentMethod::Mixed)
            .expect("mixed bucket");
        assert_eq!(mixed.count, 0);
        assert_eq!(mixed.total, Money::zero());
    }

    #[test]
    fn test_product_statistics() {
        let products = vec![
            // margin (250-85)/250 = 0.66
            product("PAN-001", "Barra clásica", 85, 250),
            // margin (180-60)/180 = 0.666...
            product("BOL-001", "Croissant", 60, 180),
        ];
        let stats = compute_product_statistics(&products);
        assert_eq!(stats.count, 2);
        let expected = (0.66 + 120.0 / 180.0) / 2.0;
        assert!((stats.average_margin - expected).abs() < 1e-9);
        assert_eq!(stats.average_price, Money::from_cents(215));
    }

    #[test]
    fn test_product_zero_sale_price_does_not_poison_average() {
        let free_sample = product("X-001", "Muestra", 50, 0);
        let paid = product("PAN-001", "Barra clásica", 85, 250);

        let stats = compute_product_statistics(&[free_sample, paid]);
        // Zero-price product contributes margin 0, not NaN
        assert!(!stats.average_margin.is_nan());
        assert!((stats.average_margin - 0.33).abs() < 1e-9);
    }

    #[test]
    fn test_promotion_statistics() {
        let now = Utc::now();
        let mut expired = promotion("p-1", "Campaña vieja", now);
        expired.valid_from = now - Duration::days(60);
        expired.valid_until = now - Duration::days(30);
        let active = promotion("p-2", "Semana del pan", now);

        let redemptions = vec![
            redemption("p-2", "c-1", DeliveryChannel::Push, true),
            redemption("p-2", "c-2", DeliveryChannel::Push, false),
            redemption("p-2", "c-3", DeliveryChannel::Email, true),
            redemption("p-1", "c-1", DeliveryChannel::Sms, false),
        ];

        let stats = compute_promotion_statistics(&[expired, active], &redemptions, now);
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.sent_count, 4);
        assert_eq!(stats.redeemed_count, 2);
        assert!((stats.redemption_percentage - 50.0).abs() < 1e-9);

        let push = stats
            .by_channel
            .iter()
            .find(|b| b.channel == DeliveryChannel::Push)
            .expect("push bucket");
        assert_eq!(push.sent, 2);
        assert_eq!(push.redeemed, 1);
    }

    #[test]
    fn test_promotion_statistics_empty_log() {
        let now = Utc::now();
        let stats = compute_promotion_statistics(&[], &[], now);
        assert_eq!(stats.redemption_percentage, 0.0);
        assert!(!stats.redemption_percentage.is_nan());
    }
}
