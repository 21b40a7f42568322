//! # Demo Dataset
//!
//! Seeds a small but realistic dataset for the `demo` binary and for
//! integration-style tests: two brands ("Horno Sol" bakery, "Café Lunar"
//! coffee), three points of sale, and a spread of client activity that
//! exercises every statistic on the dashboard.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use tablero_core::{
    Client, ClientType, DeliveryChannel, Invoice, Money, Notification, PaymentMethod, Product,
    Promotion, PromotionKind, PromotionRedemption, Segment, StockLocation,
};

use crate::RecordStore;

/// The demo brands.
pub const BRANDS: [&str; 2] = ["Horno Sol", "Café Lunar"];

/// The demo points of sale.
pub const POINTS_OF_SALE: [&str; 3] = ["pdv-centro", "pdv-norte", "pdv-sur"];

/// Builds a fully seeded store relative to `now`.
pub fn demo_store(now: DateTime<Utc>) -> RecordStore {
    let clients = demo_clients(now);
    let invoices = demo_invoices(&clients, now);
    let promotions = demo_promotions(now);
    let redemptions = demo_redemptions(&promotions, &clients, now);

    RecordStore::new()
        .with_clients(clients)
        .with_invoices(invoices)
        .with_products(demo_products())
        .with_promotions(promotions)
        .with_redemptions(redemptions)
        .with_notifications(demo_notifications(now))
}

#[allow(clippy::too_many_arguments)]
fn client(
    now: DateTime<Utc>,
    name: &str,
    postal_code: &str,
    last_order_days_ago: Option<i64>,
    ticket_now_cents: i64,
    ticket_prev_cents: i64,
    spend_cents: i64,
    orders: i64,
    rating: f64,
    client_type: ClientType,
    segments: Vec<Segment>,
    brand: &str,
    pos: &str,
) -> Client {
    Client {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: Some(format!(
            "{}@example.com",
            name.to_lowercase().replace(' ', ".")
        )),
        phone: Some("600111222".to_string()),
        address: Some("Calle Mayor 1".to_string()),
        postal_code: postal_code.to_string(),
        signup_date: now - Duration::days(500),
        last_order_date: last_order_days_ago.map(|d| now - Duration::days(d)),
        average_ticket: Money::from_cents(ticket_now_cents),
        average_ticket_previous: Money::from_cents(ticket_prev_cents),
        total_spend: Money::from_cents(spend_cents),
        rating,
        order_count: orders,
        has_active_promotion: false,
        client_type,
        segments,
        favorite_brand: Some(brand.to_string()),
        favorite_product: None,
        favorite_point_of_sale: Some(pos.to_string()),
        notes: None,
    }
}

fn demo_clients(now: DateTime<Utc>) -> Vec<Client> {
    vec![
        client(
            now,
            "Ana García",
            "28001",
            Some(3),
            1650,
            1500,
            98500,
            60,
            4.8,
            ClientType::Loyal,
            vec![Segment::Vip, Segment::HighFrequency],
            "Horno Sol",
            "pdv-centro",
        ),
        client(
            now,
            "Luis Pérez",
            "28002",
            Some(12),
            1200,
            1250,
            45200,
            38,
            4.1,
            ClientType::Regular,
            vec![Segment::MultiStore],
            "Café Lunar",
            "pdv-norte",
        ),
        client(
            now,
            "Marta Ruiz",
            "28003",
            Some(110),
            900,
            1400,
            23100,
            25,
            3.2,
            ClientType::Occasional,
            vec![Segment::AtRisk],
            "Horno Sol",
            "pdv-sur",
        ),
        client(
            now,
            "Pablo Gil",
            "28001",
            Some(8),
            2100,
            1900,
            126000,
            58,
            5.0,
            ClientType::Loyal,
            vec![Segment::Vip],
            "Horno Sol",
            "pdv-centro",
        ),
        client(
            now,
            "Sara Vega",
            "28004",
            None,
            0,
            0,
            0,
            0,
            0.0,
            ClientType::New,
            vec![],
            "Café Lunar",
            "pdv-centro",
        ),
    ]
}

fn demo_invoices(clients: &[Client], now: DateTime<Utc>) -> Vec<Invoice> {
    let entries: [(usize, i64, i64, PaymentMethod, &str, &str); 6] = [
        (0, 4590, 2, PaymentMethod::Card, "pdv-centro", "Horno Sol"),
        (0, 2850, 9, PaymentMethod::Cash, "pdv-centro", "Horno Sol"),
        (1, 3860, 5, PaymentMethod::Online, "pdv-norte", "Café Lunar"),
        (2, 1520, 110, PaymentMethod::Cash, "pdv-sur", "Horno Sol"),
        (3, 7420, 1, PaymentMethod::Mixed, "pdv-centro", "Horno Sol"),
        (3, 5180, 40, PaymentMethod::Card, "pdv-centro", "Horno Sol"),
    ];

    entries
        .iter()
        .enumerate()
        .map(|(i, &(client_idx, cents, days_ago, method, pos, brand))| Invoice {
            id: format!("FAC-2025-{:04}", i + 1),
            client_id: clients[client_idx].id.clone(),
            client_name: clients[client_idx].name.clone(),
            issued_at: now - Duration::days(days_ago),
            total: Money::from_cents(cents),
            line_items: vec!["Barra clásica".to_string(), "Café con leche".to_string()],
            verified: i % 2 == 0,
            payment_method: method,
            point_of_sale: Some(pos.to_string()),
            brand: Some(brand.to_string()),
        })
        .collect()
}

fn demo_products() -> Vec<Product> {
    let entries: [(&str, &str, &str, &str, i64, i64, i64); 5] = [
        ("PAN-001", "Barra clásica", "Panadería", "Horno Sol", 85, 250, 1),
        ("BOL-001", "Croissant", "Bollería", "Horno Sol", 60, 180, 2),
        ("CAF-001", "Café con leche", "Cafetería", "Café Lunar", 40, 160, 3),
        ("BOL-002", "Napolitana", "Bollería", "Horno Sol", 70, 200, 4),
        ("CAF-002", "Espresso doble", "Cafetería", "Café Lunar", 35, 140, 5),
    ];

    entries
        .iter()
        .map(|&(code, name, category, brand, cost, sale, rank)| Product {
            code: code.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            brand: brand.to_string(),
            cost_price: Money::from_cents(cost),
            sale_price: Money::from_cents(sale),
            sales_rank: rank,
            stock: POINTS_OF_SALE
                .iter()
                .enumerate()
                .map(|(i, pos)| StockLocation {
                    point_of_sale: pos.to_string(),
                    quantity: 40 - 10 * i as i64,
                })
                .collect(),
        })
        .collect()
}

fn demo_promotions(now: DateTime<Utc>) -> Vec<Promotion> {
    vec![
        Promotion {
            id: Uuid::new_v4().to_string(),
            name: "Semana del pan".to_string(),
            discount: "10% en panadería".to_string(),
            kind: PromotionKind::Percentage,
            valid_from: now - Duration::days(2),
            valid_until: now + Duration::days(5),
            per_client_cap: Some(1),
            total_cap: Some(500),
            brands: vec!["Horno Sol".to_string()],
            points_of_sale: vec![],
            audience: None,
        },
        Promotion {
            id: Uuid::new_v4().to_string(),
            name: "Bienvenida Café Lunar".to_string(),
            discount: "Primer café gratis".to_string(),
            kind: PromotionKind::Welcome,
            valid_from: now - Duration::days(30),
            valid_until: now + Duration::days(60),
            per_client_cap: Some(1),
            total_cap: None,
            brands: vec!["Café Lunar".to_string()],
            points_of_sale: vec![],
            audience: Some(ClientType::New),
        },
        Promotion {
            id: Uuid::new_v4().to_string(),
            name: "Vuelve con nosotros".to_string(),
            discount: "5 € en tu próxima compra".to_string(),
            kind: PromotionKind::AtRisk,
            valid_from: now - Duration::days(90),
            valid_until: now - Duration::days(30),
            per_client_cap: Some(2),
            total_cap: Some(200),
            brands: vec![],
            points_of_sale: vec!["pdv-sur".to_string()],
            audience: Some(ClientType::Occasional),
        },
    ]
}

fn demo_redemptions(
    promotions: &[Promotion],
    clients: &[Client],
    now: DateTime<Utc>,
) -> Vec<PromotionRedemption> {
    let entries: [(usize, usize, DeliveryChannel, bool); 4] = [
        (0, 0, DeliveryChannel::Push, true),
        (0, 3, DeliveryChannel::Push, false),
        (1, 4, DeliveryChannel::Email, true),
        (2, 2, DeliveryChannel::Sms, false),
    ];

    entries
        .iter()
        .map(|&(promo_idx, client_idx, channel, redeemed)| {
            let sent_at = now - Duration::days(1);
            PromotionRedemption {
                promotion_id: promotions[promo_idx].id.clone(),
                client_id: clients[client_idx].id.clone(),
                sent_at,
                redeemed_at: redeemed.then(|| sent_at + Duration::hours(4)),
                channel,
            }
        })
        .collect()
}

fn demo_notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: "n-1".to_string(),
            title: "Stock bajo".to_string(),
            body: "Barra clásica por debajo del mínimo en pdv-sur".to_string(),
            read: false,
            created_at: now - Duration::hours(2),
        },
        Notification {
            id: "n-2".to_string(),
            title: "Campaña finalizada".to_string(),
            body: "\"Vuelve con nosotros\" terminó con 1 canje".to_string(),
            read: true,
            created_at: now - Duration::days(30),
        },
    ]
}

// =============================================================================
// Unit Tests
// =============================================================================
