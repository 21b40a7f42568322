//! # Demo Pipeline Runner
//!
//! Seeds the demo dataset and runs one full dashboard recomputation:
//! filter → sort → statistics → export projection, logging each stage.
//!
//! ## Usage
//! ```bash
//! cargo run -p tablero-store --bin demo
//!
//! # Verbose engine logging
//! RUST_LOG=debug cargo run -p tablero-store --bin demo
//! ```

use chrono::Utc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tablero_query::{
    compute_client_statistics, compute_invoice_statistics, compute_promotion_statistics,
    filter_records, project_for_export, sort_records, ExportFormat, FieldSelection, FilterParams,
    SortDirection, StatsConfig,
};
use tablero_store::demo::demo_store;

fn main() {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let now = Utc::now();
    let store = demo_store(now);
    info!(
        clients = store.clients().len(),
        invoices = store.invoices().len(),
        products = store.products().len(),
        promotions = store.promotions().len(),
        "demo dataset seeded"
    );

    // One recomputation as the dashboard would issue it: Horno Sol brand,
    // last 90 days, sorted by spend
    let params = FilterParams::from_options("Horno Sol", &[], "90", "all", "");
    let subset = filter_records(store.clients(), &params, now);
    let ordered = sort_records(&subset, "total_spend", SortDirection::Desc);

    let stats = compute_client_statistics(&ordered, &StatsConfig::default(), now);
    info!(
        matched = stats.total_count,
        active = stats.active_count,
        vip = stats.vip_count,
        global_average_ticket = %stats.global_average_ticket,
        per_client_average = %stats.average_ticket_per_client,
        satisfaction_pct = stats.satisfaction_percentage,
        "client view: {}",
        params.summary().join(" | ")
    );

    let invoice_stats = compute_invoice_statistics(store.invoices());
    info!(
        count = invoice_stats.count,
        total = %invoice_stats.total,
        verified = invoice_stats.verified_count,
        "invoice totals"
    );

    let promo_stats =
        compute_promotion_statistics(store.promotions(), store.redemptions(), now);
    info!(
        campaigns = promo_stats.total_count,
        active = promo_stats.active_count,
        redemption_pct = promo_stats.redemption_percentage,
        "promotion performance"
    );

    // Export projection: contact + statistics groups, headed for CSV
    let selection = FieldSelection {
        basic_info: true,
        contact_info: true,
        statistics: true,
        ..Default::default()
    };
    let payload = project_for_export(&ordered, &selection, ExportFormat::Csv, &params);
    info!(
        rows = payload.rows.len(),
        columns = payload.columns.len(),
        "export payload ready for the external encoder"
    );
    if let Ok(json) = serde_json::to_string_pretty(&payload) {
        tracing::debug!(bytes = json.len(), "export payload serialized");
    }
}
