//! # tablero-query: Filtered Aggregate View Engine
//!
//! Pure query layer for the Tablero dashboard. Given a collection of
//! domain records and a set of filter/sort parameters, it produces the
//! filtered, ordered subset for display, the aggregate statistics over
//! that subset, and an export projection.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      One Recomputation                              │
//! │                                                                     │
//! │  parameters change (UI state, passed in - never retained here)      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  filter_records(collection, params, now)      [filter]              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  sort_records(subset, column, direction)      [sort]                │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  compute_*_statistics(ordered subset)         [stats]               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  project_for_export(subset, fields, format)   [projection]          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Every function is a pure, side-effect-free read query; concurrent
//!   calls need no coordination
//! - Unknown filter values and sort columns degrade to no-ops, never
//!   errors
//! - Zero-denominator aggregates resolve to 0, never NaN
//! - Sorting is stable, so pagination is reproducible
//!
//! ## Example
//! ```rust
//! use chrono::Utc;
//! use tablero_query::{
//!     compute_invoice_statistics, filter_records, sort_records, FilterParams, SortDirection,
//! };
//!
//! let invoices: Vec<tablero_core::Invoice> = vec![];
//! let params = FilterParams::from_options("all", &[], "30", "in-store", "garcía");
//!
//! let subset = filter_records(&invoices, &params, Utc::now());
//! let ordered = sort_records(&subset, "total", SortDirection::Desc);
//! let stats = compute_invoice_statistics(&ordered);
//! assert_eq!(stats.count, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod filter;
pub mod projection;
pub mod sort;
pub mod stats;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use filter::{filter_records, Channel, FilterParams, Filterable, Period};
pub use projection::{project_for_export, ExportFormat, ExportPayload, Exportable, FieldSelection};
pub use sort::{sort_records, toggle_sort, SortDirection, SortState, Sortable};
pub use stats::{
    compute_client_statistics, compute_invoice_statistics, compute_product_statistics,
    compute_promotion_statistics, ClientStatistics, InvoiceStatistics, ProductStatistics,
    PromotionStatistics, StatsConfig,
};

// =============================================================================
// Shared Test Fixtures
// =============================================================================
