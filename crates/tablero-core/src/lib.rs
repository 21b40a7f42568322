//! # tablero-core: Pure Domain Model for Tablero
//!
//! This crate is the foundation of Tablero, the query/aggregation backend
//! of a multi-brand food retail dashboard. It contains the domain model as
//! plain data types and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Tablero Architecture                           │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Dashboard Frontend (web)                    │   │
//! │  │   Client list ─► Invoice list ─► Product list ─► Exports   │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │ JSON                                 │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │                     tablero-query                           │   │
//! │  │   filter ─► sort ─► statistics ─► export projection        │   │
//! │  └───────────────────────────┬─────────────────────────────────┘   │
//! │                              │                                      │
//! │  ┌───────────────────────────▼─────────────────────────────────┐   │
//! │  │               ★ tablero-core (THIS CRATE) ★                 │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐   │   │
//! │  │   │  types  │  │  money  │  │  error  │  │ validation │   │   │
//! │  │   │ Client  │  │  Money  │  │  Core   │  │   rules    │   │   │
//! │  │   │ Invoice │  │ (cents) │  │  errors │  │   checks   │   │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └────────────┘   │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Client, Invoice, Product, Promotion, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in euro cents (i64)
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use tablero_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let sale = Money::from_cents(250);  // 2.50 €
//! let cost = Money::from_cents(85);   // 0.85 €
//!
//! // Margin fraction with a zero-guarded denominator
//! let margin = (sale - cost).ratio_to(sale);
//! assert!((margin - 0.66).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use tablero_core::Money` instead of
// `use tablero_core::money::Money`

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of days without an order before a client counts as inactive.
///
/// ## Why a constant?
/// "Active within 90 days" is a business rule, not a law of nature. The
/// statistics calculator takes it as configuration (`StatsConfig`) so a
/// tenant can tune it; this is only the default.
pub const DEFAULT_ACTIVE_THRESHOLD_DAYS: i64 = 90;

/// Default minimum rating for a client to count as "satisfied".
///
/// ## Business Reason
/// The dashboard reports satisfaction as the share of clients rating 4
/// stars or better. Ratings are fractional, so this is a lower bound
/// rather than a set membership check.
pub const DEFAULT_SATISFACTION_MIN_RATING: f64 = 4.0;

/// Maximum length of a free-text search query.
///
/// ## Business Reason
/// Prevents pathological inputs from the search box; anything longer is
/// a paste accident, not a search.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Maximum allowed client rating (ratings are 0.0 to 5.0 stars).
pub const MAX_RATING: f64 = 5.0;
