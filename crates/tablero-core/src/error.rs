//! # Error Types
//!
//! Domain-specific error types for tablero-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  tablero-core errors (this file)                                   │
//! │  ├── CoreError        - General domain errors                      │
//! │  └── ValidationError  - Input validation failures                  │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → caller notification           │
//! │                                                                     │
//! │  Nothing here is fatal: every error is recoverable locally and     │
//! │  maps to a transient user-facing message with retry.               │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field names, ids)
//! 3. Errors are enum variants, never String
//! 4. An empty filter result is NOT an error - it is a normal state

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These represent business rule violations. An empty search/filter result
/// deliberately has no variant here; emptiness is data, not failure.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Client cannot be found by id.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Notification cannot be found by id.
    ///
    /// ## When This Occurs
    /// - Marking read / dismissing an id that was already dismissed
    /// - A stale id from a concurrent observer of an older list snapshot
    #[error("Notification not found: {0}")]
    NotificationNotFound(String),

    /// Promotion cannot be found by id.
    #[error("Promotion not found: {0}")]
    PromotionNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input doesn't meet requirements. Used for early
/// validation before anything is handed to the persistence collaborator;
/// the operation aborts without side effects.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// No contact method was provided at all.
    #[error("at least one contact method (email or phone) is required")]
    NoContactMethod,

    /// A date window is inverted (start after end).
    #[error("{field}: start date must not be after end date")]
    InvertedWindow { field: String },

    /// A monetary amount that must not be negative is negative.
    #[error("{field} must not be negative")]
    NegativeAmount { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ClientNotFound("c-42".to_string());
        assert_eq!(err.to_string(), "Client not found: c-42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::NoContactMethod;
        assert_eq!(
            err.to_string(),
            "at least one contact method (email or phone) is required"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
