//! # Validation Module
//!
//! Input validation for form submissions before they reach the external
//! persistence API.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Frontend form                                             │
//! │  ├── Basic format checks (empty, length)                            │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE (Rust)                                        │
//! │  ├── Required fields, email format, contact method                  │
//! │  └── Rejection aborts the operation with no side effects            │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: External backend API (out of scope)                       │
//! │                                                                     │
//! │  Defense in depth: each layer catches different errors              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tablero_core::validation::{validate_client_name, validate_email};
//!
//! validate_client_name("Ana García").unwrap();
//! validate_email("ana@example.com").unwrap();
//! ```

use chrono::{DateTime, Utc};

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_RATING, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_client_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - One `@`, non-empty local part
/// - Domain contains a dot and no whitespace
///
/// This is deliberately shallow; the delivery provider is the real
/// authority on deliverability.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() {
        return Err(invalid("missing local part"));
    }

    if domain.contains('@') {
        return Err(invalid("multiple @"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("invalid domain"));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }

    Ok(())
}

/// Validates that a client has at least one contact method.
///
/// ## Rules
/// - Email or phone must be present and non-blank
/// - A present email must also pass [`validate_email`]
pub fn validate_contact_method(
    email: Option<&str>,
    phone: Option<&str>,
) -> ValidationResult<()> {
    let has_email = email.is_some_and(|e| !e.trim().is_empty());
    let has_phone = phone.is_some_and(|p| !p.trim().is_empty());

    if !has_email && !has_phone {
        return Err(ValidationError::NoContactMethod);
    }

    if has_email {
        // Unwrap is safe: has_email implies Some
        validate_email(email.unwrap_or_default())?;
    }

    Ok(())
}

/// Validates a free-text search query.
///
/// ## Rules
/// - Can be empty (means "no free-text constraint")
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a client rating (0.0 to 5.0 stars).
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !(0.0..=MAX_RATING).contains(&rating) || rating.is_nan() {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: MAX_RATING as i64,
        });
    }

    Ok(())
}

/// Validates a monetary amount that must not be negative
/// (invoice totals, sale prices).
pub fn validate_non_negative(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::NegativeAmount {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a synthetic record id (UUID v4 format).
///
/// Business ids like invoice numbers ("FAC-2025-0042") have their own
/// formats and are NOT validated here.
///
/// ## Example
/// ```rust
/// use tablero_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Window Validators
// =============================================================================

/// Validates a promotion validity window (start must not be after end).
pub fn validate_validity_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> ValidationResult<()> {
    if start > end {
        return Err(ValidationError::InvertedWindow {
            field: "validity window".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_client_name() {
        assert!(validate_client_name("Ana García").is_ok());
        assert!(validate_client_name("").is_err());
        assert!(validate_client_name("   ").is_err());
        assert!(validate_client_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("a.b@sub.example.es").is_ok());

        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@nodot").is_err());
        assert!(validate_email("ana@.com").is_err());
        assert!(validate_email("ana @example.com").is_err());
    }

    #[test]
    fn test_validate_contact_method() {
        assert!(validate_contact_method(Some("ana@example.com"), None).is_ok());
        assert!(validate_contact_method(None, Some("600111222")).is_ok());
        assert!(validate_contact_method(Some("bad-email"), Some("600111222")).is_err());

        // Neither provided
        assert!(matches!(
            validate_contact_method(None, None),
            Err(ValidationError::NoContactMethod)
        ));
        // Blank strings don't count
        assert!(validate_contact_method(Some("  "), Some("")).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  ana  ").unwrap(), "ana");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(4.5).is_ok());
        assert!(validate_rating(5.0).is_ok());

        assert!(validate_rating(-0.1).is_err());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("total", Money::from_cents(0)).is_ok());
        assert!(validate_non_negative("total", Money::from_cents(4590)).is_ok());
        assert!(validate_non_negative("total", Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_validity_window() {
        let now = Utc::now();
        assert!(validate_validity_window(now, now + Duration::days(7)).is_ok());
        assert!(validate_validity_window(now, now).is_ok());
        assert!(validate_validity_window(now + Duration::days(1), now).is_err());
    }
}
