//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In JavaScript/floating point:                                      │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                       │
//! │                                                                     │
//! │  OUR SOLUTION: Integer Cents                                        │
//! │    45.90 € is stored as 4590 cents (i64)                           │
//! │    Sums over invoices are exact; only display converts back        │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tablero_core::money::Money;
//!
//! // Create from cents (preferred)
//! let total = Money::from_cents(4590); // 45.90 €
//!
//! // Arithmetic operations
//! let doubled = total * 2;                      // 91.80 €
//! let sum = total + Money::from_cents(2850);    // 74.40 €
//!
//! // NEVER do this:
//! // let bad = Money::from_float(45.90); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in euro cents (the smallest currency unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds, corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type: client
/// spend aggregates, invoice totals, product cost/sale prices. The
/// frontend receives cents and formats for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use tablero_core::money::Money;
    ///
    /// let total = Money::from_cents(4590); // 45.90 €
    /// assert_eq!(total.cents(), 4590);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (euros and cents).
    ///
    /// ## Example
    /// ```rust
    /// use tablero_core::money::Money;
    ///
    /// let total = Money::from_major_minor(45, 90); // 45.90 €
    /// assert_eq!(total.cents(), 4590);
    ///
    /// let refund = Money::from_major_minor(-5, 50); // -5.50 €
    /// assert_eq!(refund.cents(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -5.50 €, not -4.50 €
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (euros) portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Divides by a count, rounding to the nearest cent.
    ///
    /// A zero or negative count yields zero. This is the primitive under
    /// every average metric in the dashboard (average ticket, average
    /// price), so the zero-denominator guard lives here, once.
    ///
    /// ## Example
    /// ```rust
    /// use tablero_core::money::Money;
    ///
    /// let spend = Money::from_cents(10000); // 100.00 €
    /// assert_eq!(spend.divided_by(10).cents(), 1000); // 10.00 €
    /// assert_eq!(spend.divided_by(0).cents(), 0);     // guarded
    /// ```
    pub fn divided_by(&self, count: i64) -> Money {
        if count <= 0 {
            return Money::zero();
        }
        // Round half away from zero via integer math
        let half = count / 2;
        let adjusted = if self.0 >= 0 {
            self.0 + half
        } else {
            self.0 - half
        };
        Money(adjusted / count)
    }

    /// Returns `self / other` as an f64 fraction, 0.0 when `other` is zero.
    ///
    /// Used for margin and percentage metrics where the result is a
    /// dimensionless ratio rather than money, e.g. product margin
    /// `(sale - cost).ratio_to(sale)`.
    ///
    /// ## Example
    /// ```rust
    /// use tablero_core::money::Money;
    ///
    /// let sale = Money::from_cents(250);
    /// let cost = Money::from_cents(85);
    /// let margin = (sale - cost).ratio_to(sale);
    /// assert!((margin - 0.66).abs() < 1e-9);
    ///
    /// assert_eq!(Money::from_cents(100).ratio_to(Money::zero()), 0.0);
    /// ```
    pub fn ratio_to(&self, other: Money) -> f64 {
        if other.is_zero() {
            return 0.0;
        }
        self.0 as f64 / other.0 as f64
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. Use frontend formatting for
/// actual UI display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02} €", sign, self.euros().abs(), self.cents_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summing invoice totals and client spend is the hot path of the
/// statistics calculator, so Money folds directly from iterators.
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
