//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  The catalog API sends prices as JSON numbers:                          │
//! │    { "upc": "0120...", "price": 0.1 }                                   │
//! │                                                                         │
//! │  Summing them as floats drifts:                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: convert ONCE at the boundary, then integer cents        │
//! │    Money::from_decimal(0.1)  → 10 cents                                │
//! │    10 + 20 = 30 cents                                        ✅        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use izzymart_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//! let line = price.multiply_quantity(2);
//! assert_eq!(line.cents(), 2198);
//!
//! // Wire values are converted exactly once.
//! let wire = Money::from_decimal(4.99).unwrap();
//! assert_eq!(wire.cents(), 499);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price (f64 wire) ──► Money::from_decimal ──► CartItem.unit    │
/// │                                                          │              │
/// │                                    × quantity ◄──────────┘              │
/// │                                        │                                │
/// │                                        ▼                                │
/// │                               Cart.total() ──► "$12.34" on screen       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal wire amount (e.g. `4.99`) into cents.
    ///
    /// Rounds to the nearest cent. This is the ONLY place a float enters the
    /// money path; everything downstream is integer arithmetic.
    ///
    /// ## Errors
    /// `CoreError::InvalidAmount` for NaN, infinite, or out-of-range values.
    pub fn from_decimal(amount: f64) -> CoreResult<Self> {
        if !amount.is_finite() {
            return Err(CoreError::InvalidAmount {
                input: amount.to_string(),
                reason: "amount must be a finite number".to_string(),
            });
        }

        let cents = (amount * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(CoreError::InvalidAmount {
                input: amount.to_string(),
                reason: "amount is out of range".to_string(),
            });
        }

        Ok(Money(cents as i64))
    }

    /// Parses operator input such as `"4.99"` or `"$4.99"`.
    ///
    /// ## Example
    /// ```rust
    /// use izzymart_core::money::Money;
    ///
    /// assert_eq!(Money::parse("$4.99").unwrap().cents(), 499);
    /// assert!(Money::parse("four").is_err());
    /// ```
    pub fn parse(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);

        let amount: f64 = digits.parse().map_err(|_| CoreError::InvalidAmount {
            input: input.to_string(),
            reason: "not a number".to_string(),
        })?;

        Money::from_decimal(amount)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a decimal for the wire format (PUT payloads).
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies money by a cart quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use izzymart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0.saturating_mul(qty as i64))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition saturates at the `i64` bounds so a runaway total pins instead of
/// wrapping.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
