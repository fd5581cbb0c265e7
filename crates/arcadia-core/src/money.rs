//! # Money Module
//!
//! The `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  In floating point:   0.1 + 0.2 = 0.30000000000000004               │
//! │                                                                     │
//! │  In integer cents:    10 + 20 = 30                                  │
//! │                                                                     │
//! │  Every monetary value in Arcadia - base prices, tier prices, line   │
//! │  totals, order totals, commission amounts - is an i64 cent count.   │
//! │  Only the storefront UI converts to a decimal for display.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use arcadia_core::money::Money;
//! use arcadia_core::types::Rate;
//!
//! let unit = Money::from_cents(9000);       // $90.00
//! let line = unit.multiply_quantity(5);     // $450.00
//! let cut = line.percent_of(Rate::from_bps(500)); // 5.0% -> $22.50
//! assert_eq!(cut.cents(), 2250);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::types::Rate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// Signed so refunds and adjustments can be represented, although the
/// order core itself only ever produces non-negative amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use arcadia_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
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

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a quantity to produce a line total.
    ///
    /// ```rust
    /// use arcadia_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(9000); // $90.00
    /// assert_eq!(unit_price.multiply_quantity(5).cents(), 45000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Takes a percentage of this amount, rate given in basis points.
    ///
    /// Integer math with half-up rounding: `(cents * bps + 5000) / 10000`.
    /// i128 intermediates so large order totals cannot overflow.
    ///
    /// ```rust
    /// use arcadia_core::money::Money;
    /// use arcadia_core::types::Rate;
    ///
    /// let total = Money::from_cents(100_000); // $1000.00
    /// let commission = total.percent_of(Rate::from_bps(500)); // 5.0%
    /// assert_eq!(commission.cents(), 5_000); // $50.00
    /// ```
    pub fn percent_of(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display. The storefront formats money itself so
/// localization stays a frontend concern.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
    }
}

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

// =============================================================================
// Unit Tests
// =============================================================================
