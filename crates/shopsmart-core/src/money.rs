//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0.1 + 0.2 = 0.30000000000000004   (f64)                                │
//! │  10 + 20   = 30                    (i64 cents)                          │
//! │                                                                         │
//! │  Cart totals are summed over many lines and quantities. Float drift     │
//! │  shows up as "$49.99999" on the cart page. Cents never drift.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopsmart_core::money::Money;
//!
//! let price = Money::from_cents(1099); // $10.99
//!
//! let doubled = price.multiply_quantity(2);   // $21.98
//! let total = price + Money::from_cents(500); // $15.99
//! assert_eq!(total.cents(), 1599);
//! assert_eq!(doubled.to_string(), "$21.98");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences between totals may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartLine.line_total ──► Cart.total
///                                                    │
///                                                    ▼
///                              OrderSummary { subtotal, shipping, total }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopsmart_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// Quantities have no upper bound, so a line total can exceed what
    /// fits in `i64` cents; it pins to `i64::MAX` instead of wrapping.
    ///
    /// ## Example
    /// ```rust
    /// use shopsmart_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// Always dollars with two decimals, as shown in logs and CLI output.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().unsigned_abs(),
            self.cents_part()
        )
    }
}

/// Parses a decimal amount such as `"12.99"`, `"12.9"`, `"$12"`.
///
/// At most two fractional digits are accepted; anything finer would need
/// rounding and is rejected instead.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let raw = s.trim();
        let raw = raw.strip_prefix('$').unwrap_or(raw);
        let (negative, raw) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let (major, minor) = match raw.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (raw, ""),
        };

        if major.is_empty() || !major.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if minor.len() > 2 || !minor.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("at most two decimal places"));
        }

        let major: i64 = major
            .parse()
            .map_err(|_| invalid("amount is too large"))?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => minor.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Saturating, like [`Money::multiply_quantity`].
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
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 650].into_iter().map(Money::from_cents).sum();
        assert_eq!(total.cents(), 1000);

        let empty: Money = std::iter::empty().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        assert!(!Money::from_cents(100).is_negative());
        assert!(Money::from_cents(-100).is_negative());
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_cents(299);
        assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let price = Money::from_cents(1000);
        let huge = price.multiply_quantity(i64::MAX / 100);
        assert_eq!(huge.cents(), i64::MAX);

        assert_eq!((huge + price).cents(), i64::MAX);

        let total: Money = [huge, huge, price].into_iter().sum();
        assert_eq!(total.cents(), i64::MAX);
        assert!(total.to_string().starts_with("$92233720368547758."));

        let floor = Money::from_cents(i64::MIN);
        assert_eq!(floor.to_string(), "-$92233720368547758.08");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!("12.99".parse::<Money>().unwrap().cents(), 1299);
        assert_eq!("12.9".parse::<Money>().unwrap().cents(), 1290);
        assert_eq!("$12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!(" 0.05 ".parse::<Money>().unwrap().cents(), 5);
        assert_eq!("-3.50".parse::<Money>().unwrap().cents(), -350);

        assert!("12.999".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!(".99".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
    }
}
