//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing 0.1 + 0.2 in binary floating point gives 0.30000000000000004   │
//! │  A month of sales summed that way drifts away from the real figure.    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Store, add and multiply cents (i64). Only the JSON boundary sees    │
//! │    decimals, and it rounds to the nearest cent on the way in.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! The browser client sends and expects plain decimal numbers (`80`, `12.5`).
//! `Money` serializes as a decimal number and deserializes from either a
//! number or a numeric string (`"12.50"`). An empty string reads as zero.
//!
//! ## Usage
//! ```rust
//! use partsdesk_core::money::Money;
//!
//! let price = Money::from_cents(8000); // 80.00
//! let cost = Money::from_cents(5000);  // 50.00
//!
//! let margin = (price - cost) * 3_i64;
//! assert_eq!(margin.cents(), 9000);
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: profit can be negative when selling below cost
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent sqlx type**: stored as an INTEGER column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use partsdesk_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units * 100)
    }

    /// Creates a Money value from a decimal amount, rounding to the nearest cent.
    ///
    /// Returns `None` for NaN or infinite input, or when the amount does not
    /// fit in an i64 number of cents.
    ///
    /// ## Example
    /// ```rust
    /// use partsdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(12.5), Some(Money::from_cents(1250)));
    /// assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let cents = (amount * 100.0).round();
        if cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the value as a decimal amount (for the JSON boundary only).
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the whole-unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
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

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use partsdesk_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Addition that returns `None` instead of overflowing.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Subtraction that returns `None` instead of overflowing.
    #[inline]
    pub const fn checked_sub(self, other: Money) -> Option<Money> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Multiplication by a quantity that returns `None` instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use partsdesk_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(80).checked_mul(3), Some(Money::from_units(240)));
    /// assert_eq!(Money::from_units(80).checked_mul(i64::MAX), None);
    /// ```
    #[inline]
    pub const fn checked_mul(self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain decimal with two places, no currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.cents_part())
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

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde (decimal wire format)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

/// Accepted JSON shapes for an amount.
#[derive(Deserialize)]
#[serde(untagged)]
enum DecimalRepr {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = match DecimalRepr::deserialize(deserializer)? {
            DecimalRepr::Number(n) => n,
            DecimalRepr::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse::<f64>()
                        .map_err(|_| de::Error::custom(format!("invalid amount: {s:?}")))?
                }
            }
        };

        Money::from_decimal(amount).ok_or_else(|| de::Error::custom("amount out of range"))
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
        assert_eq!(money.units(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_rounds_to_cent() {
        assert_eq!(Money::from_decimal(80.0), Some(Money::from_units(80)));
        assert_eq!(Money::from_decimal(10.999), Some(Money::from_cents(1100)));
        assert_eq!(Money::from_decimal(-5.5), Some(Money::from_cents(-550)));
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_checked_arithmetic() {
        let big = Money::from_cents(i64::MAX - 1);

        assert_eq!(big.checked_add(Money::from_cents(1)), Some(Money::from_cents(i64::MAX)));
        assert_eq!(big.checked_add(Money::from_cents(2)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
        assert_eq!(Money::from_units(30).checked_mul(3), Some(Money::from_units(90)));
        assert_eq!(Money::from_cents(8000).checked_mul(10_000_000_000_000_000), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "10.99");
        assert_eq!(Money::from_cents(500).to_string(), "5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-5.50");
        assert_eq!(Money::zero().to_string(), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3_i64).cents(), 3000);
        assert!((b - a).is_negative());
    }

    #[test]
    fn test_sum() {
        let amounts = [Money::from_cents(10), Money::from_cents(20), Money::from_cents(30)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total.cents(), 60);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_serializes_as_decimal() {
        assert_eq!(serde_json::to_string(&Money::from_cents(1099)).unwrap(), "10.99");
        assert_eq!(
            serde_json::to_value(Money::from_units(80)).unwrap(),
            serde_json::json!(80.0)
        );
    }

    #[test]
    fn test_deserializes_numbers_and_strings() {
        let from_int: Money = serde_json::from_str("80").unwrap();
        assert_eq!(from_int.cents(), 8000);

        let from_float: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(from_float.cents(), 1250);

        let from_text: Money = serde_json::from_str("\" 19.99 \"").unwrap();
        assert_eq!(from_text.cents(), 1999);

        let from_empty: Money = serde_json::from_str("\"\"").unwrap();
        assert!(from_empty.is_zero());

        assert!(serde_json::from_str::<Money>("\"abc\"").is_err());
        assert!(serde_json::from_str::<Money>("true").is_err());
    }
}
