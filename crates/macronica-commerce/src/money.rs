//! Money type for rupee amounts.
//!
//! Amounts are held as whole paise (1/100 rupee) so that discounts and
//! sums never drift the way floating-point rupees do. On the wire a
//! [`Money`] is a plain JSON number of rupees (`45`, `42.75`), which is how
//! carts have always been stored.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Paise per rupee.
const PAISE_PER_RUPEE: i64 = 100;

/// Currency symbol used for display.
pub const RUPEE_SYMBOL: &str = "\u{20b9}";

/// An amount of Indian rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    paise: i64,
}

impl Money {
    /// Create a value from paise.
    pub const fn from_paise(paise: i64) -> Self {
        Self { paise }
    }

    /// Create a value from whole rupees.
    pub const fn from_rupees(rupees: i64) -> Self {
        Self {
            paise: rupees * PAISE_PER_RUPEE,
        }
    }

    /// Create a value from a decimal rupee amount, rounded to the nearest paisa.
    ///
    /// Returns `None` for NaN, infinities and amounts that do not fit.
    ///
    /// ```
    /// use macronica_commerce::money::Money;
    /// assert_eq!(Money::try_from_decimal(42.75).unwrap().paise(), 4275);
    /// ```
    pub fn try_from_decimal(rupees: f64) -> Option<Self> {
        let paise = (rupees * PAISE_PER_RUPEE as f64).round();
        if !paise.is_finite() || paise.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Self::from_paise(paise as i64))
    }

    /// A zero amount.
    pub const fn zero() -> Self {
        Self { paise: 0 }
    }

    /// Amount in paise.
    pub const fn paise(&self) -> i64 {
        self.paise
    }

    /// Amount in rupees as a decimal.
    pub fn to_decimal(&self) -> f64 {
        self.paise as f64 / PAISE_PER_RUPEE as f64
    }

    pub fn is_zero(&self) -> bool {
        self.paise == 0
    }

    pub fn is_positive(&self) -> bool {
        self.paise > 0
    }

    pub fn is_negative(&self) -> bool {
        self.paise < 0
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn times(&self, quantity: u32) -> Money {
        Money::from_paise(self.paise.saturating_mul(i64::from(quantity)))
    }

    /// Reduce by `percent` percent, rounding half away from zero to the paisa.
    ///
    /// ```
    /// use macronica_commerce::money::Money;
    /// let discounted = Money::from_rupees(45).percent_off(5);
    /// assert_eq!(discounted.paise(), 4275);
    /// ```
    pub fn percent_off(&self, percent: i64) -> Money {
        self.scale(100 - percent, 100)
    }

    /// Clamp negative amounts to zero.
    pub fn max_zero(self) -> Money {
        if self.paise < 0 {
            Money::zero()
        } else {
            self
        }
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money::from_paise(self.paise.saturating_add(other.paise))
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money::from_paise(self.paise.saturating_sub(other.paise))
    }

    /// Multiply by `numerator / denominator` with half-away-from-zero rounding.
    fn scale(&self, numerator: i64, denominator: i64) -> Money {
        let product = i128::from(self.paise) * i128::from(numerator);
        let denominator = i128::from(denominator);
        let mut quotient = product / denominator;
        let remainder = product % denominator;
        if remainder.abs() * 2 >= denominator.abs() {
            quotient += product.signum() * denominator.signum();
        }
        let clamped = quotient.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
        Money::from_paise(clamped as i64)
    }

    /// Format for display with Indian digit grouping, e.g. `₹1,00,000` or `₹42.75`.
    pub fn display(&self) -> String {
        let sign = if self.paise < 0 { "-" } else { "" };
        let abs = self.paise.unsigned_abs();
        let rupees = abs / PAISE_PER_RUPEE as u64;
        let fraction = abs % PAISE_PER_RUPEE as u64;

        let mut out = format!("{sign}{RUPEE_SYMBOL}{}", group_indian(rupees));
        if fraction != 0 {
            let digits = format!("{fraction:02}");
            out.push('.');
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }
}

/// Group digits the Indian way: last three, then pairs (`12,34,56,789`).
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_paise(self.paise + other.paise)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::from_paise(self.paise - other.paise)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.paise % PAISE_PER_RUPEE == 0 {
            serializer.serialize_i64(self.paise / PAISE_PER_RUPEE)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees = f64::deserialize(deserializer)?;
        Money::try_from_decimal(rupees)
            .ok_or_else(|| de::Error::custom(format!("rupee amount out of range: {rupees}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(180).paise(), 18000);
        assert!((Money::from_paise(4275).to_decimal() - 42.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percent_off_exact_for_whole_rupees() {
        assert_eq!(Money::from_rupees(100).percent_off(5), Money::from_rupees(95));
        assert_eq!(Money::from_rupees(5800).percent_off(5), Money::from_rupees(5510));
    }

    #[test]
    fn test_percent_off_rounds_half_away_from_zero() {
        // 0.95 * 1 paisa = 0.95 -> 1
        assert_eq!(Money::from_paise(1).percent_off(5).paise(), 1);
        // 0.95 * 10 paise = 9.5 -> 10
        assert_eq!(Money::from_paise(10).percent_off(5).paise(), 10);
        // 0.95 * 11 paise = 10.45 -> 10
        assert_eq!(Money::from_paise(11).percent_off(5).paise(), 10);
        assert_eq!(Money::from_paise(-10).percent_off(5).paise(), -10);
    }

    #[test]
    fn test_times_saturates() {
        assert_eq!(Money::from_rupees(45).times(3), Money::from_rupees(135));
        assert_eq!(
            Money::from_paise(i64::MAX).times(2),
            Money::from_paise(i64::MAX)
        );
    }

    #[test]
    fn test_display_indian_grouping() {
        assert_eq!(Money::from_rupees(45).display(), "\u{20b9}45");
        assert_eq!(Money::from_rupees(5800).display(), "\u{20b9}5,800");
        assert_eq!(Money::from_rupees(21000).display(), "\u{20b9}21,000");
        assert_eq!(Money::from_rupees(100000).display(), "\u{20b9}1,00,000");
        assert_eq!(Money::from_rupees(12345678).display(), "\u{20b9}1,23,45,678");
    }

    #[test]
    fn test_display_fraction() {
        assert_eq!(Money::from_paise(4275).display(), "\u{20b9}42.75");
        assert_eq!(Money::from_paise(4250).display(), "\u{20b9}42.5");
        assert_eq!(Money::from_paise(5).display(), "\u{20b9}0.05");
        assert_eq!(Money::from_rupees(-25).display(), "-\u{20b9}25");
    }

    #[test]
    fn test_serializes_as_rupee_number() {
        assert_eq!(serde_json::to_string(&Money::from_rupees(45)).unwrap(), "45");
        assert_eq!(serde_json::to_string(&Money::from_paise(4275)).unwrap(), "42.75");
    }

    #[test]
    fn test_deserializes_integers_and_decimals() {
        let whole: Money = serde_json::from_str("320").unwrap();
        assert_eq!(whole, Money::from_rupees(320));

        let decimal: Money = serde_json::from_str("42.75").unwrap();
        assert_eq!(decimal.paise(), 4275);

        assert!(serde_json::from_str::<Money>("\"45\"").is_err());
        assert!(serde_json::from_str::<Money>("1e300").is_err());
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(1), Money::from_paise(50)].into_iter().sum();
        assert_eq!(total.paise(), 150);
    }

    #[test]
    fn test_max_zero() {
        assert_eq!(Money::from_rupees(-3).max_zero(), Money::zero());
        assert_eq!(Money::from_rupees(3).max_zero(), Money::from_rupees(3));
    }
}
