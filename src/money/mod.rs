//! Fixed-point money arithmetic
//!
//! Every monetary amount is a non-negative integer count of 10^-18 units,
//! the same scale as wei. Multiplication and division go through a 256-bit
//! intermediate and truncate toward zero.

mod format;
mod wide;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Number of fractional decimal digits carried by [`Money`]
pub const DECIMALS: u32 = 18;

/// Raw units per whole unit (10^18)
pub const SCALE: u128 = 1_000_000_000_000_000_000;

/// Basis points per whole (100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Fixed-point arithmetic errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Input is not a plain non-negative decimal number
    #[error("Invalid decimal: {0:?}")]
    Parse(String),
    /// Divisor was zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Result would be negative
    #[error("Arithmetic underflow")]
    Underflow,
    /// Result does not fit the representable range
    #[error("Arithmetic overflow")]
    Overflow,
}

/// 18-decimal fixed-point amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u128);

impl Money {
    /// Zero
    pub const ZERO: Money = Money(0);
    /// One whole unit
    pub const ONE: Money = Money(SCALE);

    /// Wrap a raw scaled integer
    pub const fn from_raw(raw: u128) -> Self {
        Self(raw)
    }

    /// Raw scaled integer
    pub const fn raw(self) -> u128 {
        self.0
    }

    /// Whole units, e.g. `Money::from_units(3)` is `3.0`
    pub fn from_units(units: u64) -> Self {
        Self(u128::from(units) * SCALE)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Parse a base-10 decimal string
    pub fn from_decimal_str(s: &str) -> Result<Self, MoneyError> {
        format::parse_decimal(s)
    }

    /// Canonical decimal representation (trailing zeros trimmed)
    pub fn to_decimal_string(self) -> String {
        format::to_canonical(self)
    }

    /// Decimal representation with exactly `decimals` fractional digits, truncated
    pub fn to_fixed_string(self, decimals: u32) -> String {
        format::to_fixed(self, decimals)
    }

    pub fn checked_add(self, rhs: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(rhs.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Subtract, failing with [`MoneyError::Underflow`] below zero
    pub fn checked_sub(self, rhs: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(rhs.0)
            .map(Money)
            .ok_or(MoneyError::Underflow)
    }

    /// `self * rhs / SCALE`, truncated
    pub fn checked_mul(self, rhs: Money) -> Result<Money, MoneyError> {
        wide::mul_div_floor(self.0, rhs.0, SCALE).map(Money)
    }

    /// `self * SCALE / rhs`, truncated
    pub fn checked_div(self, rhs: Money) -> Result<Money, MoneyError> {
        if rhs.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        wide::mul_div_floor(self.0, SCALE, rhs.0).map(Money)
    }

    /// `self * bps / 10_000`, truncated
    pub fn mul_bps(self, bps: u128) -> Result<Money, MoneyError> {
        wide::mul_div_floor(self.0, bps, BPS_DENOMINATOR).map(Money)
    }

    /// `self * rhs * bps / 10_000`, truncated once at the end
    pub fn checked_mul_bps(self, rhs: Money, bps: u128) -> Result<Money, MoneyError> {
        wide::mul_mul_div_floor(self.0, rhs.0, bps, SCALE, BPS_DENOMINATOR).map(Money)
    }

    /// Sum of several amounts, failing on overflow
    pub fn checked_sum<I>(amounts: I) -> Result<Money, MoneyError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts
            .into_iter()
            .try_fold(Money::ZERO, |acc, m| acc.checked_add(m))
    }

    /// Exact conversion to a [`Decimal`]; fails above ~7.9e10 whole units
    pub fn to_decimal(self) -> Result<Decimal, MoneyError> {
        let raw = i128::try_from(self.0).map_err(|_| MoneyError::Overflow)?;
        Decimal::try_from_i128_with_scale(raw, DECIMALS).map_err(|_| MoneyError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_decimal_str(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Money::from_decimal_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn m(s: &str) -> Money {
        Money::from_decimal_str(s).unwrap()
    }

    #[test]
    fn test_round_trip_canonical() {
        let cases = [
            ("0", "0"),
            ("1", "1"),
            ("0.000025", "0.000025"),
            ("12.340000", "12.34"),
            ("0.000000000000000001", "0.000000000000000001"),
            ("000.5", "0.5"),
            ("123456789.123456789123456789", "123456789.123456789123456789"),
        ];
        for (input, expected) in cases {
            assert_eq!(m(input).to_decimal_string(), expected, "input {}", input);
        }
    }

    #[test]
    fn test_add_sub() {
        assert_eq!(m("1.5").checked_add(m("0.25")).unwrap(), m("1.75"));
        assert_eq!(m("1.5").checked_sub(m("0.25")).unwrap(), m("1.25"));
    }

    #[test]
    fn test_sub_underflow() {
        assert_eq!(m("1").checked_sub(m("1.000000000000000001")), Err(MoneyError::Underflow));
    }

    #[test]
    fn test_add_overflow() {
        let max = Money::from_raw(u128::MAX);
        assert_eq!(max.checked_add(Money::from_raw(1)), Err(MoneyError::Overflow));
    }

    #[test]
    fn test_mul() {
        assert_eq!(m("1.5").checked_mul(m("2")).unwrap(), m("3"));
        assert_eq!(m("0.000025").checked_mul(Money::ONE).unwrap(), m("0.000025"));
    }

    #[test]
    fn test_mul_truncates_toward_zero() {
        // 1e-18 * 0.5 = 5e-19 -> 0
        let tiny = Money::from_raw(1);
        assert_eq!(tiny.checked_mul(m("0.5")).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_mul_large_operands() {
        // 1e10 * 1e10 = 1e20; a * b raw product is 1e56, well past u128
        let a = m("10000000000");
        assert_eq!(a.checked_mul(a).unwrap(), m("100000000000000000000"));
    }

    #[test]
    fn test_div() {
        assert_eq!(m("3").checked_div(m("2")).unwrap(), m("1.5"));
        assert_eq!(m("1").checked_div(m("3")).unwrap(), m("0.333333333333333333"));
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(m("3").checked_div(Money::ZERO), Err(MoneyError::DivisionByZero));
    }

    #[test]
    fn test_mul_div_inverse_within_truncation() {
        let values = ["0.000025", "1", "7.123456789", "100000", "0.333333333333333333"];
        let divisors = ["1", "1.000000000000000001", "3", "12345.6789", "99999999"];
        for a in values {
            for b in divisors {
                let (a, b) = (m(a), m(b));
                let back = a.checked_mul(b).unwrap().checked_div(b).unwrap();
                let diff = a.raw().abs_diff(back.raw());
                assert!(diff <= 1, "a={} b={} back={}", a, b, back);
            }
        }
    }

    #[test]
    fn test_mul_div_inverse_below_one_within_one_unit() {
        // mul truncation is amplified by 1/b on the way back: at most ceil((SCALE - 1) / b.raw()) raw
        let values = ["0.000025", "1", "7.123456789", "100000", "0.333333333333333333"];
        let divisors = ["0.5", "0.000025", "0.999999999999999999", "0.000000000000000001"];
        for a in values {
            for b in divisors {
                let (a, b) = (m(a), m(b));
                let back = a.checked_mul(b).unwrap().checked_div(b).unwrap();
                let diff = a.raw().abs_diff(back.raw());
                assert!(diff <= SCALE, "a={} b={} back={}", a, b, back);
            }
        }
    }

    #[test]
    fn test_mul_bps() {
        // 10 bps of 2.0 = 0.002
        assert_eq!(m("2").mul_bps(10).unwrap(), m("0.002"));
    }

    #[test]
    fn test_checked_mul_bps_truncates_once() {
        // 0.5 * 6667 raw = 3333.5 raw; at 3 bps that is 1.00005 raw
        let half = m("0.5");
        let price = Money::from_raw(6_667);
        assert_eq!(half.checked_mul_bps(price, 3).unwrap(), Money::from_raw(1));
        assert_eq!(half.checked_mul(price).unwrap().mul_bps(3).unwrap(), Money::ZERO);

        assert_eq!(m("2").checked_mul_bps(m("0.000025"), 10).unwrap(), m("0.00000005"));
    }

    #[test]
    fn test_checked_sum() {
        let total = Money::checked_sum([m("0.1"), m("0.2"), m("0.3")]).unwrap();
        assert_eq!(total, m("0.6"));
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(m("0.000025").to_decimal().unwrap(), dec!(0.000025));
        assert_eq!(
            Money::from_raw(u128::MAX).to_decimal(),
            Err(MoneyError::Overflow)
        );
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&m("1.25")).unwrap();
        assert_eq!(json, "\"1.25\"");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m("1.25"));
        assert!(serde_json::from_str::<Money>("\"-1\"").is_err());
    }

    #[test]
    fn test_from_units() {
        assert_eq!(Money::from_units(3), m("3"));
    }
}
