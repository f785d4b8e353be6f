//! Exact-precision money arithmetic.
//!
//! Amounts live inside the engine as [`Money`], a count of cents in an `i64`. Strings and
//! numeric literals only appear at the edges: parsing goes through [`rust_decimal::Decimal`]
//! at full precision and is rounded once, half away from zero, to two fractional digits.
//!
//! The free functions ([`add`], [`subtract`], [`less_than`], ...) are the string-level API used
//! by callers that hold amounts as decimal text. They accept anything implementing
//! [`IntoDecimal`] and always return canonical two-decimal strings.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const CENT_SCALE: u32 = 2;

/// A monetary value counted in cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Zero dollars.
    pub const ZERO: Self = Self(0);

    /// Creates a value from a cent count.
    #[must_use]
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the cent count.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Parses a decimal string such as `"12.50"`, rounding half away from zero to cents.
    pub fn parse(input: &str) -> Result<Self> {
        Self::from_decimal(parse_decimal(input)?)
    }

    /// Converts a full-precision decimal, rounding half away from zero to cents.
    pub fn from_decimal(value: Decimal) -> Result<Self> {
        let mut rounded = round_to_cents(value);
        rounded.rescale(CENT_SCALE);
        if rounded.scale() != CENT_SCALE {
            return Err(Error::ArithmeticOverflow);
        }
        i64::try_from(rounded.mantissa())
            .map(Self)
            .map_err(|_| Error::ArithmeticOverflow)
    }

    /// Returns the exact decimal value.
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, CENT_SCALE)
    }

    /// True iff the amount is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// True iff the amount is above zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// True iff the amount is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Magnitude of the amount.
    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Addition that reports overflow instead of wrapping.
    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Subtraction that reports overflow instead of wrapping.
    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Renders the amount for people: `$1,234.50`, optionally signed (`+$5.00`, `-$5.00`).
    ///
    /// Zero never carries a sign. Without `show_sign` only the magnitude is shown.
    #[must_use]
    pub fn format_for_display(self, options: DisplayOptions) -> String {
        let magnitude = self.0.unsigned_abs();
        let grouped = group_thousands(magnitude / 100);
        let sign = match (options.show_sign, self.0.signum()) {
            (true, 1) => "+",
            (true, -1) => "-",
            _ => "",
        };
        format!("{sign}${grouped}.{:02}", magnitude % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", magnitude / 100, magnitude % 100)
    }
}

impl FromStr for Money {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Money, E> {
        v.into_decimal()
            .and_then(Money::from_decimal)
            .map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Money, E> {
        Money::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Money, E> {
        v.into_decimal()
            .and_then(Money::from_decimal)
            .map_err(E::custom)
    }
}

/// Options for [`format_for_display`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Prefix `+` for positive and `-` for negative amounts
    pub show_sign: bool,
}

impl DisplayOptions {
    /// Options that show the sign of non-zero amounts.
    #[must_use]
    pub const fn signed() -> Self {
        Self { show_sign: true }
    }
}

/// Anything that can be normalized into an exact decimal amount.
pub trait IntoDecimal {
    /// Performs the conversion, failing with [`Error::InvalidAmount`] on non-numeric input.
    fn into_decimal(self) -> Result<Decimal>;
}

impl IntoDecimal for &str {
    fn into_decimal(self) -> Result<Decimal> {
        parse_decimal(self)
    }
}

impl IntoDecimal for &String {
    fn into_decimal(self) -> Result<Decimal> {
        parse_decimal(self)
    }
}

impl IntoDecimal for String {
    fn into_decimal(self) -> Result<Decimal> {
        parse_decimal(&self)
    }
}

impl IntoDecimal for Money {
    fn into_decimal(self) -> Result<Decimal> {
        Ok(self.to_decimal())
    }
}

impl IntoDecimal for Decimal {
    fn into_decimal(self) -> Result<Decimal> {
        Ok(self)
    }
}

impl IntoDecimal for i64 {
    fn into_decimal(self) -> Result<Decimal> {
        Ok(Decimal::from(self))
    }
}

impl IntoDecimal for i32 {
    fn into_decimal(self) -> Result<Decimal> {
        Ok(Decimal::from(self))
    }
}

impl IntoDecimal for f64 {
    /// Goes through the shortest decimal text of the float, so `0.1` becomes exactly `0.1`.
    fn into_decimal(self) -> Result<Decimal> {
        if !self.is_finite() {
            return Err(Error::InvalidAmount {
                input: self.to_string(),
            });
        }
        parse_decimal(&self.to_string())
    }
}

fn parse_decimal(input: &str) -> Result<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidAmount {
            input: input.to_string(),
        });
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| Error::InvalidAmount {
            input: input.to_string(),
        })
}

fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

fn to_fixed(value: Decimal) -> Result<String> {
    Money::from_decimal(value).map(|money| money.to_string())
}

fn group_thousands(mut whole: u64) -> String {
    let mut groups = Vec::new();
    while whole >= 1000 {
        groups.push(format!("{:03}", whole % 1000));
        whole /= 1000;
    }
    groups.push(whole.to_string());
    groups.reverse();
    groups.join(",")
}

/// `a + b`, rounded to cents.
pub fn add(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<String> {
    let sum = a
        .into_decimal()?
        .checked_add(b.into_decimal()?)
        .ok_or(Error::ArithmeticOverflow)?;
    to_fixed(sum)
}

/// `a - b`, rounded to cents.
pub fn subtract(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<String> {
    let difference = a
        .into_decimal()?
        .checked_sub(b.into_decimal()?)
        .ok_or(Error::ArithmeticOverflow)?;
    to_fixed(difference)
}

/// `a * b` at full precision, rounded to cents.
pub fn multiply(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<String> {
    let product = a
        .into_decimal()?
        .checked_mul(b.into_decimal()?)
        .ok_or(Error::ArithmeticOverflow)?;
    to_fixed(product)
}

/// `a / b` at full precision, rounded to cents.
pub fn divide(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<String> {
    let divisor = b.into_decimal()?;
    if divisor.is_zero() {
        return Err(Error::DivisionByZero);
    }
    let quotient = a
        .into_decimal()?
        .checked_div(divisor)
        .ok_or(Error::ArithmeticOverflow)?;
    to_fixed(quotient)
}

/// Exact `a < b`.
pub fn less_than(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<bool> {
    Ok(a.into_decimal()? < b.into_decimal()?)
}

/// Exact `a <= b`.
pub fn less_or_equal(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<bool> {
    Ok(a.into_decimal()? <= b.into_decimal()?)
}

/// Exact `a > b`.
pub fn greater_than(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<bool> {
    Ok(a.into_decimal()? > b.into_decimal()?)
}

/// Exact `a >= b`.
pub fn greater_or_equal(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<bool> {
    Ok(a.into_decimal()? >= b.into_decimal()?)
}

/// Exact `a == b`; `"1.5"` equals `"1.50"`.
pub fn equal(a: impl IntoDecimal, b: impl IntoDecimal) -> Result<bool> {
    Ok(a.into_decimal()? == b.into_decimal()?)
}

/// True iff the value is exactly zero.
pub fn is_zero(a: impl IntoDecimal) -> Result<bool> {
    Ok(a.into_decimal()?.is_zero())
}

/// Magnitude, rounded to cents.
pub fn absolute_value(a: impl IntoDecimal) -> Result<String> {
    to_fixed(a.into_decimal()?.abs())
}

/// Canonical two-decimal form of any numeric input (`"5"` becomes `"5.00"`).
pub fn to_cents_string(a: impl IntoDecimal) -> Result<String> {
    to_fixed(a.into_decimal()?)
}

/// `$`-prefixed, thousands-grouped, two-decimal rendering. See [`Money::format_for_display`].
pub fn format_for_display(amount: impl IntoDecimal, options: DisplayOptions) -> Result<String> {
    Money::from_decimal(amount.into_decimal()?).map(|money| money.format_for_display(options))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_has_no_float_artifacts() -> Result<()> {
        assert_eq!(add("0.10", "0.20")?, "0.30");
        assert_eq!(add("99.99", "0.01")?, "100.00");
        assert_eq!(add(0.1, 0.2)?, "0.30");
        assert_eq!(add("1", 2)?, "3.00");
        Ok(())
    }

    #[test]
    fn test_subtract_exact_and_signed() -> Result<()> {
        assert_eq!(subtract("100.00", "99.99")?, "0.01");
        assert_eq!(subtract("0.30", "0.10")?, "0.20");
        assert_eq!(subtract("5", "7.25")?, "-2.25");
        Ok(())
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() -> Result<()> {
        assert_eq!(to_cents_string("1.005")?, "1.01");
        assert_eq!(to_cents_string("1.004")?, "1.00");
        assert_eq!(to_cents_string("2.125")?, "2.13");
        assert_eq!(to_cents_string("-1.005")?, "-1.01");
        Ok(())
    }

    #[test]
    fn test_multiply_and_divide_use_full_precision() -> Result<()> {
        assert_eq!(multiply("10.00", "0.333")?, "3.33");
        assert_eq!(multiply("0.005", "3")?, "0.02");
        assert_eq!(divide("10", "3")?, "3.33");
        assert_eq!(divide("2", "3")?, "0.67");
        assert!(matches!(divide("1", "0.00"), Err(Error::DivisionByZero)));
        Ok(())
    }

    #[test]
    fn test_comparisons_are_exact() -> Result<()> {
        assert!(less_than("0.01", "0.02")?);
        assert!(less_or_equal("0.01", "0.010")?);
        assert!(greater_than("100", "99.999")?);
        assert!(greater_or_equal("5.00", 5)?);
        assert!(equal("1.5", "1.50")?);
        assert!(!equal("0.001", "0")?);
        assert!(is_zero("0.00")?);
        assert!(is_zero("-0")?);
        assert!(!is_zero("0.001")?);
        Ok(())
    }

    #[test]
    fn test_absolute_value_and_normalization() -> Result<()> {
        assert_eq!(absolute_value("-12.5")?, "12.50");
        assert_eq!(to_cents_string("5")?, "5.00");
        assert_eq!(to_cents_string("  7.1 ")?, "7.10");
        assert_eq!(to_cents_string(dec!(3.14159))?, "3.14");
        Ok(())
    }

    #[test]
    fn test_format_for_display() -> Result<()> {
        assert_eq!(
            format_for_display("1234567.5", DisplayOptions::default())?,
            "$1,234,567.50"
        );
        assert_eq!(
            format_for_display("1234.5", DisplayOptions::signed())?,
            "+$1,234.50"
        );
        assert_eq!(format_for_display("-5", DisplayOptions::signed())?, "-$5.00");
        assert_eq!(format_for_display("-5", DisplayOptions::default())?, "$5.00");
        assert_eq!(format_for_display("0", DisplayOptions::signed())?, "$0.00");
        assert_eq!(format_for_display("999.99", DisplayOptions::default())?, "$999.99");
        assert_eq!(format_for_display("1000", DisplayOptions::default())?, "$1,000.00");
        Ok(())
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        assert!(matches!(add("abc", "1"), Err(Error::InvalidAmount { .. })));
        assert!(matches!(Money::parse(""), Err(Error::InvalidAmount { .. })));
        assert!(matches!(Money::parse("12.3.4"), Err(Error::InvalidAmount { .. })));
        assert!(matches!(is_zero(f64::NAN), Err(Error::InvalidAmount { .. })));
    }

    #[test]
    fn test_money_parse_and_display() -> Result<()> {
        assert_eq!(Money::parse("12.5")?.cents(), 1250);
        assert_eq!(Money::parse("-0.01")?.cents(), -1);
        assert_eq!(Money::from_cents(-300).to_string(), "-3.00");
        assert_eq!(Money::from_cents(7).to_string(), "0.07");
        assert_eq!(Money::ZERO.to_string(), "0.00");
        assert_eq!("42".parse::<Money>()?, Money::from_cents(4200));
        Ok(())
    }

    #[test]
    fn test_money_arithmetic_reports_overflow() -> Result<()> {
        let total = Money::from_cents(5000).checked_add(Money::from_cents(3000))?;
        assert_eq!(total, Money::from_cents(8000));
        assert_eq!(total.checked_sub(Money::from_cents(8000))?, Money::ZERO);
        assert_eq!(Money::ZERO.checked_sub(total)?, Money::from_cents(-8000));
        assert_eq!(Money::from_cents(-8000).abs(), total);

        assert!(matches!(
            Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)),
            Err(Error::ArithmeticOverflow)
        ));
        assert!(matches!(
            Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)),
            Err(Error::ArithmeticOverflow)
        ));
        Ok(())
    }

    #[test]
    fn test_money_out_of_range_is_overflow() {
        assert!(matches!(
            Money::parse("99999999999999999999999"),
            Err(Error::ArithmeticOverflow)
        ));
    }

    #[test]
    fn test_money_serde_uses_strings() {
        let json = serde_json::to_string(&Money::from_cents(1250)).unwrap();
        assert_eq!(json, "\"12.50\"");
        let from_string: Money = serde_json::from_str("\"7\"").unwrap();
        assert_eq!(from_string, Money::from_cents(700));
        let from_number: Money = serde_json::from_str("12.5").unwrap();
        assert_eq!(from_number, Money::from_cents(1250));
        let from_integer: Money = serde_json::from_str("3").unwrap();
        assert_eq!(from_integer, Money::from_cents(300));
    }
}
