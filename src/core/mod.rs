//! Ledger business logic - framework-agnostic person, debt, payment and totals operations.
//!
//! Every mutation is validated here before anything reaches [`crate::db`], so a rejected
//! request never leaves a partial write behind. Derived values (balances, totals) are never
//! cached: each query rebuilds them from the current rows.

pub mod debt;
pub mod export;
pub mod payment;
pub mod person;
pub mod seed;
pub mod totals;

use crate::{
    errors::{Error, Result},
    money::Money,
};

/// Parses a user-entered amount that must be strictly positive.
///
/// Empty, zero and negative inputs get distinct messages, prefixed with `subject`
/// (`"Debt"`, `"Payment"`). Extra fractional digits are rounded half away from zero
/// before the checks, so `"0.005"` is one cent and `"0.004"` counts as zero.
pub(crate) fn require_positive_amount(subject: &str, raw: &str) -> Result<Money> {
    if raw.trim().is_empty() {
        return Err(Error::validation(format!("{subject} amount is required")));
    }
    let amount = Money::parse(raw)?;
    if amount.is_zero() {
        return Err(Error::validation(format!(
            "{subject} amount must be greater than zero"
        )));
    }
    if amount.is_negative() {
        return Err(Error::validation(format!(
            "{subject} amount cannot be negative"
        )));
    }
    Ok(amount)
}

/// Trims optional free text, mapping blank input to `None`.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_require_positive_amount_messages() {
        let empty = require_positive_amount("Debt", "  ").unwrap_err();
        assert_eq!(empty.to_string(), "Debt amount is required");

        let zero = require_positive_amount("Debt", "0.00").unwrap_err();
        assert_eq!(zero.to_string(), "Debt amount must be greater than zero");

        let negative = require_positive_amount("Payment", "-5.00").unwrap_err();
        assert_eq!(negative.to_string(), "Payment amount cannot be negative");

        assert!(matches!(
            require_positive_amount("Payment", "five"),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_require_positive_amount_accepts_positive() -> Result<()> {
        assert_eq!(require_positive_amount("Debt", "12.5")?, Money::from_cents(1250));
        Ok(())
    }

    #[test]
    fn test_require_positive_amount_rounds_before_checking() -> Result<()> {
        assert_eq!(require_positive_amount("Payment", "0.005")?, Money::from_cents(1));
        assert_eq!(require_positive_amount("Payment", "19.994")?, Money::from_cents(1999));

        let rounded_to_zero = require_positive_amount("Payment", "0.004").unwrap_err();
        assert_eq!(
            rounded_to_zero.to_string(),
            "Payment amount must be greater than zero"
        );
        Ok(())
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  hi ".into())), Some("hi".into()));
        assert_eq!(normalize_optional(Some("   ".into())), None);
        assert_eq!(normalize_optional(None), None);
    }
}
