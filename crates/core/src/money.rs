//! Money parsing, rounding, and display.
//!
//! Amounts are carried as [`rust_decimal::Decimal`] so intermediate
//! arithmetic stays exact; rounding to two places happens once, at a final
//! total. The wire format for every amount is a plain decimal string
//! (`"30.00"`), which is also how [`Decimal`] serializes.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use thiserror::Error;

/// Errors raised while validating a decimal-string amount at the boundary.
#[derive(Debug, Error)]
pub enum AmountError {
    /// The input was not a parseable decimal number.
    #[error("not a decimal amount")]
    Unparseable(#[from] rust_decimal::Error),

    /// Monetary amounts are never negative in this system.
    #[error("amount must not be negative")]
    Negative,

    /// More than two fractional digits were supplied.
    #[error("amount carries more than two decimal places")]
    TooPrecise,
}

/// Parses a decimal-string amount (`"30.00"`, `"9.9"`, `"120"`).
///
/// Input is trimmed first. Amounts must be non-negative and carry at most
/// two fractional digits.
///
/// # Errors
///
/// - [`AmountError::Unparseable`]: the string is not a decimal number.
/// - [`AmountError::Negative`]: the amount is below zero.
/// - [`AmountError::TooPrecise`]: more than two decimal places.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountError> {
    let value: Decimal = raw.trim().parse()?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountError::Negative);
    }

    if value.scale() > 2 {
        return Err(AmountError::TooPrecise);
    }

    Ok(value)
}

/// Rounds a final total to two places, midpoint away from zero.
///
/// Applied only at the end of a calculation; per-line values are kept exact
/// so rounding error cannot compound across items.
#[must_use]
pub fn round_total(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount for human-facing output in Brazilian reais.
#[must_use]
pub fn format_brl(value: Decimal) -> String {
    let minor = (value * Decimal::ONE_HUNDRED).round();

    match minor.to_i64() {
        Some(minor) => Money::from_minor(minor, iso::BRL).to_string(),
        // Out of i64 minor-unit range.
        None => format!("R$ {value}"),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_two_place_amount() -> TestResult {
        assert_eq!(parse_amount("30.00")?, Decimal::new(3000, 2));

        Ok(())
    }

    #[test]
    fn parses_whole_and_single_place_amounts() -> TestResult {
        assert_eq!(parse_amount("120")?, Decimal::new(120, 0));
        assert_eq!(parse_amount("9.9")?, Decimal::new(99, 1));

        Ok(())
    }

    #[test]
    fn trims_surrounding_whitespace() -> TestResult {
        assert_eq!(parse_amount("  15.00 ")?, Decimal::new(1500, 2));

        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_amount("thirty"),
            Err(AmountError::Unparseable(_))
        ));
    }

    #[test]
    fn rejects_negative_amounts() {
        assert!(matches!(parse_amount("-1.00"), Err(AmountError::Negative)));
    }

    #[test]
    fn rejects_sub_cent_precision() {
        assert!(matches!(parse_amount("1.005"), Err(AmountError::TooPrecise)));
    }

    #[test]
    fn rounds_midpoint_away_from_zero() {
        assert_eq!(round_total(Decimal::new(10005, 3)), Decimal::new(1001, 2));
    }

    #[test]
    fn formats_with_currency_symbol() {
        let formatted = format_brl(Decimal::new(123_456, 2));

        assert!(
            formatted.starts_with("R$"),
            "expected BRL symbol, got {formatted}"
        );
    }
}
