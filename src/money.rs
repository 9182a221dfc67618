//! Monetary helpers shared by the calculators and the report.
//!
//! Amounts are carried as [`Decimal`] everywhere.  Rounding to cents is
//! only done where a rule demands it (the weekly SSC figure) and when an
//! amount is shown to a person.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::debug;

/// Rounds a decimal value to exactly two decimal places, half away from zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use malta_wage::money::round_half_up;
///
/// assert_eq!(round_half_up(dec!(46.154)), dec!(46.15));
/// assert_eq!(round_half_up(dec!(46.155)), dec!(46.16));
/// assert_eq!(round_half_up(dec!(-46.155)), dec!(-46.16));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as euros with a thousands separator, e.g. `€1,633.35`.
///
/// Negative amounts keep the sign in front of the currency symbol.
pub fn format_eur(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}€{grouped}.{cents}")
}

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid decimal '{input}': {source}")]
pub struct ParseDecimalError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Strips what people type around a number: surrounding whitespace, a
/// euro sign after the optional minus, and thousands separators.
fn normalize_amount(s: &str) -> String {
    let s = s.trim();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest.trim_start()),
        None => ("", s),
    };
    let rest = rest.strip_prefix('€').unwrap_or(rest);

    let mut amount = String::with_capacity(sign.len() + rest.len());
    amount.push_str(sign);
    amount.extend(rest.chars().filter(|c| *c != ',' && !c.is_whitespace()));
    amount
}

/// Parses an amount the way it is typed or printed.
///
/// Accepts everything [`format_eur`] produces (`"€2,000.50"`,
/// `"-€1,250.50"`) as well as bare numbers.  Blank input is zero.
pub fn parse_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let amount = normalize_amount(s);
    if amount.is_empty() || amount == "-" {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&amount).map_err(|source| {
        debug!(input = %s, %source, "amount is not a number");
        ParseDecimalError {
            input: s.to_string(),
            source,
        }
    })
}
