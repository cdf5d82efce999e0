//! Lenient parsing of user-typed numbers.
//!
//! A calculator should never refuse to calculate, so blank or unparsable
//! values become zero instead of errors. These functions are used as clap
//! value parsers and therefore return `Result`, but never `Err`.

use rust_decimal::Decimal;
use std::convert::Infallible;
use std::str::FromStr;

/// Parses a decimal amount, mapping blank or invalid text to zero.
///
/// Accepts plain and scientific notation (`1.5e3`).
pub fn parse_amount(raw: &str) -> Result<Decimal, Infallible> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Ok(Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .unwrap_or_else(|_| {
            log::warn!("could not parse {raw:?} as a number, using 0");
            Decimal::ZERO
        }))
}

/// Parses a whole number of days, mapping blank, invalid or negative text
/// to zero. Fractions are truncated.
pub fn parse_days(raw: &str) -> Result<u32, Infallible> {
    let amount = parse_amount(raw)?;
    Ok(amount.trunc().try_into().unwrap_or(0))
}
