//! Locale-aware numeric normalization.
//!
//! Upstream spreadsheets mix European comma-decimal notation with US
//! dot-decimal notation, sometimes with thousands separators. This module
//! turns such strings into exact [`Decimal`] values.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// Parses a locale-ambiguous numeric string into an exact decimal.
///
/// The interpretation rules, in order:
///
/// 1. Both comma and dot present: the comma is the decimal separator and
///    dots are thousands separators (`"34.287,23"` → `34287.23`).
/// 2. Only a comma: it is the decimal separator (`"120,5"` → `120.5`).
/// 3. Only dots: if the string matches a thousands-grouping pattern
///    (1-3 digits followed by groups of exactly three digits each preceded
///    by a dot), dots are thousands separators and the value is an integer
///    (`"34.287"` → `34287`); otherwise the dot is a decimal point
///    (`"34.28"` → `34.28`).
/// 4. A plain digit string parses as-is. Empty or blank input yields 0.
///
/// Anything else fails with [`EngineError::NumericParse`] rather than
/// flowing a sentinel value into downstream arithmetic.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::parse_locale_number;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(
///     parse_locale_number("34.287,23").unwrap(),
///     Decimal::from_str("34287.23").unwrap()
/// );
/// assert_eq!(parse_locale_number("1.500").unwrap(), Decimal::from(1500));
/// assert_eq!(
///     parse_locale_number("34.28").unwrap(),
///     Decimal::from_str("34.28").unwrap()
/// );
/// assert_eq!(parse_locale_number("").unwrap(), Decimal::ZERO);
/// ```
pub fn parse_locale_number(raw: &str) -> EngineResult<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let has_comma = trimmed.contains(',');
    let has_dot = trimmed.contains('.');

    let canonical = if has_comma && has_dot {
        // European: dots group thousands, comma separates decimals.
        trimmed.replace('.', "").replace(',', ".")
    } else if has_comma {
        trimmed.replace(',', ".")
    } else if has_dot {
        if is_thousands_grouped(trimmed) {
            trimmed.replace('.', "")
        } else {
            trimmed.to_string()
        }
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&canonical).map_err(|_| EngineError::NumericParse {
        value: raw.to_string(),
    })
}

/// Returns true when the string is 1-3 digits followed by one or more
/// dot-prefixed groups of exactly three digits, with an optional sign.
fn is_thousands_grouped(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let mut parts = digits.split('.');

    let head = match parts.next() {
        Some(head) => head,
        None => return false,
    };
    if head.is_empty() || head.len() > 3 || !head.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let mut groups = 0;
    for group in parts {
        if group.len() != 3 || !group.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        groups += 1;
    }
    groups > 0
}
