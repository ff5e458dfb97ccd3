//! Temporary-hire detection.
//!
//! An employee whose contract started in the exact month being calculated
//! receives a flat store-size bonus instead of a computed commission. The
//! override takes precedence over every other calculation rule.

use chrono::{Datelike, NaiveDate};

/// Returns true when the contract-start month equals the calculation month.
///
/// Only year and month are compared; the day of month is irrelevant.
///
/// # Examples
///
/// ```
/// use commission_engine::calculation::is_temporary_hire;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 6, 23).unwrap();
/// let month = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// assert!(is_temporary_hire(start, month));
/// ```
pub fn is_temporary_hire(contract_start: NaiveDate, calculation_month: NaiveDate) -> bool {
    contract_start.year() == calculation_month.year()
        && contract_start.month() == calculation_month.month()
}
