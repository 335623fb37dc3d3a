//! Rental fee computation
//!
//! A rental is charged per started day with a one-day minimum, so a return on
//! the rent date (or a return date before it) still costs one day.

use crate::types::parse_date;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Number of billable days and the resulting total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeQuote {
    pub days: i64,
    pub total: Decimal,
}

/// Billable days between two dates, never less than one
pub fn billable_days(rent_date: NaiveDate, return_date: NaiveDate) -> i64 {
    (return_date - rent_date).num_days().max(1)
}

/// Total fee for a rental period
///
/// Returns `None` if the total does not fit in a `Decimal`.
pub fn total_fee(
    rent_date: NaiveDate,
    return_date: NaiveDate,
    daily_rate: Decimal,
) -> Option<FeeQuote> {
    let days = billable_days(rent_date, return_date);
    let total = Decimal::from(days).checked_mul(daily_rate)?;
    Some(FeeQuote { days, total })
}

/// Live fee preview from raw date text
///
/// Returns `None` while either date is incomplete or malformed, or when the
/// total overflows; a preview is informational and never an error.
pub fn preview_fee(rent_date: &str, return_date: &str, daily_rate: Decimal) -> Option<FeeQuote> {
    let rent = parse_date("rent_date", rent_date).ok()?;
    let ret = parse_date("return_date", return_date).ok()?;
    total_fee(rent, ret, daily_rate)
}
