//! Calendar helpers for date-bounded fixtures and queries.

use chrono::{Datelike, Days, NaiveDate};

use crate::fixtures::generator::today;

/// Returns `(end - days_back, end)`.
///
/// Saturates at the earliest representable date.
#[must_use]
pub fn date_range_back(end: NaiveDate, days_back: u32) -> (NaiveDate, NaiveDate) {
    let start = end
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN);
    (start, end)
}

/// Returns the range covering the last `days_back` days up to today.
#[must_use]
pub fn date_range_ending_today(days_back: u32) -> (NaiveDate, NaiveDate) {
    date_range_back(today(), days_back)
}

/// The date `days` days before today.
#[must_use]
pub fn days_ago(days: u32) -> NaiveDate {
    date_range_ending_today(days).0
}

/// First day of the month containing `date`.
#[must_use]
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day0(0).unwrap_or(date)
}
