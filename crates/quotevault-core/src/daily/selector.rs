//! Deterministic quote-of-the-day selection.
//!
//! The featured index is a pure function of the calendar date and the
//! catalog size, so every call on the same day picks the same quote with
//! no persisted state.

use chrono::{Datelike, NaiveDate};

use crate::error::{CoreError, Result};

/// Numeric key for a calendar date: `year * 10000 + month * 100 + day`.
pub fn date_key(date: NaiveDate) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

/// Index of the featured quote for `date` in a catalog of `count` quotes.
///
/// The key-modulo-count mapping is not uniform over the catalog (small
/// remainders are slightly favored and nearby dates can collide). That
/// bias is accepted: this picks a presentation feature, not a
/// fairness-critical allocation, and changing the formula would change
/// which historical dates map to which quotes.
///
/// # Errors
/// Returns [`CoreError::NotAvailable`] when `count` is zero; callers must
/// leave prior widget/notification state untouched in that case.
pub fn quote_of_the_day_index(date: NaiveDate, count: usize) -> Result<usize> {
    if count == 0 {
        return Err(CoreError::NotAvailable("quote catalog is empty".into()));
    }
    Ok((date_key(date) % count as i64) as usize)
}
