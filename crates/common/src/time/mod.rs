//! Calendar time math
//!
//! Month-window helpers used by the rollup and report layers. Windows are
//! inclusive `(start, end)` calendar-date pairs; instant conversions treat
//! the end date as running to the end of its day.

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, NaiveTime, Utc};

/// First day of the calendar month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the calendar month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let first = month_start(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.checked_sub_days(Days::new(1)))
        .unwrap_or(date)
}

/// The inclusive `(start, end)` window of the month containing `date`
pub fn month_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (month_start(date), month_end(date))
}

/// The trailing `count` calendar-month windows ending with the month of
/// `as_of`, most recent first
pub fn trailing_month_windows(as_of: NaiveDate, count: u32) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::with_capacity(count as usize);
    let mut cursor = month_start(as_of);
    for _ in 0..count {
        windows.push((cursor, month_end(cursor)));
        match cursor.checked_sub_months(Months::new(1)) {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    windows
}

/// Full calendar-month windows touched by `[start, end]`, ascending.
///
/// Returns an empty vector when `start > end`.
pub fn month_windows_between(start: NaiveDate, end: NaiveDate) -> Vec<(NaiveDate, NaiveDate)> {
    let mut windows = Vec::new();
    let mut cursor = month_start(start);
    let last = month_start(end);
    while cursor <= last {
        windows.push((cursor, month_end(cursor)));
        match cursor.checked_add_months(Months::new(1)) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    windows
}

/// Number of calendar months touched by `[start, end]` (0 when inverted)
pub fn months_spanned(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }
    let years = end.year() - start.year();
    let months = i64::from(end.month()) - i64::from(start.month());
    (i64::from(years) * 12 + months + 1).max(0) as u32
}

/// Midnight UTC at the start of `date`
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC at the start of the day after `date`.
///
/// Converting an inclusive end date this way yields the half-open instant
/// window used by pacing.
pub fn day_end_exclusive(date: NaiveDate) -> DateTime<Utc> {
    let next = date.checked_add_days(Days::new(1)).unwrap_or(date);
    day_start(next)
}
