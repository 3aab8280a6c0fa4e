//! Date anchors and day windows over a record set.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ReportError, Result};
use crate::record::SaleRecord;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Latest transaction timestamp, `None` for an empty record set.
pub fn latest_date(records: &[SaleRecord]) -> Option<NaiveDateTime> {
    records.iter().map(|r| r.date).max()
}

/// Earliest transaction timestamp, `None` for an empty record set.
pub fn earliest_date(records: &[SaleRecord]) -> Option<NaiveDateTime> {
    records.iter().map(|r| r.date).min()
}

/// Whole days covered from `earliest` through the end of `latest`'s day,
/// a partial first day counting as a full one.
pub fn covered_days(earliest: NaiveDateTime, latest: NaiveDateTime) -> i64 {
    let end_of_day = latest.date().and_time(end_of_day_time());
    let seconds = (end_of_day - earliest).num_seconds();
    (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY)
}

/// Fail with `InsufficientData` when the records cover fewer than `min_days`.
pub fn validate_range(earliest: NaiveDateTime, latest: NaiveDateTime, min_days: i64) -> Result<i64> {
    let days = covered_days(earliest, latest);
    if days < min_days {
        return Err(ReportError::InsufficientData {
            earliest: earliest.date(),
            latest: latest.date(),
            days,
            required: min_days,
        });
    }
    tracing::info!(
        earliest = %earliest.date(),
        latest = %latest.date(),
        days,
        "date range validated"
    );
    Ok(days)
}

/// `len` consecutive days ending at `anchor`, newest first.
pub fn trailing_days(anchor: NaiveDate, len: u64) -> Vec<NaiveDate> {
    (0..len)
        .filter_map(|offset| anchor.checked_sub_days(Days::new(offset)))
        .collect()
}

/// Every calendar day from `first` to `last` inclusive, ascending.
pub fn day_span(first: NaiveDate, last: NaiveDate) -> Vec<NaiveDate> {
    first.iter_days().take_while(|day| *day <= last).collect()
}

fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}
