//! Date comparison helpers.
//!
//! There are two granularities here, and they are intentionally different:
//!
//! - [`is_same_date`] compares **calendar days** and ignores the time of day.
//! - [`is_date_before`], [`is_date_after`] and [`is_date_between`] compare
//!   **exact instants**. A caller that wants day granularity must pass values
//!   through [`normalize_date`] first.
//!
//! Range containment checks rely on the instant semantics, so do not change
//! the second group to compare days.

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, Utc};

/// Largest absolute epoch-millisecond value accepted as a timestamp
/// (100,000,000 days either side of the epoch).
pub const MAX_TIMESTAMP_MS: f64 = 8.64e15;

/// Returns `true` if both values fall on the same calendar day.
pub fn is_same_date(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Returns `true` if `a` is strictly earlier than `b`.
pub fn is_date_before(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a < b
}

/// Returns `true` if `a` is strictly later than `b`.
pub fn is_date_after(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a > b
}

/// Returns `true` if `date` lies in `[start, end]`, both ends inclusive.
pub fn is_date_between(date: &NaiveDateTime, start: &NaiveDateTime, end: &NaiveDateTime) -> bool {
    date >= start && date <= end
}

/// Truncates a value to midnight of its calendar day.
pub fn normalize_date(date: &NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

/// Boundary check for raw epoch-millisecond values.
///
/// Returns `false` for NaN, infinities and values outside the representable
/// range; everything else can be converted with [`date_from_timestamp`].
pub fn is_valid_timestamp(ms: f64) -> bool {
    ms.is_finite()
        && ms.abs() <= MAX_TIMESTAMP_MS
        && DateTime::<Utc>::from_timestamp_millis(ms.trunc() as i64).is_some()
}

/// Converts an epoch-millisecond value to local wall-clock time, or `None`
/// if [`is_valid_timestamp`] rejects it.
pub fn date_from_timestamp(ms: f64) -> Option<NaiveDateTime> {
    if !is_valid_timestamp(ms) {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms.trunc() as i64)
        .map(|utc| utc.with_timezone(&Local).naive_local())
}
