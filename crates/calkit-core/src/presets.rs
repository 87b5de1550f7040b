//! Named quick-pick date ranges ("Last 7 Days", "This Month", ...).
//!
//! Rolling presets (today, yesterday, last N days, weeks) keep the clock's
//! time of day; calendar presets (months, year) span whole days from
//! midnight to midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clock::Clock;
use crate::date_math::{add_days, first_day_of_week, normalized_ymd};
use crate::range::DateRange;

/// A preset key that does not name any [`DatePreset`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown date preset: {0}")]
pub struct UnknownPreset(pub String);

/// Named ranges relative to today, e.g. `last7days` or `thisMonth`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatePreset {
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "yesterday")]
    Yesterday,
    #[serde(rename = "last7days")]
    Last7Days,
    #[serde(rename = "last30days")]
    Last30Days,
    #[serde(rename = "thisWeek")]
    ThisWeek,
    #[serde(rename = "lastWeek")]
    LastWeek,
    #[serde(rename = "thisMonth")]
    ThisMonth,
    #[serde(rename = "lastMonth")]
    LastMonth,
    #[serde(rename = "thisYear")]
    ThisYear,
}

impl DatePreset {
    /// Every preset, in display order.
    pub const ALL: [DatePreset; 9] = [
        DatePreset::Today,
        DatePreset::Yesterday,
        DatePreset::Last7Days,
        DatePreset::Last30Days,
        DatePreset::ThisWeek,
        DatePreset::LastWeek,
        DatePreset::ThisMonth,
        DatePreset::LastMonth,
        DatePreset::ThisYear,
    ];

    /// Stable identifier used in configuration and serialized data.
    pub fn key(self) -> &'static str {
        match self {
            DatePreset::Today => "today",
            DatePreset::Yesterday => "yesterday",
            DatePreset::Last7Days => "last7days",
            DatePreset::Last30Days => "last30days",
            DatePreset::ThisWeek => "thisWeek",
            DatePreset::LastWeek => "lastWeek",
            DatePreset::ThisMonth => "thisMonth",
            DatePreset::LastMonth => "lastMonth",
            DatePreset::ThisYear => "thisYear",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::Yesterday => "Yesterday",
            DatePreset::Last7Days => "Last 7 Days",
            DatePreset::Last30Days => "Last 30 Days",
            DatePreset::ThisWeek => "This Week",
            DatePreset::LastWeek => "Last Week",
            DatePreset::ThisMonth => "This Month",
            DatePreset::LastMonth => "Last Month",
            DatePreset::ThisYear => "This Year",
        }
    }

    /// Resolves the preset against the clock's current time.
    pub fn range(self, clock: &dyn Clock) -> DateRange {
        let now = clock.now();
        match self {
            DatePreset::Today => DateRange::single(now),
            DatePreset::Yesterday => DateRange::single(add_days(now, -1)),
            DatePreset::Last7Days => DateRange::new(add_days(now, -6), now),
            DatePreset::Last30Days => DateRange::new(add_days(now, -29), now),
            DatePreset::ThisWeek => {
                let start = first_day_of_week(now);
                DateRange::new(start, add_days(start, 6))
            }
            DatePreset::LastWeek => {
                let start = add_days(first_day_of_week(now), -7);
                DateRange::new(start, add_days(start, 6))
            }
            DatePreset::ThisMonth => month_span(now, 0),
            DatePreset::LastMonth => month_span(now, -1),
            DatePreset::ThisYear => {
                let start = NaiveDate::from_ymd_opt(now.year(), 1, 1);
                let end = NaiveDate::from_ymd_opt(now.year(), 12, 31);
                match (start, end) {
                    (Some(start), Some(end)) => DateRange::new(midnight(start), midnight(end)),
                    _ => DateRange::single(now),
                }
            }
        }
    }
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// First to last day of the month `offset` months from `now`, at midnight.
fn month_span(now: NaiveDateTime, offset: i64) -> DateRange {
    let month0 = i64::from(now.month0()) + offset;
    let first = normalized_ymd(now.year(), month0, 1);
    // Day 0 of the following month is the last day of this one.
    let last = normalized_ymd(now.year(), month0 + 1, 0);
    match (first, last) {
        (Some(first), Some(last)) => DateRange::new(midnight(first), midnight(last)),
        _ => DateRange::single(now),
    }
}

impl fmt::Display for DatePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DatePreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatePreset::ALL
            .into_iter()
            .find(|preset| preset.key() == s)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// Resolves a preset by key; `None` when the key is unknown.
pub fn preset_value(key: &str, clock: &dyn Clock) -> Option<DateRange> {
    key.parse::<DatePreset>().ok().map(|preset| preset.range(clock))
}
