//! Date ranges and day counting.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// An inclusive range of instants with `start <= end`.
///
/// The ordering invariant is enforced at construction: [`DateRange::new`]
/// swaps its arguments when they arrive out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRange")]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

#[derive(Deserialize)]
struct RawRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl From<RawRange> for DateRange {
    fn from(raw: RawRange) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    /// Creates a range from two endpoints given in either order.
    pub fn new(a: NaiveDateTime, b: NaiveDateTime) -> Self {
        if b < a {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// A range covering a single instant.
    pub fn single(at: NaiveDateTime) -> Self {
        Self { start: at, end: at }
    }

    /// The earlier endpoint.
    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// The later endpoint, equal to `start` for a single instant.
    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Inclusive instant containment.
    pub fn contains(&self, date: &NaiveDateTime) -> bool {
        *date >= self.start && *date <= self.end
    }

    /// Whole days from the start day to the end day.
    pub fn day_span(&self) -> i64 {
        days_between(&self.start, &self.end)
    }

    /// Every calendar day covered by the range, as local midnights.
    pub fn dates(&self) -> Vec<NaiveDateTime> {
        date_range(&self.start, &self.end)
    }
}

/// Number of calendar days from `start` to `end`, ignoring time of day.
///
/// Negative when `end` falls on an earlier day than `start`.
pub fn days_between(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
    (end.date() - start.date()).num_days()
}

/// Every calendar day from `start` to `end` inclusive, as local midnights in
/// chronological order. Empty when `end` is earlier than `start`.
pub fn date_range(start: &NaiveDateTime, end: &NaiveDateTime) -> Vec<NaiveDateTime> {
    if end < start {
        return Vec::new();
    }
    start
        .date()
        .iter_days()
        .take_while(|day| *day <= end.date())
        .map(|day| day.and_time(NaiveTime::MIN))
        .collect()
}
