//! Month grid generation.
//!
//! A month is always rendered as 6 rows of 7 days (42 cells), starting on
//! Sunday: the trailing days of the previous month, every day of the month
//! itself, then the leading days of the next month. Consumers can therefore
//! lay out a fixed-height grid without recomputing anything on navigation.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Weekday};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::date_math::days_in_month;

/// Days per grid row.
pub const DAYS_PER_WEEK: usize = 7;

/// Rows per month grid.
pub const GRID_WEEKS: usize = 6;

/// Cells per month grid.
pub const GRID_CELLS: usize = DAYS_PER_WEEK * GRID_WEEKS;

/// A year and a zero-based month (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    /// Creates a position, rolling an out-of-range month into the
    /// neighbouring years (`(2024, 12)` is January 2025, `(2024, -1)` is
    /// December 2023).
    pub fn normalized(year: i32, month: i64) -> Self {
        let total = i64::from(year) * 12 + month;
        Self {
            year: total.div_euclid(12) as i32,
            month: total.rem_euclid(12) as u32,
        }
    }

    /// Returns the position `months` months away.
    pub fn offset(self, months: i64) -> Self {
        Self::normalized(self.year, i64::from(self.month) + months)
    }

    /// The following month.
    pub fn next(self) -> Self {
        self.offset(1)
    }

    /// The preceding month.
    pub fn previous(self) -> Self {
        self.offset(-1)
    }

    /// Number of days in this month.
    pub fn day_count(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// The first day of this month, if representable.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
    }
}

impl<D: Datelike> From<&D> for YearMonth {
    fn from(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month0(),
        }
    }
}

/// One cell of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    /// Day of the month (1-31).
    pub date: u32,
    /// Zero-based month of this cell (0-11).
    pub month: u32,
    pub year: i32,
    /// `false` for padding cells borrowed from the neighbouring months.
    pub is_current_month: bool,
    /// Epoch milliseconds of local midnight for this day.
    pub timestamp: i64,
}

impl CalendarDay {
    /// The calendar day this cell stands for.
    pub fn naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, self.date)
    }

    /// The month this cell belongs to.
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

/// A month grid together with the month it shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// Zero-based month (0-11).
    pub month: u32,
    /// Always [`GRID_CELLS`] entries.
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// The month shown by this grid.
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }

    /// Iterates over the grid one week row at a time.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }
}

/// Epoch milliseconds of local midnight on `date` in `tz`.
///
/// When midnight does not exist (a daylight-saving gap), the first instant
/// after the gap is used.
pub fn local_midnight_millis<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .map_or_else(
            || midnight.and_utc().timestamp_millis(),
            |dt| dt.timestamp_millis(),
        )
}

fn cell<Tz: TimeZone>(position: YearMonth, date: u32, is_current_month: bool, tz: &Tz) -> CalendarDay {
    let timestamp = NaiveDate::from_ymd_opt(position.year, position.month + 1, date)
        .map_or(0, |day| local_midnight_millis(day, tz));
    CalendarDay {
        date,
        month: position.month,
        year: position.year,
        is_current_month,
        timestamp,
    }
}

/// Builds the 42-cell grid for a month, with timestamps in the local time zone.
///
/// `month` is zero-based; out-of-range values roll over into neighbouring years.
pub fn calendar_days(year: i32, month: i32) -> Vec<CalendarDay> {
    calendar_days_in(year, month, &Local)
}

/// Builds the 42-cell grid for a month, with timestamps computed in `tz`.
pub fn calendar_days_in<Tz: TimeZone>(year: i32, month: i32, tz: &Tz) -> Vec<CalendarDay> {
    let current = YearMonth::normalized(year, i64::from(month));
    let leading = current
        .first_day()
        .map_or(0, |first| first.weekday().num_days_from_sunday());

    let mut days = Vec::with_capacity(GRID_CELLS);

    let previous = current.previous();
    let previous_len = previous.day_count();
    for offset in (0..leading).rev() {
        days.push(cell(previous, previous_len - offset, false, tz));
    }

    for date in 1..=current.day_count() {
        days.push(cell(current, date, true, tz));
    }

    let next = current.next();
    let trailing = GRID_CELLS - days.len();
    for date in 1..=trailing as u32 {
        days.push(cell(next, date, false, tz));
    }

    trace!(
        year = current.year,
        month = current.month,
        leading,
        trailing,
        "generated month grid"
    );
    days
}

/// Builds `count` consecutive month grids starting at `(start_year, start_month)`.
pub fn calendar_months(start_year: i32, start_month: i32, count: usize) -> Vec<CalendarMonth> {
    calendar_months_in(start_year, start_month, count, &Local)
}

/// Like [`calendar_months`], with timestamps computed in `tz`.
pub fn calendar_months_in<Tz: TimeZone>(
    start_year: i32,
    start_month: i32,
    count: usize,
    tz: &Tz,
) -> Vec<CalendarMonth> {
    let mut position = YearMonth::normalized(start_year, i64::from(start_month));
    let mut months = Vec::with_capacity(count);
    for _ in 0..count {
        months.push(CalendarMonth {
            year: position.year,
            month: position.month,
            days: calendar_days_in(position.year, position.month as i32, tz),
        });
        position = position.next();
    }
    months
}

/// Rotates every week row so that `first_day` becomes column 0.
///
/// This is a cyclic permutation inside each row; the set of days in a row
/// does not change.
pub fn rotate_week_start(days: &[CalendarDay], first_day: Weekday) -> Vec<CalendarDay> {
    let shift = first_day.num_days_from_sunday() as usize;
    if shift == 0 {
        return days.to_vec();
    }
    days.chunks(DAYS_PER_WEEK)
        .flat_map(|row| (0..row.len()).map(move |col| row[(col + shift) % row.len()]))
        .collect()
}
