//! Two-tap date range selection.
//!
//! The selection moves through three modes:
//!
//! ```text
//!   Start --tap--> End --tap (duration ok)--> Complete
//!                   ^  \
//!                   |   tap (duration out of bounds): the tap becomes the new first endpoint
//!                   +---/
//! Complete --tap--> End
//! ```
//!
//! [`RangeCalendar::set_range`] jumps straight to `Complete` and
//! [`RangeCalendar::clear_range`] returns to `Start`.

use calkit_core::clock::{SharedClock, system_clock};
use calkit_core::compare::{is_date_after, is_date_before, is_same_date};
use calkit_core::grid::{CalendarDay, YearMonth};
use calkit_core::range::DateRange;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SelectError, SelectResult};
use crate::listener::Listeners;
use crate::navigator::{MonthNavigator, initial_position};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Where a range selection currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeSelectionMode {
    /// Waiting for the first endpoint.
    Start,
    /// First endpoint held, waiting for the second.
    End,
    /// A range is committed.
    Complete,
}

/// Options for [`RangeCalendar`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeOptions {
    pub initial_year: Option<i32>,
    /// Zero-based.
    pub initial_month: Option<u32>,
    pub initial_range: Option<DateRange>,
    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    /// Shortest accepted range, in days rounded up.
    pub min_range_duration: Option<i64>,
    /// Longest accepted range, in days rounded up.
    pub max_range_duration: Option<i64>,
}

impl RangeOptions {
    #[must_use]
    pub fn with_initial_month(mut self, year: i32, month: u32) -> Self {
        self.initial_year = Some(year);
        self.initial_month = Some(month);
        self
    }

    #[must_use]
    pub fn with_durations(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        self.min_range_duration = min;
        self.max_range_duration = max;
        self
    }

    /// Rejects inverted bounds and negative duration limits.
    pub fn validate(&self) -> SelectResult<()> {
        if let (Some(min), Some(max)) = (self.min_date, self.max_date)
            && min > max
        {
            return Err(SelectError::invalid_options(format!(
                "min_date {min} is after max_date {max}"
            )));
        }
        for (name, value) in [
            ("min_range_duration", self.min_range_duration),
            ("max_range_duration", self.max_range_duration),
        ] {
            if let Some(days) = value
                && days < 0
            {
                return Err(SelectError::invalid_options(format!("{name} must not be negative, got {days}")));
            }
        }
        if let (Some(min), Some(max)) = (self.min_range_duration, self.max_range_duration)
            && min > max
        {
            return Err(SelectError::invalid_options(format!(
                "min_range_duration {min} exceeds max_range_duration {max}"
            )));
        }
        Ok(())
    }
}

/// Length of a range in days, rounding any partial day up.
fn duration_days(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
    let millis = (*end - *start).num_milliseconds();
    (millis + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
}

/// A month view for picking a start and an end date.
#[derive(Debug)]
pub struct RangeCalendar {
    navigator: MonthNavigator,
    selected: Option<DateRange>,
    temp_start: Option<NaiveDateTime>,
    min_date: Option<NaiveDateTime>,
    max_date: Option<NaiveDateTime>,
    min_range_duration: Option<i64>,
    max_range_duration: Option<i64>,
    clock: SharedClock,
    range_listeners: Listeners<DateRange>,
}

impl RangeCalendar {
    pub fn new(options: RangeOptions) -> SelectResult<Self> {
        Self::with_clock(options, system_clock())
    }

    pub fn with_clock(options: RangeOptions, clock: SharedClock) -> SelectResult<Self> {
        options.validate()?;
        let position = initial_position(options.initial_year, options.initial_month, clock.as_ref());
        Ok(Self {
            navigator: MonthNavigator::new(position),
            selected: options.initial_range,
            temp_start: None,
            min_date: options.min_date,
            max_date: options.max_date,
            min_range_duration: options.min_range_duration,
            max_range_duration: options.max_range_duration,
            clock,
            range_listeners: Listeners::new(),
        })
    }

    pub fn year(&self) -> i32 {
        self.navigator.year()
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.navigator.month()
    }

    pub fn days(&self) -> &[CalendarDay] {
        self.navigator.days()
    }

    /// The committed range, if any.
    pub fn selected_range(&self) -> Option<DateRange> {
        self.selected
    }

    /// The first endpoint of a range still being picked.
    pub fn temp_start(&self) -> Option<NaiveDateTime> {
        self.temp_start
    }

    pub fn selection_mode(&self) -> RangeSelectionMode {
        if self.selected.is_some() {
            RangeSelectionMode::Complete
        } else if self.temp_start.is_some() {
            RangeSelectionMode::End
        } else {
            RangeSelectionMode::Start
        }
    }

    /// Handles a tap on `date`.
    pub fn select_date(&mut self, date: NaiveDateTime) {
        if self.min_date.is_some_and(|min| is_date_before(&date, &min))
            || self.max_date.is_some_and(|max| is_date_after(&date, &max))
        {
            trace!(date = %date, "ignoring out-of-bounds tap");
            return;
        }

        let Some(first) = self.temp_start else {
            debug!(date = %date, "range start picked");
            self.temp_start = Some(date);
            self.selected = None;
            return;
        };

        let range = DateRange::new(first, date);
        let duration = duration_days(&range.start(), &range.end());
        let too_short = self.min_range_duration.is_some_and(|min| duration < min);
        let too_long = self.max_range_duration.is_some_and(|max| duration > max);
        if too_short || too_long {
            debug!(date = %date, duration, "range rejected, restarting from tap");
            self.temp_start = Some(date);
            return;
        }

        self.commit(range);
    }

    /// Commits `range` directly, discarding any pending first endpoint.
    pub fn set_range(&mut self, range: DateRange) {
        self.commit(range);
    }

    /// Drops both the committed range and any pending endpoint.
    pub fn clear_range(&mut self) {
        self.selected = None;
        self.temp_start = None;
    }

    fn commit(&mut self, range: DateRange) {
        debug!(start = %range.start(), end = %range.end(), "range selected");
        self.selected = Some(range);
        self.temp_start = None;
        self.range_listeners.emit(&range);
    }

    /// Instant containment in the committed range. The pending endpoint does
    /// not count.
    pub fn is_date_in_range(&self, date: &NaiveDateTime) -> bool {
        self.selected.is_some_and(|range| range.contains(date))
    }

    pub fn is_range_start(&self, date: &NaiveDateTime) -> bool {
        self.selected.is_some_and(|range| is_same_date(&range.start(), date))
    }

    pub fn is_range_end(&self, date: &NaiveDateTime) -> bool {
        self.selected.is_some_and(|range| is_same_date(&range.end(), date))
    }

    /// True for the first tap of a range still waiting for its second.
    pub fn is_temp_start(&self, date: &NaiveDateTime) -> bool {
        self.temp_start.is_some_and(|start| is_same_date(&start, date))
    }

    pub fn is_today(&self, date: &NaiveDateTime) -> bool {
        date.date() == self.clock.today()
    }

    pub fn previous_month(&mut self) {
        self.navigator.previous_month();
    }

    pub fn next_month(&mut self) {
        self.navigator.next_month();
    }

    pub fn go_to_month(&mut self, year: i32, month: i32) {
        self.navigator.go_to_month(year, month);
    }

    /// Shows the current month. The selection is left alone.
    pub fn go_to_today(&mut self) {
        let today = self.clock.today();
        self.navigator.go_to(YearMonth::from(&today));
    }

    pub fn on_month_change(&mut self, callback: impl FnMut(&YearMonth) + 'static) {
        self.navigator.on_month_change(callback);
    }

    pub fn on_range_select(&mut self, callback: impl FnMut(&DateRange) + 'static) {
        self.range_listeners.push(callback);
    }
}
