//! A growable window of consecutive month grids for scrolling lists.

use calkit_core::clock::{SharedClock, system_clock};
use calkit_core::grid::{CalendarMonth, YearMonth, calendar_months};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listener::Listeners;
use crate::navigator::initial_position;

/// Months loaded by [`InfiniteCalendar::load_more`].
pub const DEFAULT_BATCH_SIZE: usize = 6;
/// Months in a freshly built window.
pub const DEFAULT_INITIAL_MONTHS: usize = 12;

/// Which end of the list a batch is loaded onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    Past,
    Future,
}

/// Options for [`InfiniteCalendar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfiniteOptions {
    pub initial_year: Option<i32>,
    /// Zero-based.
    pub initial_month: Option<u32>,
    pub initial_months_to_load: usize,
    pub batch_size: usize,
}

impl Default for InfiniteOptions {
    fn default() -> Self {
        Self {
            initial_year: None,
            initial_month: None,
            initial_months_to_load: DEFAULT_INITIAL_MONTHS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl InfiniteOptions {
    #[must_use]
    pub fn with_initial_month(mut self, year: i32, month: u32) -> Self {
        self.initial_year = Some(year);
        self.initial_month = Some(month);
        self
    }

    #[must_use]
    pub fn with_months_to_load(mut self, count: usize) -> Self {
        self.initial_months_to_load = count;
        self
    }
}

/// Months from `start` onward, `months.len()` long.
#[derive(Debug)]
pub struct InfiniteCalendar {
    start: YearMonth,
    months: Vec<CalendarMonth>,
    initial_start: YearMonth,
    initial_count: usize,
    batch_size: usize,
    listeners: Listeners<YearMonth>,
}

impl InfiniteCalendar {
    pub fn new(options: InfiniteOptions) -> Self {
        Self::with_clock(options, system_clock())
    }

    pub fn with_clock(options: InfiniteOptions, clock: SharedClock) -> Self {
        let start = initial_position(options.initial_year, options.initial_month, clock.as_ref());
        let count = options.initial_months_to_load;
        Self {
            start,
            months: build(start, count),
            initial_start: start,
            initial_count: count,
            batch_size: options.batch_size,
            listeners: Listeners::new(),
        }
    }

    /// First month of the window.
    pub fn start(&self) -> YearMonth {
        self.start
    }

    pub fn month_count(&self) -> usize {
        self.months.len()
    }

    /// Loaded grids in chronological order.
    pub fn months(&self) -> &[CalendarMonth] {
        &self.months
    }

    /// Grows the window by `count` months in `direction`.
    ///
    /// Loading into the past moves the start back; existing grids are kept.
    pub fn load_more_months(&mut self, direction: ScrollDirection, count: usize) {
        if count == 0 {
            return;
        }
        match direction {
            ScrollDirection::Future => {
                let after = self.start.offset(self.months.len() as i64);
                self.months.extend(build(after, count));
            }
            ScrollDirection::Past => {
                self.start = self.start.offset(-(count as i64));
                let mut months = build(self.start, count);
                months.append(&mut self.months);
                self.months = months;
            }
        }
        debug!(
            ?direction,
            count,
            start_year = self.start.year,
            start_month = self.start.month,
            total = self.months.len(),
            "loaded months"
        );
    }

    /// Loads one batch of the configured size.
    pub fn load_more(&mut self, direction: ScrollDirection) {
        self.load_more_months(direction, self.batch_size);
    }

    /// Restarts the window at the given month, keeping its length.
    pub fn go_to_month(&mut self, year: i32, month: i32) {
        let start = YearMonth::normalized(year, i64::from(month));
        debug!(year = start.year, month = start.month, "scrolled to month");
        self.start = start;
        self.months = build(start, self.months.len());
        self.listeners.emit(&start);
    }

    /// Restores the window built at construction.
    pub fn reset(&mut self) {
        self.start = self.initial_start;
        self.months = build(self.initial_start, self.initial_count);
    }

    pub fn on_month_visible(&mut self, callback: impl FnMut(&YearMonth) + 'static) {
        self.listeners.push(callback);
    }
}

fn build(start: YearMonth, count: usize) -> Vec<CalendarMonth> {
    calendar_months(start.year, start.month as i32, count)
}
