//! Calendar selection state.
//!
//! Each state holder owns its month cursor and grid, applies its own
//! selection rules and notifies registered listeners synchronously:
//! - [`Calendar`]: one date, no constraints
//! - [`EnhancedCalendar`]: one date with bounds, disabled days, events,
//!   locale names and a theme
//! - [`MultiCalendar`]: any number of dates, optionally capped
//! - [`RangeCalendar`]: a start/end pair picked with two taps
//! - [`DateTimePicker`]: a date plus a time of day
//! - [`ViewState`]: day/month/year/decade zoom level
//! - [`InfiniteCalendar`]: a growable list of month grids
//!
//! # Example
//!
//! ```rust
//! use calkit_core::FixedClock;
//! use calkit_select::{RangeCalendar, RangeOptions, RangeSelectionMode};
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 20).unwrap();
//! let clock = FixedClock::at_date(today).shared();
//! let mut range = RangeCalendar::with_clock(RangeOptions::default(), clock).unwrap();
//!
//! let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! range.select_date(day(15));
//! range.select_date(day(10));
//! assert_eq!(range.selection_mode(), RangeSelectionMode::Complete);
//! assert_eq!(range.selected_range().unwrap().start(), day(10));
//! ```

mod config;
mod datetime;
mod enhanced;
mod error;
mod infinite;
mod listener;
mod multi;
mod navigator;
mod range;
mod single;
mod view;

pub use config::{
    CalendarSettings, ConfigError, ConstraintSettings, DisplaySettings, LocaleSettings,
    ScrollSettings, SelectionSettings, TimeSettings,
};
pub use datetime::{DateTimeOptions, DateTimePicker, TimeFormat, TimeOfDay};
pub use enhanced::{DisabledPredicate, EnhancedCalendar, EnhancedOptions};
pub use error::{SelectError, SelectResult};
pub use infinite::{
    DEFAULT_BATCH_SIZE, DEFAULT_INITIAL_MONTHS, InfiniteCalendar, InfiniteOptions, ScrollDirection,
};
pub use listener::Listeners;
pub use multi::{MultiCalendar, MultiOptions};
pub use navigator::MonthNavigator;
pub use range::{RangeCalendar, RangeOptions, RangeSelectionMode};
pub use single::{Calendar, CalendarOptions};
pub use view::{CalendarView, ViewOptions, ViewState};
