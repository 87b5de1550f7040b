//! Core calendar types: date math, month grids, ranges, recurrence, events,
//! locale names, formatting, presets and themes

pub mod clock;
pub mod compare;
pub mod date_math;
pub mod events;
pub mod format;
pub mod grid;
pub mod locale;
pub mod presets;
pub mod range;
pub mod recurrence;
pub mod theme;
pub mod tracing;

pub use clock::{Clock, FixedClock, SharedClock, SystemClock, system_clock};
pub use compare::{
    date_from_timestamp, is_date_after, is_date_before, is_date_between, is_same_date,
    is_valid_timestamp, normalize_date,
};
pub use date_math::{
    add_days, add_months, add_years, days_in_month, first_day_of_week, is_leap_year, is_weekend,
    iso_week_number, week_number,
};
pub use events::{CalendarEvent, events_for_date, group_events_by_date, has_events, sort_events};
pub use format::format_date;
pub use grid::{
    CalendarDay, CalendarMonth, GRID_CELLS, YearMonth, calendar_days, calendar_days_in,
    calendar_months, calendar_months_in, rotate_week_start,
};
pub use locale::{
    LocaleConfig, TextDirection, WeekNumbering, adjust_days_for_week_start, locale_config,
    localized_day_name, localized_month_name,
};
pub use presets::{DatePreset, UnknownPreset, preset_value};
pub use range::{DateRange, date_range, days_between};
pub use recurrence::{
    RecurrenceOptions, RecurrencePattern, RecurrenceRule, is_recurring_date, recurring_dates,
};
pub use theme::{
    AppearanceSource, CalendarTheme, ColorScheme, NoPreference, ThemeMode, ThemeOverride,
    resolve_theme, system_theme,
};
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
