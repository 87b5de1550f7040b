//! Single-date selection with constraints, events, locale and theme.
//!
//! Disabled days cannot be selected. A day is disabled when the first of
//! these checks that applies says so, in this order:
//!
//! 1. the custom predicate,
//! 2. the `min_date`/`max_date` bounds (compared by calendar day),
//! 3. the explicit `disabled_dates` list,
//! 4. the `disabled_days_of_week` list.
//!
//! Keep that order when adding checks; a predicate must be able to veto
//! before any bound is looked at.

use std::fmt;
use std::sync::Arc;

use calkit_core::clock::{SharedClock, system_clock};
use calkit_core::compare::{is_date_after, is_date_before, is_same_date, normalize_date};
use calkit_core::date_math::week_number;
use calkit_core::events::{self, CalendarEvent};
use calkit_core::grid::{CalendarDay, DAYS_PER_WEEK, YearMonth};
use calkit_core::locale::{LocaleConfig, adjust_days_for_week_start, locale_config};
use calkit_core::theme::{AppearanceSource, CalendarTheme, NoPreference, ThemeMode, ThemeOverride, resolve_theme};
use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SelectError, SelectResult};
use crate::listener::Listeners;
use crate::navigator::{MonthNavigator, initial_position};

/// Options for [`EnhancedCalendar`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancedOptions {
    pub initial_year: Option<i32>,
    /// Zero-based.
    pub initial_month: Option<u32>,
    pub initial_selected_date: Option<NaiveDateTime>,

    /// Events shown as markers.
    pub events: Vec<CalendarEvent>,

    /// Locale tag for names, e.g. `en-US`. Defaults to `en-US`.
    pub locale: Option<String>,
    pub theme_mode: ThemeMode,
    pub theme: ThemeOverride,

    pub min_date: Option<NaiveDateTime>,
    pub max_date: Option<NaiveDateTime>,
    pub disabled_dates: Vec<NaiveDateTime>,
    pub disabled_days_of_week: Vec<Weekday>,

    /// Weekday in the first grid column.
    pub first_day_of_week: Weekday,
    pub show_week_numbers: bool,
}

impl Default for EnhancedOptions {
    fn default() -> Self {
        Self {
            initial_year: None,
            initial_month: None,
            initial_selected_date: None,
            events: Vec::new(),
            locale: None,
            theme_mode: ThemeMode::Light,
            theme: ThemeOverride::default(),
            min_date: None,
            max_date: None,
            disabled_dates: Vec::new(),
            disabled_days_of_week: Vec::new(),
            first_day_of_week: Weekday::Sun,
            show_week_numbers: false,
        }
    }
}

impl EnhancedOptions {
    #[must_use]
    pub fn with_initial_month(mut self, year: i32, month: u32) -> Self {
        self.initial_year = Some(year);
        self.initial_month = Some(month);
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, min: Option<NaiveDateTime>, max: Option<NaiveDateTime>) -> Self {
        self.min_date = min;
        self.max_date = max;
        self
    }

    #[must_use]
    pub fn with_events(mut self, events: Vec<CalendarEvent>) -> Self {
        self.events = events;
        self
    }

    /// Checks that the bounds are ordered.
    pub fn validate(&self) -> SelectResult<()> {
        if let (Some(min), Some(max)) = (self.min_date, self.max_date)
            && normalize_date(&min) > normalize_date(&max)
        {
            return Err(SelectError::invalid_options(format!(
                "min_date {min} is after max_date {max}"
            )));
        }
        Ok(())
    }
}

/// Caller-supplied veto on individual dates.
pub struct DisabledPredicate(Box<dyn Fn(&NaiveDateTime) -> bool>);

impl DisabledPredicate {
    pub fn new(predicate: impl Fn(&NaiveDateTime) -> bool + 'static) -> Self {
        Self(Box::new(predicate))
    }

    fn test(&self, date: &NaiveDateTime) -> bool {
        (self.0)(date)
    }
}

impl fmt::Debug for DisabledPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DisabledPredicate")
    }
}

/// A month view with one selected date, selection constraints, event
/// lookups, localized labels and a resolved theme.
#[derive(Debug)]
pub struct EnhancedCalendar {
    navigator: MonthNavigator,
    selected: Option<NaiveDateTime>,
    options: EnhancedOptions,
    predicate: Option<DisabledPredicate>,
    theme: CalendarTheme,
    clock: SharedClock,
    date_listeners: Listeners<NaiveDateTime>,
}

impl EnhancedCalendar {
    pub fn new(options: EnhancedOptions) -> SelectResult<Self> {
        Self::with_clock(options, system_clock())
    }

    pub fn with_clock(options: EnhancedOptions, clock: SharedClock) -> SelectResult<Self> {
        options.validate()?;
        let position = initial_position(options.initial_year, options.initial_month, clock.as_ref());
        let theme = resolve_theme(options.theme_mode, &options.theme, &NoPreference);
        Ok(Self {
            navigator: MonthNavigator::with_week_start(position, options.first_day_of_week),
            selected: options.initial_selected_date,
            options,
            predicate: None,
            theme,
            clock,
            date_listeners: Listeners::new(),
        })
    }

    /// Adds a custom disable check, consulted before every other rule.
    #[must_use]
    pub fn with_disabled_predicate(mut self, predicate: impl Fn(&NaiveDateTime) -> bool + 'static) -> Self {
        self.predicate = Some(DisabledPredicate::new(predicate));
        self
    }

    /// Re-resolves the theme against the host's color scheme.
    #[must_use]
    pub fn with_appearance(mut self, source: &dyn AppearanceSource) -> Self {
        self.theme = resolve_theme(self.options.theme_mode, &self.options.theme, source);
        self
    }

    pub fn options(&self) -> &EnhancedOptions {
        &self.options
    }

    pub fn year(&self) -> i32 {
        self.navigator.year()
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.navigator.month()
    }

    /// The grid, rotated so `first_day_of_week` is the first column.
    pub fn days(&self) -> &[CalendarDay] {
        self.navigator.days()
    }

    pub fn selected_date(&self) -> Option<NaiveDateTime> {
        self.selected
    }

    pub fn theme(&self) -> &CalendarTheme {
        &self.theme
    }

    /// Cached names and week conventions for the configured locale.
    pub fn locale(&self) -> Arc<LocaleConfig> {
        locale_config(self.options.locale.as_deref())
    }

    /// Weekday header labels in grid column order.
    pub fn weekday_labels(&self, short: bool) -> Vec<String> {
        let locale = self.locale();
        let names = if short { &locale.day_names_short } else { &locale.day_names };
        adjust_days_for_week_start(names, self.options.first_day_of_week)
    }

    /// Month title for the current position, e.g. "March 2024".
    pub fn title(&self) -> String {
        let locale = self.locale();
        let name = locale
            .month_names
            .get(self.month() as usize)
            .cloned()
            .unwrap_or_default();
        format!("{name} {}", self.year())
    }

    /// One week number per grid row, taken from the row's first cell.
    /// `None` unless `show_week_numbers` is set.
    pub fn week_numbers(&self) -> Option<Vec<u32>> {
        if !self.options.show_week_numbers {
            return None;
        }
        Some(
            self.days()
                .chunks(DAYS_PER_WEEK)
                .filter_map(|row| row.first())
                .map(|first| week_number(first.year, first.month as i32, first.date as i32))
                .collect(),
        )
    }

    pub fn previous_month(&mut self) {
        self.navigator.previous_month();
    }

    pub fn next_month(&mut self) {
        self.navigator.next_month();
    }

    /// Jumps to a zero-based `month`, rolling out-of-range values into
    /// neighbouring years.
    pub fn go_to_month(&mut self, year: i32, month: i32) {
        self.navigator.go_to_month(year, month);
    }

    /// Shows the current month and selects the current instant. Today is
    /// selected even when a rule would disable it.
    pub fn go_to_today(&mut self) {
        let now = self.clock.now();
        self.navigator.go_to(YearMonth::from(&now));
        self.selected = Some(now);
        self.date_listeners.emit(&now);
    }

    /// Returns `true` if `date` cannot be selected.
    pub fn is_date_disabled(&self, date: &NaiveDateTime) -> bool {
        if self.predicate.as_ref().is_some_and(|p| p.test(date)) {
            return true;
        }

        let day = normalize_date(date);
        if let Some(min) = self.options.min_date
            && is_date_before(&day, &normalize_date(&min))
        {
            return true;
        }
        if let Some(max) = self.options.max_date
            && is_date_after(&day, &normalize_date(&max))
        {
            return true;
        }

        if self.options.disabled_dates.iter().any(|d| is_same_date(d, date)) {
            return true;
        }

        self.options.disabled_days_of_week.contains(&date.weekday())
    }

    /// Selects `date` unless it is disabled, in which case nothing happens.
    pub fn select_date(&mut self, date: NaiveDateTime) {
        if self.is_date_disabled(&date) {
            trace!(date = %date, "ignoring disabled date");
            return;
        }
        debug!(date = %date, "date selected");
        self.selected = Some(date);
        self.date_listeners.emit(&date);
    }

    pub fn is_date_selected(&self, date: &NaiveDateTime) -> bool {
        self.selected.is_some_and(|selected| is_same_date(&selected, date))
    }

    pub fn is_today(&self, date: &NaiveDateTime) -> bool {
        date.date() == self.clock.today()
    }

    pub fn events_for_date(&self, date: &NaiveDateTime) -> Vec<&CalendarEvent> {
        events::events_for_date(&self.options.events, date)
    }

    pub fn has_events(&self, date: &NaiveDateTime) -> bool {
        events::has_events(&self.options.events, date)
    }

    /// Replaces the event list.
    pub fn set_events(&mut self, events: Vec<CalendarEvent>) {
        self.options.events = events;
    }

    pub fn on_month_change(&mut self, callback: impl FnMut(&YearMonth) + 'static) {
        self.navigator.on_month_change(callback);
    }

    pub fn on_date_select(&mut self, callback: impl FnMut(&NaiveDateTime) + 'static) {
        self.date_listeners.push(callback);
    }
}
