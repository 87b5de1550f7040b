//! Single-date selection.

use calkit_core::clock::{SharedClock, system_clock};
use calkit_core::compare::is_same_date;
use calkit_core::grid::{CalendarDay, YearMonth};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listener::Listeners;
use crate::navigator::{MonthNavigator, initial_position};

/// Options for [`Calendar`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    /// Year shown first. Defaults to the current year.
    pub initial_year: Option<i32>,
    /// Zero-based month shown first. Defaults to the current month.
    pub initial_month: Option<u32>,
    pub initial_selected_date: Option<NaiveDateTime>,
}

impl CalendarOptions {
    #[must_use]
    pub fn with_initial_month(mut self, year: i32, month: u32) -> Self {
        self.initial_year = Some(year);
        self.initial_month = Some(month);
        self
    }

    #[must_use]
    pub fn with_selected_date(mut self, date: NaiveDateTime) -> Self {
        self.initial_selected_date = Some(date);
        self
    }
}

/// A month view with at most one selected date. Any date can be selected.
#[derive(Debug)]
pub struct Calendar {
    navigator: MonthNavigator,
    selected: Option<NaiveDateTime>,
    clock: SharedClock,
    date_listeners: Listeners<NaiveDateTime>,
}

impl Calendar {
    pub fn new(options: CalendarOptions) -> Self {
        Self::with_clock(options, system_clock())
    }

    pub fn with_clock(options: CalendarOptions, clock: SharedClock) -> Self {
        let position = initial_position(options.initial_year, options.initial_month, clock.as_ref());
        Self {
            navigator: MonthNavigator::new(position),
            selected: options.initial_selected_date,
            clock,
            date_listeners: Listeners::new(),
        }
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

    pub fn selected_date(&self) -> Option<NaiveDateTime> {
        self.selected
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

    /// Shows the current month and selects the current instant.
    pub fn go_to_today(&mut self) {
        let now = self.clock.now();
        self.navigator.go_to(YearMonth::from(&now));
        self.select_date(now);
    }

    /// Selects `date` unconditionally and notifies listeners.
    pub fn select_date(&mut self, date: NaiveDateTime) {
        debug!(date = %date, "date selected");
        self.selected = Some(date);
        self.date_listeners.emit(&date);
    }

    /// Calendar-day comparison; the time of day is ignored.
    pub fn is_date_selected(&self, date: &NaiveDateTime) -> bool {
        self.selected.is_some_and(|selected| is_same_date(&selected, date))
    }

    pub fn is_today(&self, date: &NaiveDateTime) -> bool {
        date.date() == self.clock.today()
    }

    pub fn on_month_change(&mut self, callback: impl FnMut(&YearMonth) + 'static) {
        self.navigator.on_month_change(callback);
    }

    pub fn on_date_select(&mut self, callback: impl FnMut(&NaiveDateTime) + 'static) {
        self.date_listeners.push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use calkit_core::clock::FixedClock;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn calendar(options: CalendarOptions) -> Calendar {
        Calendar::with_clock(options, FixedClock::new(at(2024, 3, 15, 10)).shared())
    }

    #[test]
    fn defaults_come_from_clock() {
        let cal = calendar(CalendarOptions::default());
        assert_eq!((cal.year(), cal.month()), (2024, 2));
        assert!(cal.selected_date().is_none());
        assert_eq!(cal.days().len(), 42);
    }

    #[test]
    fn initial_values_are_used() {
        let cal = calendar(
            CalendarOptions::default()
                .with_initial_month(2023, 11)
                .with_selected_date(at(2023, 12, 25, 0)),
        );
        assert_eq!((cal.year(), cal.month()), (2023, 11));
        assert!(cal.is_date_selected(&at(2023, 12, 25, 18)));
    }

    #[test]
    fn navigation_notifies() {
        let mut cal = calendar(CalendarOptions::default().with_initial_month(2024, 0));
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        cal.on_month_change(move |p| sink.borrow_mut().push((p.year, p.month)));

        cal.previous_month();
        cal.next_month();
        cal.next_month();
        cal.go_to_month(2030, 6);

        assert_eq!(*log.borrow(), vec![(2023, 11), (2024, 0), (2024, 1), (2030, 6)]);
    }

    #[test]
    fn select_accepts_any_date() {
        let mut cal = calendar(CalendarOptions::default());
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        cal.on_date_select(move |d| sink.borrow_mut().push(*d));

        cal.select_date(at(1999, 1, 1, 0));
        assert_eq!(cal.selected_date(), Some(at(1999, 1, 1, 0)));
        assert!(cal.is_date_selected(&at(1999, 1, 1, 23)));
        assert!(!cal.is_date_selected(&at(1999, 1, 2, 0)));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn go_to_today_moves_and_selects() {
        let mut cal = calendar(CalendarOptions::default().with_initial_month(2020, 0));
        let months = Rc::new(RefCell::new(Vec::new()));
        let dates = Rc::new(RefCell::new(Vec::new()));
        let m = Rc::clone(&months);
        let d = Rc::clone(&dates);
        cal.on_month_change(move |p| m.borrow_mut().push(*p));
        cal.on_date_select(move |date| d.borrow_mut().push(*date));

        cal.go_to_today();

        assert_eq!((cal.year(), cal.month()), (2024, 2));
        assert_eq!(cal.selected_date(), Some(at(2024, 3, 15, 10)));
        assert_eq!(months.borrow().len(), 1);
        assert_eq!(*dates.borrow(), vec![at(2024, 3, 15, 10)]);
    }

    #[test]
    fn today_uses_calendar_day() {
        let cal = calendar(CalendarOptions::default());
        assert!(cal.is_today(&at(2024, 3, 15, 0)));
        assert!(cal.is_today(&at(2024, 3, 15, 23)));
        assert!(!cal.is_today(&at(2024, 3, 16, 0)));
    }
}
