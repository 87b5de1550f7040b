//! Multi-date selection.

use calkit_core::clock::{SharedClock, system_clock};
use calkit_core::compare::{is_date_after, is_date_before, is_same_date};
use calkit_core::grid::{CalendarDay, YearMonth};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SelectError, SelectResult};
use crate::listener::Listeners;
use crate::navigator::{MonthNavigator, initial_position};

/// Options for [`MultiCalendar`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiOptions {
    pub initial_year: Option<i32>,
    /// Zero-based.
    pub initial_month: Option<u32>,
    pub initial_selected_dates: Vec<NaiveDateTime>,
    /// Earliest instant that can be toggled on.
    pub min_date: Option<NaiveDateTime>,
    /// Latest instant that can be toggled on.
    pub max_date: Option<NaiveDateTime>,
    /// Cap on the number of selected dates. Unlimited when unset.
    pub max_selections: Option<usize>,
}

impl MultiOptions {
    #[must_use]
    pub fn with_initial_month(mut self, year: i32, month: u32) -> Self {
        self.initial_year = Some(year);
        self.initial_month = Some(month);
        self
    }

    #[must_use]
    pub fn with_max_selections(mut self, max: usize) -> Self {
        self.max_selections = Some(max);
        self
    }

    /// Rejects inverted bounds and a zero `max_selections`.
    ///
    /// # Errors
    ///
    /// Returns [`SelectError::InvalidOptions`] naming the offending field.
    pub fn validate(&self) -> SelectResult<()> {
        if let (Some(min), Some(max)) = (self.min_date, self.max_date)
            && min > max
        {
            return Err(SelectError::invalid_options(format!(
                "min_date {min} is after max_date {max}"
            )));
        }
        if self.max_selections == Some(0) {
            return Err(SelectError::invalid_options("max_selections must be at least 1"));
        }
        Ok(())
    }
}

/// A month view where any number of days can be toggled on and off.
///
/// Selected dates keep insertion order and never contain two entries on the
/// same calendar day.
#[derive(Debug)]
pub struct MultiCalendar {
    navigator: MonthNavigator,
    selected: Vec<NaiveDateTime>,
    min_date: Option<NaiveDateTime>,
    max_date: Option<NaiveDateTime>,
    max_selections: Option<usize>,
    clock: SharedClock,
    dates_listeners: Listeners<[NaiveDateTime]>,
}

impl MultiCalendar {
    pub fn new(options: MultiOptions) -> SelectResult<Self> {
        Self::with_clock(options, system_clock())
    }

    pub fn with_clock(options: MultiOptions, clock: SharedClock) -> SelectResult<Self> {
        options.validate()?;
        let position = initial_position(options.initial_year, options.initial_month, clock.as_ref());
        Ok(Self {
            navigator: MonthNavigator::new(position),
            selected: options.initial_selected_dates,
            min_date: options.min_date,
            max_date: options.max_date,
            max_selections: options.max_selections,
            clock,
            dates_listeners: Listeners::new(),
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

    pub fn selected_dates(&self) -> &[NaiveDateTime] {
        &self.selected
    }

    /// Removes `date` if its day is selected, otherwise adds it.
    ///
    /// Dates outside the bounds are ignored. Adding is ignored once the cap
    /// is reached; removing always works.
    pub fn toggle_date(&mut self, date: NaiveDateTime) {
        if self.min_date.is_some_and(|min| is_date_before(&date, &min))
            || self.max_date.is_some_and(|max| is_date_after(&date, &max))
        {
            trace!(date = %date, "ignoring out-of-bounds toggle");
            return;
        }

        if let Some(index) = self.selected.iter().position(|s| is_same_date(s, &date)) {
            self.selected.remove(index);
            debug!(date = %date, count = self.selected.len(), "date deselected");
        } else {
            if self.max_selections.is_some_and(|max| self.selected.len() >= max) {
                trace!(date = %date, "selection cap reached");
                return;
            }
            self.selected.push(date);
            debug!(date = %date, count = self.selected.len(), "date selected");
        }

        self.dates_listeners.emit(&self.selected);
    }

    /// Empties the selection and notifies listeners with an empty list.
    pub fn clear_dates(&mut self) {
        self.selected.clear();
        self.dates_listeners.emit(&self.selected);
    }

    pub fn is_date_selected(&self, date: &NaiveDateTime) -> bool {
        self.selected.iter().any(|s| is_same_date(s, date))
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

    pub fn on_dates_select(&mut self, callback: impl FnMut(&[NaiveDateTime]) + 'static) {
        self.dates_listeners.push(callback);
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

    fn calendar(options: MultiOptions) -> MultiCalendar {
        MultiCalendar::with_clock(options, FixedClock::new(at(2024, 1, 20, 12)).shared()).unwrap()
    }

    fn recorded(cal: &mut MultiCalendar) -> Rc<RefCell<Vec<usize>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        cal.on_dates_select(move |dates| sink.borrow_mut().push(dates.len()));
        log
    }

    mod toggling {
        use super::*;

        #[test]
        fn toggle_adds_then_removes_by_day() {
            let mut cal = calendar(MultiOptions::default());
            let log = recorded(&mut cal);
            cal.toggle_date(at(2024, 1, 10, 9));
            cal.toggle_date(at(2024, 1, 12, 9));
            assert_eq!(cal.selected_dates(), &[at(2024, 1, 10, 9), at(2024, 1, 12, 9)]);

            // Same day, different time: removes.
            cal.toggle_date(at(2024, 1, 10, 18));
            assert_eq!(cal.selected_dates(), &[at(2024, 1, 12, 9)]);
            assert!(!cal.is_date_selected(&at(2024, 1, 10, 9)));
            assert_eq!(*log.borrow(), vec![1, 2, 1]);
        }

        #[test]
        fn cap_rejects_additions_but_allows_removal() {
            let mut cal = calendar(MultiOptions::default().with_max_selections(2));
            let log = recorded(&mut cal);
            cal.toggle_date(at(2024, 1, 10, 0));
            cal.toggle_date(at(2024, 1, 11, 0));
            cal.toggle_date(at(2024, 1, 12, 0));
            assert_eq!(cal.selected_dates().len(), 2);
            assert!(!cal.is_date_selected(&at(2024, 1, 12, 0)));

            cal.toggle_date(at(2024, 1, 11, 0));
            assert_eq!(cal.selected_dates(), &[at(2024, 1, 10, 0)]);
            assert_eq!(*log.borrow(), vec![1, 2, 1]);
        }

        #[test]
        fn bounds_use_exact_instants() {
            let mut cal = calendar(MultiOptions {
                min_date: Some(at(2024, 1, 10, 12)),
                max_date: Some(at(2024, 1, 20, 0)),
                ..MultiOptions::default()
            });
            cal.toggle_date(at(2024, 1, 10, 8));
            cal.toggle_date(at(2024, 1, 20, 1));
            assert!(cal.selected_dates().is_empty());
            cal.toggle_date(at(2024, 1, 10, 12));
            cal.toggle_date(at(2024, 1, 20, 0));
            assert_eq!(cal.selected_dates().len(), 2);
        }

        #[test]
        fn clear_notifies_with_empty_list() {
            let mut cal = calendar(MultiOptions {
                initial_selected_dates: vec![at(2024, 1, 1, 0), at(2024, 1, 2, 0)],
                ..MultiOptions::default()
            });
            let log = recorded(&mut cal);
            cal.clear_dates();
            assert!(cal.selected_dates().is_empty());
            assert_eq!(*log.borrow(), vec![0]);
        }
    }

    mod options {
        use super::*;

        #[test]
        fn zero_cap_is_invalid() {
            let options = MultiOptions::default().with_max_selections(0);
            assert!(matches!(options.validate(), Err(SelectError::InvalidOptions { .. })));
        }

        #[test]
        fn inverted_bounds_are_invalid() {
            let options = MultiOptions {
                min_date: Some(at(2024, 2, 1, 0)),
                max_date: Some(at(2024, 1, 1, 0)),
                ..MultiOptions::default()
            };
            assert!(MultiCalendar::new(options).is_err());
        }
    }

    #[test]
    fn go_to_today_only_navigates() {
        let mut cal = calendar(MultiOptions {
            initial_selected_dates: vec![at(2023, 6, 1, 0)],
            ..MultiOptions::default().with_initial_month(2023, 5)
        });
        let log = recorded(&mut cal);
        cal.go_to_today();
        assert_eq!((cal.year(), cal.month()), (2024, 0));
        assert_eq!(cal.selected_dates().len(), 1);
        assert!(log.borrow().is_empty());
        assert!(cal.is_today(&at(2024, 1, 20, 0)));
    }
}
