//! Month cursor shared by every state holder that pages through months.

use calkit_core::clock::Clock;
use calkit_core::grid::{CalendarDay, YearMonth, calendar_days, rotate_week_start};
use chrono::{Datelike, Weekday};
use tracing::debug;

use crate::listener::Listeners;

/// Resolves optional initial year/month settings against the clock.
pub(crate) fn initial_position(year: Option<i32>, month: Option<u32>, clock: &dyn Clock) -> YearMonth {
    let today = clock.today();
    YearMonth::normalized(
        year.unwrap_or_else(|| today.year()),
        i64::from(month.unwrap_or_else(|| today.month0())),
    )
}

/// Current month, its 42-cell grid, and month-change listeners.
///
/// The grid is regenerated on every move, and every move notifies the
/// listeners, including jumps to the month already shown.
#[derive(Debug)]
pub struct MonthNavigator {
    position: YearMonth,
    week_start: Weekday,
    days: Vec<CalendarDay>,
    listeners: Listeners<YearMonth>,
}

impl MonthNavigator {
    /// Creates a navigator showing `position` with Sunday-first rows.
    pub fn new(position: YearMonth) -> Self {
        Self::with_week_start(position, Weekday::Sun)
    }

    /// Creates a navigator whose rows start on `week_start`.
    pub fn with_week_start(position: YearMonth, week_start: Weekday) -> Self {
        let mut navigator = Self {
            position,
            week_start,
            days: Vec::new(),
            listeners: Listeners::new(),
        };
        navigator.regenerate();
        navigator
    }

    pub fn position(&self) -> YearMonth {
        self.position
    }

    pub fn year(&self) -> i32 {
        self.position.year
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.position.month
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// The grid for the current month.
    pub fn days(&self) -> &[CalendarDay] {
        &self.days
    }

    pub fn previous_month(&mut self) {
        self.go_to(self.position.previous());
    }

    pub fn next_month(&mut self) {
        self.go_to(self.position.next());
    }

    /// Jumps to a month; `month` is zero-based and rolls over when out of range.
    pub fn go_to_month(&mut self, year: i32, month: i32) {
        self.go_to(YearMonth::normalized(year, i64::from(month)));
    }

    /// Jumps to `position` and notifies listeners.
    pub fn go_to(&mut self, position: YearMonth) {
        debug!(year = position.year, month = position.month, "month changed");
        self.position = position;
        self.regenerate();
        self.listeners.emit(&position);
    }

    /// Registers a month-change listener.
    pub fn on_month_change(&mut self, callback: impl FnMut(&YearMonth) + 'static) {
        self.listeners.push(callback);
    }

    fn regenerate(&mut self) {
        let days = calendar_days(self.position.year, self.position.month as i32);
        self.days = match self.week_start {
            Weekday::Sun => days,
            start => rotate_week_start(&days, start),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use calkit_core::clock::FixedClock;
    use calkit_core::grid::GRID_CELLS;
    use chrono::NaiveDate;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth { year, month }
    }

    fn recorded(navigator: &mut MonthNavigator) -> Rc<RefCell<Vec<YearMonth>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        navigator.on_month_change(move |p| sink.borrow_mut().push(*p));
        log
    }

    mod moves {
        use super::*;

        #[test]
        fn next_rolls_into_january() {
            let mut nav = MonthNavigator::new(ym(2024, 11));
            let log = recorded(&mut nav);
            nav.next_month();
            assert_eq!(nav.position(), ym(2025, 0));
            assert_eq!(*log.borrow(), vec![ym(2025, 0)]);
        }

        #[test]
        fn previous_rolls_into_december() {
            let mut nav = MonthNavigator::new(ym(2024, 0));
            nav.previous_month();
            assert_eq!((nav.year(), nav.month()), (2023, 11));
        }

        #[test]
        fn go_to_month_normalizes_and_always_notifies() {
            let mut nav = MonthNavigator::new(ym(2024, 5));
            let log = recorded(&mut nav);
            nav.go_to_month(2024, 13);
            nav.go_to_month(2025, 1);
            assert_eq!(*log.borrow(), vec![ym(2025, 1), ym(2025, 1)]);
        }

        #[test]
        fn grid_follows_position() {
            let mut nav = MonthNavigator::new(ym(2024, 0));
            nav.next_month();
            let days = nav.days();
            assert_eq!(days.len(), GRID_CELLS);
            assert_eq!(days.iter().filter(|d| d.is_current_month).count(), 29);
            assert!(days.iter().filter(|d| d.is_current_month).all(|d| d.month == 1));
        }
    }

    mod week_start {
        use super::*;

        #[test]
        fn rows_start_on_requested_weekday() {
            let nav = MonthNavigator::with_week_start(ym(2024, 0), Weekday::Mon);
            for row in nav.days().chunks(7) {
                let first = row[0].naive_date().unwrap();
                assert_eq!(first.weekday(), Weekday::Mon);
            }
        }

        #[test]
        fn rotation_survives_navigation() {
            let mut nav = MonthNavigator::with_week_start(ym(2024, 0), Weekday::Sat);
            nav.next_month();
            let first = nav.days()[0].naive_date().unwrap();
            assert_eq!(first.weekday(), Weekday::Sat);
        }
    }

    #[test]
    fn initial_position_defaults_to_clock() {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(initial_position(None, None, &clock), ym(2024, 2));
        assert_eq!(initial_position(Some(2020), None, &clock), ym(2020, 2));
        assert_eq!(initial_position(None, Some(14), &clock), ym(2025, 2));
    }
}
