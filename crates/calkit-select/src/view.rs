//! Calendar zoom level.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::listener::Listeners;

/// Zoom level of the calendar, from single days out to decades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    #[default]
    Month,
    Year,
    Decade,
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarView::Day => "day",
            CalendarView::Month => "month",
            CalendarView::Year => "year",
            CalendarView::Decade => "decade",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewOptions {
    pub initial_view: CalendarView,
}

/// Current view plus change listeners.
///
/// Every setter notifies, even when the view is already the requested one.
#[derive(Debug)]
pub struct ViewState {
    view: CalendarView,
    listeners: Listeners<CalendarView>,
}

impl ViewState {
    pub fn new(options: ViewOptions) -> Self {
        Self {
            view: options.initial_view,
            listeners: Listeners::new(),
        }
    }

    pub fn view(&self) -> CalendarView {
        self.view
    }

    /// Switches to `view` and notifies listeners, even when it is unchanged.
    pub fn set_view(&mut self, view: CalendarView) {
        debug!(view = %view, "view changed");
        self.view = view;
        self.listeners.emit(&view);
    }

    pub fn go_to_day_view(&mut self) {
        self.set_view(CalendarView::Day);
    }

    pub fn go_to_month_view(&mut self) {
        self.set_view(CalendarView::Month);
    }

    pub fn go_to_year_view(&mut self) {
        self.set_view(CalendarView::Year);
    }

    pub fn go_to_decade_view(&mut self) {
        self.set_view(CalendarView::Decade);
    }

    pub fn on_view_change(&mut self, callback: impl FnMut(&CalendarView) + 'static) {
        self.listeners.push(callback);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn starts_in_month_view() {
        assert_eq!(ViewState::new(ViewOptions::default()).view(), CalendarView::Month);
    }

    #[test]
    fn every_transition_notifies() {
        let mut state = ViewState::new(ViewOptions {
            initial_view: CalendarView::Year,
        });
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        state.on_view_change(move |v| sink.borrow_mut().push(*v));

        state.go_to_decade_view();
        state.go_to_day_view();
        state.go_to_month_view();
        state.go_to_month_view();
        state.go_to_year_view();

        assert_eq!(
            *log.borrow(),
            vec![
                CalendarView::Decade,
                CalendarView::Day,
                CalendarView::Month,
                CalendarView::Month,
                CalendarView::Year,
            ]
        );
        assert_eq!(state.view(), CalendarView::Year);
    }

    #[test]
    fn names_are_lowercase() {
        assert_eq!(CalendarView::Decade.to_string(), "decade");
        let parsed: CalendarView = toml::from_str::<ViewOptions>("initial_view = \"day\"")
            .unwrap()
            .initial_view;
        assert_eq!(parsed, CalendarView::Day);
    }
}
