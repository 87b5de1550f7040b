//! Date plus time-of-day selection.

use calkit_core::compare::normalize_date;
use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::error::{SelectError, SelectResult};
use crate::listener::Listeners;

/// Wall-clock time held apart from the date.
///
/// Values are not range-checked: 25 hours rolls into the next day when
/// combined with a date. Times too large to land on a representable date
/// combine to nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOfDay {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl TimeOfDay {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Places this time on `date`'s calendar day, or `None` if the result
    /// falls outside the supported date range.
    pub fn on(self, date: &NaiveDateTime) -> Option<NaiveDateTime> {
        let offset = i64::from(self.hours) * 3600 + i64::from(self.minutes) * 60 + i64::from(self.seconds);
        normalize_date(date).checked_add_signed(Duration::try_seconds(offset)?)
    }
}

impl From<&NaiveDateTime> for TimeOfDay {
    fn from(dt: &NaiveDateTime) -> Self {
        Self::new(dt.hour(), dt.minute(), dt.second())
    }
}

/// Clock face used when rendering the time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFormat {
    #[serde(rename = "12h")]
    TwelveHour,
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
}

/// Options for [`DateTimePicker`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeOptions {
    pub initial_date: Option<NaiveDateTime>,
    pub initial_time: TimeOfDay,
    pub time_format: TimeFormat,
    /// Step between selectable minutes. Must be in `1..=60`.
    pub minute_interval: u32,
    pub show_seconds: bool,
}

impl Default for DateTimeOptions {
    fn default() -> Self {
        Self {
            initial_date: None,
            initial_time: TimeOfDay::default(),
            time_format: TimeFormat::default(),
            minute_interval: 1,
            show_seconds: false,
        }
    }
}

impl DateTimeOptions {
    #[must_use]
    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    #[must_use]
    pub fn with_minute_interval(mut self, interval: u32) -> Self {
        self.minute_interval = interval;
        self
    }

    #[must_use]
    pub fn with_seconds(mut self, show: bool) -> Self {
        self.show_seconds = show;
        self
    }

    /// `minute_interval` must lie in `1..=60`.
    pub fn validate(&self) -> SelectResult<()> {
        if !(1..=60).contains(&self.minute_interval) {
            return Err(SelectError::invalid_options(format!(
                "minute_interval must be between 1 and 60, got {}",
                self.minute_interval
            )));
        }
        Ok(())
    }
}

/// Holds a date and a time of day and exposes their combination.
#[derive(Debug)]
pub struct DateTimePicker {
    date: Option<NaiveDateTime>,
    time: TimeOfDay,
    combined: Option<NaiveDateTime>,
    time_format: TimeFormat,
    minute_interval: u32,
    show_seconds: bool,
    listeners: Listeners<NaiveDateTime>,
}

impl DateTimePicker {
    pub fn new(options: DateTimeOptions) -> SelectResult<Self> {
        options.validate()?;
        let mut picker = Self {
            date: options.initial_date,
            time: options.initial_time,
            combined: None,
            time_format: options.time_format,
            minute_interval: options.minute_interval,
            show_seconds: options.show_seconds,
            listeners: Listeners::new(),
        };
        picker.recombine();
        Ok(picker)
    }

    /// The chosen date at the chosen time, or `None` until a date is picked.
    pub fn selected_date_time(&self) -> Option<NaiveDateTime> {
        self.combined
    }

    pub fn selected_date(&self) -> Option<NaiveDateTime> {
        self.date
    }

    pub fn selected_time(&self) -> TimeOfDay {
        self.time
    }

    pub fn time_format(&self) -> TimeFormat {
        self.time_format
    }

    pub fn minute_interval(&self) -> u32 {
        self.minute_interval
    }

    pub fn show_seconds(&self) -> bool {
        self.show_seconds
    }

    /// Selectable minute values for the configured interval.
    pub fn minute_steps(&self) -> Vec<u32> {
        (0..60).step_by(self.minute_interval.max(1) as usize).collect()
    }

    /// Sets the date, keeping the current time of day.
    pub fn select_date(&mut self, date: NaiveDateTime) {
        debug!(date = %date, "date selected");
        self.date = Some(date);
        self.recombine_and_notify();
    }

    /// Sets the time of day. Listeners fire only once a date is present.
    pub fn select_time(&mut self, hours: u32, minutes: u32, seconds: u32) {
        self.time = TimeOfDay::new(hours, minutes, seconds);
        if self.date.is_none() {
            trace!(hours, minutes, seconds, "time held until a date is picked");
            self.recombine();
            return;
        }
        self.recombine_and_notify();
    }

    /// Sets date and time from one value.
    pub fn set_date_time(&mut self, date_time: NaiveDateTime) {
        self.date = Some(date_time);
        self.time = TimeOfDay::from(&date_time);
        self.recombine_and_notify();
    }

    /// Forgets the date and zeroes the time. Listeners are not notified.
    pub fn clear_date_time(&mut self) {
        self.date = None;
        self.time = TimeOfDay::default();
        self.combined = None;
    }

    /// The selected time rendered in the configured format.
    pub fn formatted_time(&self) -> Option<String> {
        let value = self.combined?;
        let pattern = match (self.time_format, self.show_seconds) {
            (TimeFormat::TwelveHour, false) => "%I:%M %p",
            (TimeFormat::TwelveHour, true) => "%I:%M:%S %p",
            (TimeFormat::TwentyFourHour, false) => "%H:%M",
            (TimeFormat::TwentyFourHour, true) => "%H:%M:%S",
        };
        Some(value.format(pattern).to_string())
    }

    pub fn on_date_time_change(&mut self, callback: impl FnMut(&NaiveDateTime) + 'static) {
        self.listeners.push(callback);
    }

    fn recombine(&mut self) {
        self.combined = self.date.and_then(|date| self.time.on(&date));
        if self.date.is_some() && self.combined.is_none() {
            warn!(time = ?self.time, "time of day overflows the selected date");
        }
    }

    fn recombine_and_notify(&mut self) {
        self.recombine();
        if let Some(value) = self.combined {
            self.listeners.emit(&value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn recorded(picker: &mut DateTimePicker) -> Rc<RefCell<Vec<NaiveDateTime>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        picker.on_date_time_change(move |dt| sink.borrow_mut().push(*dt));
        log
    }

    mod selection {
        use super::*;

        #[test]
        fn time_alone_never_fires() {
            let mut picker = DateTimePicker::new(DateTimeOptions::default()).unwrap();
            let log = recorded(&mut picker);
            picker.select_time(14, 30, 0);
            assert!(picker.selected_date_time().is_none());
            assert!(log.borrow().is_empty());

            picker.select_date(at(2024, 3, 15, 8, 0));
            assert_eq!(picker.selected_date_time(), Some(at(2024, 3, 15, 14, 30)));
            assert_eq!(*log.borrow(), vec![at(2024, 3, 15, 14, 30)]);
        }

        #[test]
        fn time_change_with_date_fires() {
            let mut picker = DateTimePicker::new(DateTimeOptions::default()).unwrap();
            picker.select_date(at(2024, 3, 15, 0, 0));
            let log = recorded(&mut picker);
            picker.select_time(9, 5, 0);
            assert_eq!(*log.borrow(), vec![at(2024, 3, 15, 9, 5)]);
        }

        #[test]
        fn set_date_time_splits_parts() {
            let mut picker = DateTimePicker::new(DateTimeOptions::default()).unwrap();
            let log = recorded(&mut picker);
            picker.set_date_time(at(2024, 6, 1, 17, 45));
            assert_eq!(picker.selected_time(), TimeOfDay::new(17, 45, 0));
            assert_eq!(picker.selected_date_time(), Some(at(2024, 6, 1, 17, 45)));
            assert_eq!(log.borrow().len(), 1);
        }

        #[test]
        fn clear_resets_silently() {
            let mut picker = DateTimePicker::new(DateTimeOptions {
                initial_date: Some(at(2024, 1, 1, 0, 0)),
                initial_time: TimeOfDay::new(10, 0, 0),
                ..DateTimeOptions::default()
            })
            .unwrap();
            assert_eq!(picker.selected_date_time(), Some(at(2024, 1, 1, 10, 0)));
            let log = recorded(&mut picker);
            picker.clear_date_time();
            assert!(picker.selected_date_time().is_none());
            assert_eq!(picker.selected_time(), TimeOfDay::default());
            assert!(log.borrow().is_empty());
        }

        #[test]
        fn overflowing_hours_roll_into_next_day() {
            let time = TimeOfDay::new(25, 0, 0);
            assert_eq!(time.on(&at(2024, 1, 31, 12, 0)), Some(at(2024, 2, 1, 1, 0)));
        }

        #[test]
        fn unrepresentable_time_leaves_nothing_selected() {
            let mut picker = DateTimePicker::new(DateTimeOptions::default()).unwrap();
            picker.select_date(at(2024, 1, 1, 0, 0));
            let log = recorded(&mut picker);

            picker.select_time(u32::MAX, 0, 0);
            assert!(picker.selected_date_time().is_none());
            assert!(picker.formatted_time().is_none());
            assert!(log.borrow().is_empty());

            picker.select_time(8, 0, 0);
            assert_eq!(picker.selected_date_time(), Some(at(2024, 1, 1, 8, 0)));
            assert_eq!(log.borrow().len(), 1);
        }
    }

    mod presentation {
        use super::*;

        #[test]
        fn formats_follow_options() {
            let mut picker = DateTimePicker::new(
                DateTimeOptions::default()
                    .with_time_format(TimeFormat::TwelveHour)
                    .with_minute_interval(15),
            )
            .unwrap();
            assert!(picker.formatted_time().is_none());
            picker.set_date_time(at(2024, 1, 1, 14, 30));
            assert_eq!(picker.formatted_time().as_deref(), Some("02:30 PM"));
            assert_eq!(picker.minute_steps(), vec![0, 15, 30, 45]);

            let mut seconds = DateTimePicker::new(DateTimeOptions::default().with_seconds(true)).unwrap();
            seconds.set_date_time(at(2024, 1, 1, 14, 30));
            assert_eq!(seconds.formatted_time().as_deref(), Some("14:30:00"));
        }

        #[test]
        fn minute_interval_is_validated() {
            assert!(DateTimePicker::new(DateTimeOptions::default().with_minute_interval(0)).is_err());
            assert!(DateTimePicker::new(DateTimeOptions::default().with_minute_interval(61)).is_err());
            assert!(DateTimePicker::new(DateTimeOptions::default().with_minute_interval(60)).is_ok());
        }

        #[test]
        fn time_format_serde_names() {
            let json = serde_json::to_string(&TimeFormat::TwelveHour).unwrap();
            assert_eq!(json, "\"12h\"");
            let parsed: TimeFormat = serde_json::from_str("\"24h\"").unwrap();
            assert_eq!(parsed, TimeFormat::TwentyFourHour);
        }
    }
}
