//! Rule-based recurring dates.
//!
//! A [`RecurrenceRule`] describes how to step from one occurrence to the next
//! and which candidates to keep. Generation walks forward from the start date
//! and stops at whichever bound comes first: the occurrence count, the window
//! end, or the rule's `until` date.

use chrono::{Datelike, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::compare::is_same_date;
use crate::date_math::{add_days, add_months, add_years};

/// How far each step advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrencePattern {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    /// Any pattern name this version does not know; steps one day at a time.
    #[serde(other)]
    Unknown,
}

/// Describes a repeating sequence of dates.
///
/// Filters are conjunctive: a candidate is kept only if it matches every
/// non-empty filter. Weekdays use 0 for Sunday and months are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRule {
    pub pattern: RecurrencePattern,
    #[serde(default = "default_interval")]
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_week: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub days_of_month: Vec<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub months_of_year: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDateTime>,
}

fn default_interval() -> u32 {
    1
}

impl RecurrenceRule {
    /// A rule with the given pattern, interval 1 and no filters or bounds.
    pub fn new(pattern: RecurrencePattern) -> Self {
        Self {
            pattern,
            interval: 1,
            days_of_week: Vec::new(),
            days_of_month: Vec::new(),
            months_of_year: Vec::new(),
            count: None,
            until: None,
        }
    }

    #[must_use]
    pub fn with_interval(mut self, interval: u32) -> Self {
        self.interval = interval;
        self
    }

    #[must_use]
    pub fn with_days_of_week(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.days_of_week = days.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_days_of_month(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.days_of_month = days.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_months_of_year(mut self, months: impl IntoIterator<Item = u32>) -> Self {
        self.months_of_year = months.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_until(mut self, until: NaiveDateTime) -> Self {
        self.until = Some(until);
        self
    }

    fn effective_interval(&self) -> u32 {
        self.interval.max(1)
    }

    fn matches(&self, date: &NaiveDateTime) -> bool {
        let weekday = date.weekday().num_days_from_sunday();
        (self.days_of_week.is_empty() || self.days_of_week.contains(&weekday))
            && (self.days_of_month.is_empty() || self.days_of_month.contains(&date.day()))
            && (self.months_of_year.is_empty() || self.months_of_year.contains(&date.month0()))
    }

    fn step(&self, date: NaiveDateTime) -> NaiveDateTime {
        let interval = self.effective_interval();
        match self.pattern {
            RecurrencePattern::Daily => add_days(date, i64::from(interval)),
            RecurrencePattern::Weekly => add_days(date, i64::from(interval) * 7),
            RecurrencePattern::Monthly => {
                add_months(date, i32::try_from(interval).unwrap_or(i32::MAX))
            }
            RecurrencePattern::Yearly => {
                add_years(date, i32::try_from(interval).unwrap_or(i32::MAX))
            }
            RecurrencePattern::Unknown => add_days(date, 1),
        }
    }
}

/// A rule anchored to a start date and an optional window end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceOptions {
    pub start: NaiveDateTime,
    /// Last instant considered. Defaults to one year after `start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDateTime>,
    pub rule: RecurrenceRule,
}

impl RecurrenceOptions {
    pub fn new(start: NaiveDateTime, rule: RecurrenceRule) -> Self {
        Self {
            start,
            end: None,
            rule,
        }
    }

    #[must_use]
    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    fn window_end(&self) -> NaiveDateTime {
        self.end.unwrap_or_else(|| add_years(self.start, 1))
    }
}

/// Generates every occurrence described by `options`, in chronological order.
///
/// A `count` of zero is treated as unbounded. The `until` bound is checked
/// after each step, so an occurrence equal to `until` is still produced.
pub fn recurring_dates(options: &RecurrenceOptions) -> Vec<NaiveDateTime> {
    let rule = &options.rule;
    let window_end = options.window_end();
    let limit = rule.count.filter(|c| *c > 0).unwrap_or(usize::MAX);

    let mut dates = Vec::new();
    let mut current = options.start;
    while current <= window_end && dates.len() < limit {
        if rule.matches(&current) {
            dates.push(current);
        }

        let next = rule.step(current);
        if next <= current {
            // Saturated at the edge of the representable range.
            break;
        }
        current = next;

        if rule.until.is_some_and(|until| current > until) {
            break;
        }
    }

    trace!(
        pattern = ?rule.pattern,
        interval = rule.interval,
        occurrences = dates.len(),
        "generated recurring dates"
    );
    dates
}

/// Returns `true` if some occurrence falls on the same calendar day as `date`.
pub fn is_recurring_date(date: &NaiveDateTime, options: &RecurrenceOptions) -> bool {
    recurring_dates(options)
        .iter()
        .any(|occurrence| is_same_date(occurrence, date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn dt(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    mod patterns {
        use super::*;

        #[test]
        fn daily_inclusive_window() {
            let options = RecurrenceOptions::new(dt(2024, 1, 1), RecurrenceRule::new(RecurrencePattern::Daily))
                .with_end(dt(2024, 1, 5));
            let dates = recurring_dates(&options);
            assert_eq!(dates.len(), 5);
            assert_eq!(dates[0], dt(2024, 1, 1));
            assert_eq!(dates[4], dt(2024, 1, 5));
        }

        #[test]
        fn weekly_every_other_week() {
            let rule = RecurrenceRule::new(RecurrencePattern::Weekly).with_interval(2);
            let options = RecurrenceOptions::new(dt(2024, 1, 1), rule).with_end(dt(2024, 1, 29));
            let dates = recurring_dates(&options);
            assert_eq!(dates, vec![dt(2024, 1, 1), dt(2024, 1, 15), dt(2024, 1, 29)]);
            for pair in dates.windows(2) {
                assert_eq!(pair[1] - pair[0], Duration::days(14));
            }
        }

        #[test]
        fn monthly_keeps_day_number() {
            let rule = RecurrenceRule::new(RecurrencePattern::Monthly).with_count(3);
            let dates = recurring_dates(&RecurrenceOptions::new(dt(2024, 1, 15), rule));
            assert_eq!(dates, vec![dt(2024, 1, 15), dt(2024, 2, 15), dt(2024, 3, 15)]);
        }

        #[test]
        fn yearly_default_window_is_one_year() {
            let rule = RecurrenceRule::new(RecurrencePattern::Yearly);
            let dates = recurring_dates(&RecurrenceOptions::new(dt(2024, 6, 1), rule));
            assert_eq!(dates, vec![dt(2024, 6, 1), dt(2025, 6, 1)]);
        }

        #[test]
        fn zero_interval_steps_once() {
            let rule = RecurrenceRule::new(RecurrencePattern::Daily).with_interval(0);
            let options = RecurrenceOptions::new(dt(2024, 1, 1), rule).with_end(dt(2024, 1, 3));
            assert_eq!(recurring_dates(&options).len(), 3);
        }

        #[test]
        fn unknown_pattern_advances_daily() {
            let json = r#"{"start":"2024-01-01T00:00:00","end":"2024-01-04T00:00:00","rule":{"pattern":"hourly","interval":5}}"#;
            let options: RecurrenceOptions = serde_json::from_str(json).unwrap();
            assert_eq!(options.rule.pattern, RecurrencePattern::Unknown);
            assert_eq!(recurring_dates(&options).len(), 4);
        }
    }

    mod filters {
        use super::*;

        #[test]
        fn weekdays_only() {
            // Monday, Wednesday, Friday
            let rule = RecurrenceRule::new(RecurrencePattern::Daily).with_days_of_week([1, 3, 5]);
            let options = RecurrenceOptions::new(dt(2024, 1, 1), rule).with_end(dt(2024, 1, 7));
            assert_eq!(
                recurring_dates(&options),
                vec![dt(2024, 1, 1), dt(2024, 1, 3), dt(2024, 1, 5)]
            );
        }

        #[test]
        fn filters_combine() {
            // The 13th, but only in February (month index 1).
            let rule = RecurrenceRule::new(RecurrencePattern::Daily)
                .with_days_of_month([13])
                .with_months_of_year([1]);
            let options = RecurrenceOptions::new(dt(2024, 1, 1), rule).with_end(dt(2024, 12, 31));
            assert_eq!(recurring_dates(&options), vec![dt(2024, 2, 13)]);
        }

        #[test]
        fn count_counts_matches_not_steps() {
            let rule = RecurrenceRule::new(RecurrencePattern::Daily)
                .with_days_of_week([0])
                .with_count(2);
            let dates = recurring_dates(&RecurrenceOptions::new(dt(2024, 1, 1), rule));
            assert_eq!(dates, vec![dt(2024, 1, 7), dt(2024, 1, 14)]);
        }
    }

    mod bounds {
        use super::*;

        #[test]
        fn until_includes_boundary() {
            let rule = RecurrenceRule::new(RecurrencePattern::Daily).with_until(dt(2024, 1, 3));
            let dates = recurring_dates(&RecurrenceOptions::new(dt(2024, 1, 1), rule));
            assert_eq!(dates.len(), 3);
        }

        #[test]
        fn window_end_before_start_is_empty() {
            let options = RecurrenceOptions::new(dt(2024, 1, 10), RecurrenceRule::new(RecurrencePattern::Daily))
                .with_end(dt(2024, 1, 1));
            assert!(recurring_dates(&options).is_empty());
        }

        #[test]
        fn membership_by_calendar_day() {
            let rule = RecurrenceRule::new(RecurrencePattern::Weekly);
            let options = RecurrenceOptions::new(dt(2024, 1, 1), rule).with_end(dt(2024, 2, 1));
            let afternoon = NaiveDate::from_ymd_opt(2024, 1, 8)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap();
            assert!(is_recurring_date(&afternoon, &options));
            assert!(!is_recurring_date(&dt(2024, 1, 9), &options));
        }
    }
}
