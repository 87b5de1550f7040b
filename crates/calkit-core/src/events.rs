//! Calendar events attached to days.
//!
//! Events are plain data: a date, an optional label and color, and a free-form
//! metadata map. Lookups match events by calendar day, never by exact instant.

use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::compare::is_same_date;

/// Format used when writing event dates.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A single marker on the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(with = "event_date")]
    pub date: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl CalendarEvent {
    /// Creates an event with no id, label, color or metadata.
    pub fn new(date: NaiveDateTime) -> Self {
        Self {
            id: None,
            date,
            color: None,
            label: None,
            metadata: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Returns a metadata entry as text. Strings are returned as-is, numbers
    /// and booleans in their JSON form; other values yield `None`.
    pub fn metadata_text(&self, key: &str) -> Option<String> {
        match self.metadata.get(key)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            serde_json::Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// Parses an event date from one of the accepted textual forms:
/// naive ISO-8601 (`2024-01-15T09:30:00`, optional fraction), RFC 3339 with an
/// offset (converted to local time), or a bare date (`2024-01-15`, midnight).
pub fn parse_event_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

mod event_date {
    use chrono::NaiveDateTime;
    use serde::{Deserializer, Serializer, de};

    use super::{EVENT_DATE_FORMAT, parse_event_date};

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(EVENT_DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        struct EventDate;

        impl de::Visitor<'_> for EventDate {
            type Value = NaiveDateTime;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("an ISO-8601 date or date-time string")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<NaiveDateTime, E> {
                parse_event_date(value)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_str(EventDate)
    }
}

/// Events that fall on the same calendar day as `date`, in input order.
pub fn events_for_date<'a>(events: &'a [CalendarEvent], date: &NaiveDateTime) -> Vec<&'a CalendarEvent> {
    events
        .iter()
        .filter(|event| is_same_date(&event.date, date))
        .collect()
}

/// Returns `true` if at least one event falls on the calendar day of `date`.
pub fn has_events(events: &[CalendarEvent], date: &NaiveDateTime) -> bool {
    events.iter().any(|event| is_same_date(&event.date, date))
}

/// Groups events by calendar day. Days iterate in chronological order and
/// each day keeps its events in input order.
pub fn group_events_by_date(events: &[CalendarEvent]) -> BTreeMap<NaiveDate, Vec<&CalendarEvent>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
    for event in events {
        grouped.entry(event.date.date()).or_default().push(event);
    }
    grouped
}

/// Returns a copy of `events` sorted by date. Events at the same instant keep
/// their relative order.
pub fn sort_events(events: &[CalendarEvent]) -> Vec<CalendarEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.date);
    sorted
}
