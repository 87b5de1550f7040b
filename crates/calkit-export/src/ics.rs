//! iCalendar export.

use calkit_core::events::CalendarEvent;
use icalendar::{Calendar, Component, EventLike, Property, ValueType};
use tracing::debug;
use uuid::Uuid;

const UID_DOMAIN: &str = "calkit";

/// Calendar-level fields for [`export_to_ics`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Calendar display name.
    pub title: Option<String>,
    pub description: Option<String>,
    /// Location for events whose metadata has none.
    pub location: Option<String>,
}

impl ExportOptions {
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Renders `events` as one VCALENDAR with a single-day VEVENT per event.
///
/// `DESCRIPTION` and `LOCATION` come from the `description` and `location`
/// metadata keys. Events without an id get a random `UID`.
pub fn export_to_ics(events: &[CalendarEvent], options: &ExportOptions) -> String {
    let mut cal = Calendar::new();
    if let Some(title) = &options.title {
        cal.name(title);
    }
    if let Some(description) = &options.description {
        cal.description(description);
    }

    for event in events {
        cal.push(to_vevent(event, options));
    }

    debug!(count = events.len(), "exported events to iCalendar");
    cal.done().to_string()
}

fn to_vevent(event: &CalendarEvent, options: &ExportOptions) -> icalendar::Event {
    let mut vevent = icalendar::Event::new();

    let uid = event
        .id
        .clone()
        .unwrap_or_else(|| format!("{}@{UID_DOMAIN}", Uuid::new_v4()));
    vevent.uid(&uid);
    vevent.summary(event.label.as_deref().unwrap_or("Event"));

    let day = event.date.format("%Y%m%d").to_string();
    for name in ["DTSTART", "DTEND"] {
        let mut prop = Property::new(name, &day);
        prop.append_parameter(ValueType::Date);
        vevent.append_property(prop);
    }

    if let Some(description) = event.metadata_text("description") {
        vevent.description(&description);
    }
    if let Some(location) = event.metadata_text("location").or_else(|| options.location.clone()) {
        vevent.location(&location);
    }

    vevent.done()
}
