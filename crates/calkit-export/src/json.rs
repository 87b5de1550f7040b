//! JSON export and import of event lists.

use calkit_core::events::CalendarEvent;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ExportResult;

/// Pretty-printed JSON array of `events`.
pub fn export_to_json(events: &[CalendarEvent]) -> ExportResult<String> {
    let json = serde_json::to_string_pretty(events)?;
    debug!(count = events.len(), "exported events to JSON");
    Ok(json)
}

/// Reads events back from [`export_to_json`] output.
///
/// Any JSON value other than an array yields no events. Malformed JSON, or an
/// array element that is not an event, is an error.
pub fn import_from_json(text: &str) -> ExportResult<Vec<CalendarEvent>> {
    let Value::Array(items) = serde_json::from_str::<Value>(text)? else {
        warn!("event JSON is not an array, importing nothing");
        return Ok(Vec::new());
    };
    let events = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<CalendarEvent>, _>>()?;
    debug!(count = events.len(), "imported events from JSON");
    Ok(events)
}
