//! Event export: iCalendar text and JSON arrays.
//!
//! ```rust
//! use calkit_core::CalendarEvent;
//! use calkit_export::{ExportOptions, export_to_ics, export_to_json, import_from_json};
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let events = vec![CalendarEvent::new(date).with_id("1").with_label("Standup")];
//!
//! let ics = export_to_ics(&events, &ExportOptions::default());
//! assert!(ics.contains("SUMMARY:Standup"));
//!
//! let json = export_to_json(&events).unwrap();
//! assert_eq!(import_from_json(&json).unwrap(), events);
//! ```

mod error;
mod ics;
mod json;

pub use error::{ExportError, ExportResult};
pub use ics::{ExportOptions, export_to_ics};
pub use json::{export_to_json, import_from_json};
