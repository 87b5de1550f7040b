//! File-based calendar settings.
//!
//! A single TOML file configures every selection hook:
//!
//! ```toml
//! [locale]
//! locale = "de-DE"
//!
//! [display]
//! theme = "auto"
//! show_week_numbers = true
//!
//! [display.colors]
//! primary = "#0050b3"
//!
//! [constraints]
//! min_date = 2024-01-01
//! disabled_days_of_week = ["Sat", "Sun"]
//!
//! [selection]
//! max_selections = 5
//! min_range_duration = 2
//!
//! [time]
//! format = "12h"
//! minute_interval = 15
//!
//! [scroll]
//! initial_months = 12
//! batch_size = 6
//! ```
//!
//! Dates may be TOML dates, TOML datetimes or ISO-8601 strings.

use std::io;
use std::path::{Path, PathBuf};

use calkit_core::locale::locale_config;
use calkit_core::theme::{ThemeMode, ThemeOverride};
use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::datetime::{DateTimeOptions, TimeFormat};
use crate::enhanced::EnhancedOptions;
use crate::error::SelectError;
use crate::infinite::{DEFAULT_BATCH_SIZE, DEFAULT_INITIAL_MONTHS, InfiniteOptions};
use crate::multi::MultiOptions;
use crate::range::RangeOptions;
use crate::view::{CalendarView, ViewOptions};

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] SelectError),
}

// ---------------------------------------------------------------------------
// CalendarSettings
// ---------------------------------------------------------------------------

/// Settings for every calendar hook, as stored in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub locale: LocaleSettings,
    pub display: DisplaySettings,
    pub constraints: ConstraintSettings,
    pub selection: SelectionSettings,
    pub time: TimeSettings,
    pub scroll: ScrollSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleSettings {
    /// Locale tag such as `en-US`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Overrides the locale's own first weekday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_day_of_week: Option<Weekday>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub theme: ThemeMode,
    pub show_week_numbers: bool,
    pub initial_view: CalendarView,
    pub colors: ThemeOverride,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintSettings {
    #[serde(with = "settings_date::optional", skip_serializing_if = "Option::is_none")]
    pub min_date: Option<NaiveDateTime>,
    #[serde(with = "settings_date::optional", skip_serializing_if = "Option::is_none")]
    pub max_date: Option<NaiveDateTime>,
    #[serde(with = "settings_date::list")]
    pub disabled_dates: Vec<NaiveDateTime>,
    pub disabled_days_of_week: Vec<Weekday>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_selections: Option<usize>,
    /// Days, rounded up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_range_duration: Option<i64>,
    /// Days, rounded up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_range_duration: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSettings {
    pub format: TimeFormat,
    pub minute_interval: u32,
    pub show_seconds: bool,
}

impl Default for TimeSettings {
    fn default() -> Self {
        Self {
            format: TimeFormat::default(),
            minute_interval: 1,
            show_seconds: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub initial_months: usize,
    pub batch_size: usize,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            initial_months: DEFAULT_INITIAL_MONTHS,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl CalendarSettings {
    /// Reads, parses and validates a settings file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded calendar settings");
        Ok(settings)
    }

    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Runs every hook's option checks against these settings.
    pub fn validate(&self) -> Result<(), SelectError> {
        self.enhanced_options().validate()?;
        self.multi_options().validate()?;
        self.range_options().validate()?;
        self.date_time_options().validate()
    }

    /// The first grid column: the explicit override, else the locale's.
    pub fn first_day_of_week(&self) -> Weekday {
        self.locale
            .first_day_of_week
            .unwrap_or_else(|| locale_config(self.locale.locale.as_deref()).first_day_of_week)
    }

    pub fn enhanced_options(&self) -> EnhancedOptions {
        EnhancedOptions {
            locale: self.locale.locale.clone(),
            theme_mode: self.display.theme,
            theme: self.display.colors.clone(),
            min_date: self.constraints.min_date,
            max_date: self.constraints.max_date,
            disabled_dates: self.constraints.disabled_dates.clone(),
            disabled_days_of_week: self.constraints.disabled_days_of_week.clone(),
            first_day_of_week: self.first_day_of_week(),
            show_week_numbers: self.display.show_week_numbers,
            ..EnhancedOptions::default()
        }
    }

    pub fn multi_options(&self) -> MultiOptions {
        MultiOptions {
            min_date: self.constraints.min_date,
            max_date: self.constraints.max_date,
            max_selections: self.selection.max_selections,
            ..MultiOptions::default()
        }
    }

    pub fn range_options(&self) -> RangeOptions {
        RangeOptions {
            min_date: self.constraints.min_date,
            max_date: self.constraints.max_date,
            min_range_duration: self.selection.min_range_duration,
            max_range_duration: self.selection.max_range_duration,
            ..RangeOptions::default()
        }
    }

    pub fn date_time_options(&self) -> DateTimeOptions {
        DateTimeOptions {
            time_format: self.time.format,
            minute_interval: self.time.minute_interval,
            show_seconds: self.time.show_seconds,
            ..DateTimeOptions::default()
        }
    }

    pub fn infinite_options(&self) -> InfiniteOptions {
        InfiniteOptions {
            initial_months_to_load: self.scroll.initial_months,
            batch_size: self.scroll.batch_size,
            ..InfiniteOptions::default()
        }
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            initial_view: self.display.initial_view,
        }
    }
}

/// Dates in settings files: native TOML dates or ISO-8601 strings in,
/// ISO-8601 strings out.
mod settings_date {
    use calkit_core::events::{EVENT_DATE_FORMAT, parse_event_date};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    fn from_value<E: serde::de::Error>(value: toml::Value) -> Result<NaiveDateTime, E> {
        let text = match value {
            toml::Value::String(text) => text,
            toml::Value::Datetime(datetime) => datetime.to_string(),
            other => {
                return Err(E::custom(format!("expected a date, found {}", other.type_str())));
            }
        };
        parse_event_date(&text).ok_or_else(|| E::custom(format!("invalid date `{text}`")))
    }

    pub mod optional {
        use super::*;

        pub fn serialize<S: Serializer>(date: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
            match date {
                Some(date) => serializer.collect_str(&date.format(EVENT_DATE_FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
            Option::<toml::Value>::deserialize(deserializer)?
                .map(from_value::<D::Error>)
                .transpose()
        }
    }

    pub mod list {
        use super::*;

        pub fn serialize<S: Serializer>(dates: &[NaiveDateTime], serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(dates.iter().map(|d| d.format(EVENT_DATE_FORMAT).to_string()))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<NaiveDateTime>, D::Error> {
            Vec::<toml::Value>::deserialize(deserializer)?
                .into_iter()
                .map(from_value::<D::Error>)
                .collect()
        }
    }
}
