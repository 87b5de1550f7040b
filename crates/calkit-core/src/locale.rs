//! Locale-dependent names and week conventions.
//!
//! Month and weekday names come from chrono's localized formatting. A
//! [`LocaleConfig`] is computed once per locale string and kept in a
//! process-wide cache for the lifetime of the process.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use chrono::{Locale, NaiveDate, NaiveTime, Weekday};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use crate::date_math::iso_week_number;

/// Locale used when none is given.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Locale tags whose weeks start on Sunday.
const SUNDAY_START_LOCALES: [&str; 2] = ["en-US", "en-CA"];

/// Language prefixes written right to left.
const RTL_LANGUAGES: [&str; 3] = ["ar", "he", "fa"];

/// Splits tags like `en-US`, `pt_BR` or `fr` into language and region.
static LOCALE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<lang>[A-Za-z]{2,3})(?:[-_](?P<region>[A-Za-z]{2}|[0-9]{3}))?")
        .expect("Invalid locale tag regex")
});

static LOCALE_CACHE: LazyLock<RwLock<HashMap<String, Arc<LocaleConfig>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// How week numbers are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeekNumbering {
    #[serde(rename = "ISO")]
    Iso,
    #[serde(rename = "US")]
    Us,
}

/// Writing direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Names and conventions for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleConfig {
    pub locale: String,
    pub first_day_of_week: Weekday,
    pub week_numbering: WeekNumbering,
    /// Full month names, January first.
    pub month_names: Vec<String>,
    pub month_names_short: Vec<String>,
    /// Full weekday names, Sunday first.
    pub day_names: Vec<String>,
    pub day_names_short: Vec<String>,
    pub direction: TextDirection,
}

impl LocaleConfig {
    fn compute(tag: &str) -> Self {
        let chrono_locale = resolve_chrono_locale(tag);

        let month_names = (1..=12).map(|m| month_label(m, "%B", chrono_locale)).collect();
        let month_names_short = (1..=12).map(|m| month_label(m, "%b", chrono_locale)).collect();
        let day_names = (0..7).map(|d| day_label(d, "%A", chrono_locale)).collect();
        let day_names_short = (0..7).map(|d| day_label(d, "%a", chrono_locale)).collect();

        let direction = if RTL_LANGUAGES.iter().any(|prefix| tag.starts_with(prefix)) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        };

        let first_day_of_week = if SUNDAY_START_LOCALES.iter().any(|prefix| tag.starts_with(prefix)) {
            Weekday::Sun
        } else {
            Weekday::Mon
        };

        let week_numbering = match first_day_of_week {
            Weekday::Sun => WeekNumbering::Us,
            _ => WeekNumbering::Iso,
        };

        Self {
            locale: tag.to_string(),
            first_day_of_week,
            week_numbering,
            month_names,
            month_names_short,
            day_names,
            day_names_short,
            direction,
        }
    }

    /// Weekday names reordered so that the first day of the week comes first.
    pub fn ordered_day_names(&self, short: bool) -> Vec<String> {
        let names = if short { &self.day_names_short } else { &self.day_names };
        adjust_days_for_week_start(names, self.first_day_of_week)
    }
}

/// Maps a BCP-47 style tag to the closest chrono locale, falling back to
/// `en_US` when nothing matches.
pub(crate) fn resolve_chrono_locale(tag: &str) -> Locale {
    let Some(caps) = LOCALE_TAG_REGEX.captures(tag) else {
        return Locale::en_US;
    };
    let lang = caps["lang"].to_ascii_lowercase();
    let mut candidates = Vec::with_capacity(3);
    if let Some(region) = caps.name("region") {
        candidates.push(format!("{lang}_{}", region.as_str().to_ascii_uppercase()));
    }
    candidates.push(lang.clone());
    candidates.push(format!("{lang}_{}", lang.to_ascii_uppercase()));

    candidates
        .iter()
        .find_map(|candidate| Locale::try_from(candidate.as_str()).ok())
        .unwrap_or(Locale::en_US)
}

fn month_label(month: u32, fmt: &str, locale: Locale) -> String {
    NaiveDate::from_ymd_opt(2024, month, 1)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().format_localized(fmt, locale).to_string())
        .unwrap_or_default()
}

/// `day` is 0 for Sunday. December 31, 2023 was a Sunday.
fn day_label(day: u32, fmt: &str, locale: Locale) -> String {
    let base = if day == 0 {
        NaiveDate::from_ymd_opt(2023, 12, 31)
    } else {
        NaiveDate::from_ymd_opt(2024, 1, day)
    };
    base.map(|d| d.and_time(NaiveTime::MIN).and_utc().format_localized(fmt, locale).to_string())
        .unwrap_or_default()
}

/// Returns the configuration for `locale` (default `en-US`), computing and
/// caching it on first use.
///
/// Concurrent first requests may compute the same entry twice; the first
/// insert wins and every caller gets the cached value.
pub fn locale_config(locale: Option<&str>) -> Arc<LocaleConfig> {
    let key = locale.filter(|l| !l.is_empty()).unwrap_or(DEFAULT_LOCALE);

    if let Some(config) = LOCALE_CACHE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(key)
    {
        return Arc::clone(config);
    }

    debug!(locale = %key, "computing locale config");
    let computed = Arc::new(LocaleConfig::compute(key));
    let mut cache = LOCALE_CACHE.write().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(cache.entry(key.to_string()).or_insert(computed))
}

/// Number of locales currently cached.
pub fn cached_locale_count() -> usize {
    LOCALE_CACHE.read().unwrap_or_else(PoisonError::into_inner).len()
}

/// Month name for a zero-based month index.
pub fn localized_month_name(month: u32, locale: Option<&str>, short: bool) -> String {
    let config = locale_config(locale);
    let names = if short { &config.month_names_short } else { &config.month_names };
    names.get((month % 12) as usize).cloned().unwrap_or_default()
}

/// Weekday name, 0 being Sunday.
pub fn localized_day_name(day: u32, locale: Option<&str>, short: bool) -> String {
    let config = locale_config(locale);
    let names = if short { &config.day_names_short } else { &config.day_names };
    names.get((day % 7) as usize).cloned().unwrap_or_default()
}

/// Rotates a Sunday-first list of seven entries so it starts at `first_day`.
pub fn adjust_days_for_week_start<T: Clone>(days: &[T], first_day: Weekday) -> Vec<T> {
    if days.is_empty() {
        return Vec::new();
    }
    let shift = first_day.num_days_from_sunday() as usize % days.len();
    days[shift..].iter().chain(&days[..shift]).cloned().collect()
}
