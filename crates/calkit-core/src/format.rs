//! Locale-aware date formatting.

use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};
use tracing::warn;

use crate::locale::{DEFAULT_LOCALE, resolve_chrono_locale};

/// Pattern used when none is given: two-digit month and day, full year.
pub const DEFAULT_DATE_PATTERN: &str = "%m/%d/%Y";

/// Formats `date` with a strftime `pattern` in `locale`.
///
/// Defaults to [`DEFAULT_DATE_PATTERN`] and `en-US`. A pattern chrono cannot
/// parse is replaced by the default instead of failing.
pub fn format_date(date: &NaiveDateTime, pattern: Option<&str>, locale: Option<&str>) -> String {
    let mut pattern = pattern.unwrap_or(DEFAULT_DATE_PATTERN);
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        warn!(pattern = %pattern, "invalid date pattern, using default");
        pattern = DEFAULT_DATE_PATTERN;
    }
    let locale = resolve_chrono_locale(locale.unwrap_or(DEFAULT_LOCALE));
    date.and_utc().format_localized(pattern, locale).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    #[test]
    fn default_pattern_is_us_numeric() {
        assert_eq!(format_date(&at(2024, 1, 5), None, None), "01/05/2024");
    }

    #[test]
    fn custom_pattern() {
        assert_eq!(
            format_date(&at(2024, 3, 15), Some("%Y-%m-%d %H:%M"), None),
            "2024-03-15 09:05"
        );
    }

    #[test]
    fn localized_month_names() {
        assert_eq!(
            format_date(&at(2024, 3, 15), Some("%d %B %Y"), Some("en-US")),
            "15 March 2024"
        );
        assert_eq!(
            format_date(&at(2024, 3, 15), Some("%B"), Some("de-DE")),
            "März"
        );
    }

    #[test]
    fn invalid_pattern_falls_back() {
        assert_eq!(format_date(&at(2024, 1, 5), Some("%Q"), None), "01/05/2024");
    }
}
