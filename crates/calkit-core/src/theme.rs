//! Color themes.
//!
//! A theme is a flat set of named colors. [`resolve_theme`] picks the light
//! or dark palette (asking the host for its color scheme in `auto` mode) and
//! applies a partial [`ThemeOverride`] on top.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Requested theme mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    /// Follow the host's color scheme.
    Auto,
}

/// A concrete color scheme reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Answers "what color scheme is the host using right now?".
pub trait AppearanceSource {
    /// The current scheme, or `None` when the host has no preference.
    fn color_scheme(&self) -> Option<ColorScheme>;
}

impl AppearanceSource for ColorScheme {
    fn color_scheme(&self) -> Option<ColorScheme> {
        Some(*self)
    }
}

/// A host without a color-scheme preference. Resolves to light.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreference;

impl AppearanceSource for NoPreference {
    fn color_scheme(&self) -> Option<ColorScheme> {
        None
    }
}

/// A fully specified palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarTheme {
    pub mode: ThemeMode,
    pub background: String,
    pub text: String,
    pub text_secondary: String,
    pub text_disabled: String,
    pub primary: String,
    pub primary_text: String,
    pub selected_background: String,
    pub selected_text: String,
    pub today_background: String,
    pub today_text: String,
    pub weekend_text: String,
    pub disabled_background: String,
    pub disabled_text: String,
    pub range_background: String,
    pub range_text: String,
    pub border_color: String,
    pub header_background: String,
    pub header_text: String,
    pub event_dot: String,
}

impl CalendarTheme {
    /// Built-in palette for light mode.
    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            background: "#FFFFFF".into(),
            text: "#000000".into(),
            text_secondary: "#666666".into(),
            text_disabled: "#CCCCCC".into(),
            primary: "#007AFF".into(),
            primary_text: "#FFFFFF".into(),
            selected_background: "#007AFF".into(),
            selected_text: "#FFFFFF".into(),
            today_background: "#E3F2FD".into(),
            today_text: "#007AFF".into(),
            weekend_text: "#666666".into(),
            disabled_background: "#F5F5F5".into(),
            disabled_text: "#CCCCCC".into(),
            range_background: "#E3F2FD".into(),
            range_text: "#000000".into(),
            border_color: "#E0E0E0".into(),
            header_background: "#FFFFFF".into(),
            header_text: "#000000".into(),
            event_dot: "#007AFF".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            background: "#1C1C1E".into(),
            text: "#FFFFFF".into(),
            text_secondary: "#8E8E93".into(),
            text_disabled: "#48484A".into(),
            primary: "#0A84FF".into(),
            primary_text: "#FFFFFF".into(),
            selected_background: "#0A84FF".into(),
            selected_text: "#FFFFFF".into(),
            today_background: "#1C3A5E".into(),
            today_text: "#0A84FF".into(),
            weekend_text: "#8E8E93".into(),
            disabled_background: "#2C2C2E".into(),
            disabled_text: "#48484A".into(),
            range_background: "#1C3A5E".into(),
            range_text: "#FFFFFF".into(),
            border_color: "#38383A".into(),
            header_background: "#1C1C1E".into(),
            header_text: "#FFFFFF".into(),
            event_dot: "#0A84FF".into(),
        }
    }

    fn colors_mut(&mut self) -> [(&'static str, &mut String); 19] {
        [
            ("background", &mut self.background),
            ("text", &mut self.text),
            ("textSecondary", &mut self.text_secondary),
            ("textDisabled", &mut self.text_disabled),
            ("primary", &mut self.primary),
            ("primaryText", &mut self.primary_text),
            ("selectedBackground", &mut self.selected_background),
            ("selectedText", &mut self.selected_text),
            ("todayBackground", &mut self.today_background),
            ("todayText", &mut self.today_text),
            ("weekendText", &mut self.weekend_text),
            ("disabledBackground", &mut self.disabled_background),
            ("disabledText", &mut self.disabled_text),
            ("rangeBackground", &mut self.range_background),
            ("rangeText", &mut self.range_text),
            ("borderColor", &mut self.border_color),
            ("headerBackground", &mut self.header_background),
            ("headerText", &mut self.header_text),
            ("eventDot", &mut self.event_dot),
        ]
    }

    /// Flat color-name to value mapping, keyed by camelCase names.
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let mut copy = self.clone();
        let map = copy
            .colors_mut()
            .into_iter()
            .map(|(name, value)| (name, std::mem::take(value)))
            .collect();
        map
    }

    /// Replaces every color the override sets.
    #[must_use]
    pub fn with_override(mut self, overrides: &ThemeOverride) -> Self {
        let overrides = overrides.to_map();
        for (name, value) in self.colors_mut() {
            if let Some(replacement) = overrides.get(name) {
                value.clone_from(replacement);
            }
        }
        self
    }
}

impl Default for CalendarTheme {
    fn default() -> Self {
        Self::light()
    }
}

/// A partial palette; unset colors keep the base theme's value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThemeOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_secondary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_disabled: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekend_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_dot: Option<String>,
}

impl ThemeOverride {
    /// The colors this override sets, keyed like [`CalendarTheme::to_map`].
    pub fn to_map(&self) -> BTreeMap<String, String> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map
                .into_iter()
                .filter_map(|(k, v)| match v {
                    serde_json::Value::String(s) => Some((k, s)),
                    _ => None,
                })
                .collect(),
            _ => BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_map().is_empty()
    }
}

/// Scheme the host currently reports, light when it has no preference.
pub fn system_theme(source: &dyn AppearanceSource) -> ColorScheme {
    source.color_scheme().unwrap_or(ColorScheme::Light)
}

/// Picks the base palette for `mode` and applies `overrides`.
///
/// In [`ThemeMode::Auto`] the returned theme's `mode` is the resolved
/// concrete scheme, never `Auto`.
pub fn resolve_theme(mode: ThemeMode, overrides: &ThemeOverride, source: &dyn AppearanceSource) -> CalendarTheme {
    let base = match mode {
        ThemeMode::Light => CalendarTheme::light(),
        ThemeMode::Dark => CalendarTheme::dark(),
        ThemeMode::Auto => match system_theme(source) {
            ColorScheme::Light => CalendarTheme::light(),
            ColorScheme::Dark => CalendarTheme::dark(),
        },
    };
    trace!(requested = ?mode, resolved = ?base.mode, "resolved theme");
    base.with_override(overrides)
}
