//! Options of the browser-side phone input widget.

use intl_tel_core::{JsonValue, Map, error::Error, extension::JsonObjectExt};
use serde::Serialize;

/// Placeholder mode of the widget.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoPlaceholder {
    /// Sets the placeholder if the input has no placeholder attribute.
    #[default]
    Polite,
    /// Always overrides the placeholder.
    Aggressive,
    /// No placeholder.
    Off,
}

impl AutoPlaceholder {
    /// Parses the editor value. The legacy spelling `aggresive` is also accepted.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "polite" => Some(Self::Polite),
            "aggressive" | "aggresive" => Some(Self::Aggressive),
            "off" => Some(Self::Off),
            _ => None,
        }
    }

    /// Returns `self` as `&'static str`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polite => "polite",
            Self::Aggressive => "aggressive",
            Self::Off => "off",
        }
    }
}

/// Options passed as data to the widget init script.
///
/// The country settings are omitted from the payload when they are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetOptions {
    utils_script: String,
    allow_dropdown: bool,
    auto_insert_dial_code: bool,
    auto_placeholder: AutoPlaceholder,
    format_on_display: bool,
    separate_dial_code: bool,
    show_flags: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_country: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    exclude_countries: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    preferred_countries: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    only_countries: Vec<String>,
}

impl WidgetOptions {
    /// Creates a new instance with the default options.
    pub fn new(utils_script: impl Into<String>) -> Self {
        Self {
            utils_script: utils_script.into(),
            allow_dropdown: true,
            auto_insert_dial_code: false,
            auto_placeholder: AutoPlaceholder::Polite,
            format_on_display: true,
            separate_dial_code: false,
            show_flags: true,
            initial_country: None,
            exclude_countries: Vec::new(),
            preferred_countries: Vec::new(),
            only_countries: Vec::new(),
        }
    }

    /// Reads the options from the editor settings of a field item.
    /// Missing switches keep their defaults.
    pub fn from_item(item: &Map, utils_script: impl Into<String>) -> Self {
        let mut options = Self::new(utils_script);
        options.allow_dropdown = parse_switch(item, "allow-dropdown", options.allow_dropdown);
        options.auto_insert_dial_code =
            parse_switch(item, "auto-insert-dial-code", options.auto_insert_dial_code);
        options.format_on_display =
            parse_switch(item, "format-on-display", options.format_on_display);
        options.separate_dial_code =
            parse_switch(item, "separate-dial-code", options.separate_dial_code);
        options.show_flags = parse_switch(item, "show-flags", options.show_flags);
        if let Some(value) = item.parse_string("auto-placeholder") {
            match AutoPlaceholder::parse(value) {
                Some(mode) => options.auto_placeholder = mode,
                None => tracing::warn!(value, "unsupported auto placeholder mode"),
            }
        }
        if let Some(country) = item.parse_string("initial-country").map(|s| s.trim()) {
            if !country.is_empty() {
                options.initial_country = Some(country.to_owned());
            }
        }
        options.exclude_countries = parse_countries(item, "exclude-countries");
        options.preferred_countries = parse_countries(item, "preferred-countries");
        options.only_countries = parse_countries(item, "only-countries");
        options
    }

    /// Returns the `utilsScript` option.
    #[inline]
    pub fn utils_script(&self) -> &str {
        &self.utils_script
    }

    /// Returns the `autoPlaceholder` option.
    #[inline]
    pub fn auto_placeholder(&self) -> AutoPlaceholder {
        self.auto_placeholder
    }

    /// Returns the `initialCountry` option.
    #[inline]
    pub fn initial_country(&self) -> Option<&str> {
        self.initial_country.as_deref()
    }

    /// Returns the `excludeCountries` option.
    #[inline]
    pub fn exclude_countries(&self) -> &[String] {
        &self.exclude_countries
    }

    /// Serializes the options as a JSON object.
    pub fn to_json_value(&self) -> Result<JsonValue, Error> {
        serde_json::to_value(self)
            .map_err(|err| Error::with_source("fail to serialize the widget options", err))
    }

    /// Serializes the options as a JSON string.
    pub fn to_json_string(&self) -> Result<String, Error> {
        serde_json::to_string(self)
            .map_err(|err| Error::with_source("fail to serialize the widget options", err))
    }
}

/// Parses a switcher value of the editor settings.
fn parse_switch(item: &Map, key: &str, default: bool) -> bool {
    match item.get(key) {
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::Number(n)) => n.as_i64().map(|n| n != 0).unwrap_or(default),
        Some(JsonValue::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" | "1" => true,
            "" | "no" | "false" | "off" | "0" => false,
            value => {
                tracing::warn!(key, value, "unsupported switcher value");
                default
            }
        },
        _ => default,
    }
}

/// Parses a comma-separated list of countries.
fn parse_countries(item: &Map, key: &str) -> Vec<String> {
    item.parse_str_array(key)
        .map(|countries| countries.into_iter().map(|s| s.to_owned()).collect())
        .unwrap_or_default()
}
