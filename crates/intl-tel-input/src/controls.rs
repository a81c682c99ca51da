//! Editor controls of the field.

use intl_tel_core::{
    JsonValue, Map,
    error::Error,
    extension::JsonObjectExt,
    i18n::{Intl, LanguageIdentifier},
};
use serde::Serialize;

/// Name of the control stack which holds the field controls.
pub const FORM_FIELDS_STACK: &str = "form_fields";

/// Tabs wrapper of the field controls.
const TABS_WRAPPER: &str = "form_fields_tabs";

/// Type of an editor control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlType {
    /// An on/off switch.
    Switcher,
    /// A drop-down list.
    Select,
    /// A single line text.
    Text,
}

/// Tab of the field settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlTab {
    /// The content tab.
    Content,
    /// The advanced tab.
    Advanced,
}

impl ControlTab {
    /// Returns the inner tab name.
    #[inline]
    pub fn inner_tab(&self) -> &'static str {
        match self {
            Self::Content => "form_fields_content_tab",
            Self::Advanced => "form_fields_advanced_tab",
        }
    }
}

/// A control declared for the editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldControl {
    name: &'static str,
    label: String,
    #[serde(rename = "type")]
    control_type: ControlType,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Map>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<JsonValue>,
    dynamic: Map,
    condition: Map,
    tab: ControlTab,
    inner_tab: &'static str,
    tabs_wrapper: &'static str,
}

impl FieldControl {
    /// Creates a new control visible only for the field type.
    pub fn new(
        field_type: &str,
        name: &'static str,
        label: impl Into<String>,
        control_type: ControlType,
        tab: ControlTab,
    ) -> Self {
        Self {
            name,
            label: label.into(),
            control_type,
            options: None,
            default: None,
            dynamic: Map::from_entry("active", true),
            condition: Map::from_entry("field_type", field_type),
            tab,
            inner_tab: tab.inner_tab(),
            tabs_wrapper: TABS_WRAPPER,
        }
    }

    /// Sets the default value.
    #[inline]
    #[must_use]
    pub fn with_default(mut self, default: impl Into<JsonValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the options of a select control.
    #[must_use]
    pub fn with_options(mut self, options: &[&str]) -> Self {
        let mut map = Map::with_capacity(options.len());
        for &option in options {
            map.upsert(option, option);
        }
        self.options = Some(map);
        self
    }

    /// Returns the control name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the control type.
    #[inline]
    pub fn control_type(&self) -> ControlType {
        self.control_type
    }

    /// Returns the tab.
    #[inline]
    pub fn tab(&self) -> ControlTab {
        self.tab
    }

    /// Returns the default value.
    #[inline]
    pub fn default_value(&self) -> Option<&JsonValue> {
        self.default.as_ref()
    }

    /// Returns the field type in the visibility condition.
    #[inline]
    pub fn condition_field_type(&self) -> Option<&str> {
        self.condition.get_str("field_type")
    }

    /// Converts `self` to a JSON object.
    pub fn to_map(&self) -> Result<Map, Error> {
        match serde_json::to_value(self)? {
            JsonValue::Object(map) => Ok(map),
            _ => Err(Error::new("the field control should be serialized as an object")),
        }
    }
}

/// Returns the controls of the `int-tel-input` field with labels in the locale.
pub fn field_controls(field_type: &str, locale: &LanguageIdentifier) -> Vec<FieldControl> {
    use ControlTab::*;
    use ControlType::*;

    let label = |message: &str, fallback: &'static str| {
        Intl::translate_or(locale, message, fallback).into_owned()
    };
    vec![
        FieldControl::new(
            field_type,
            "allow-dropdown",
            label("allow-dropdown", "Allow Dropdown"),
            Switcher,
            Advanced,
        )
        .with_default(true),
        FieldControl::new(
            field_type,
            "auto-insert-dial-code",
            label("auto-insert-dial-code", "Allow Insert Dial Code"),
            Switcher,
            Advanced,
        )
        .with_default(false),
        FieldControl::new(
            field_type,
            "auto-placeholder",
            label("auto-placeholder", "Auto Placeholder"),
            Select,
            Advanced,
        )
        .with_options(&["polite", "aggressive", "off"])
        .with_default("polite"),
        FieldControl::new(
            field_type,
            "exclude-countries",
            label("exclude-countries", "Exclude countries"),
            Text,
            Content,
        ),
        FieldControl::new(
            field_type,
            "format-on-display",
            label("format-on-display", "Format on display"),
            Switcher,
            Advanced,
        )
        .with_default(true),
        FieldControl::new(
            field_type,
            "initial-country",
            label("initial-country", "Default Country Code"),
            Text,
            Content,
        ),
        FieldControl::new(
            field_type,
            "only-countries",
            label("only-countries", "Only countries"),
            Text,
            Content,
        ),
        FieldControl::new(
            field_type,
            "preferred-countries",
            label("preferred-countries", "Preferred countries"),
            Text,
            Content,
        ),
        FieldControl::new(
            field_type,
            "separate-dial-code",
            label("separate-dial-code", "Separate Dial Code"),
            Switcher,
            Advanced,
        )
        .with_default(false),
        FieldControl::new(
            field_type,
            "show-flags",
            label("show-flags", "Show Flags"),
            Switcher,
            Content,
        )
        .with_default(true),
    ]
}

/// Injects the controls into the `form_fields` control stack.
/// Controls whose names already exist in the stack are skipped.
/// Returns the number of injected controls.
pub fn inject_controls(stack: &mut Vec<Map>, controls: &[FieldControl]) -> Result<usize, Error> {
    let mut injected = 0;
    for control in controls {
        let name = control.name();
        if stack.iter().any(|field| field.get_str("name") == Some(name)) {
            tracing::debug!(name, stack = FORM_FIELDS_STACK, "control already exists");
            continue;
        }
        stack.push(control.to_map()?);
        injected += 1;
    }
    Ok(injected)
}

#[cfg(test)]
mod tests {
    use super::{ControlTab, ControlType, field_controls, inject_controls};
    use intl_tel_core::{Map, extension::JsonObjectExt, i18n::LanguageIdentifier, json};

    fn en_us() -> LanguageIdentifier {
        "en-US".parse().unwrap()
    }

    #[test]
    fn it_declares_field_controls() {
        let controls = field_controls("int-tel-input", &en_us());
        let names = controls.iter().map(|c| c.name()).collect::<Vec<_>>();
        assert_eq!(
            names,
            [
                "allow-dropdown",
                "auto-insert-dial-code",
                "auto-placeholder",
                "exclude-countries",
                "format-on-display",
                "initial-country",
                "only-countries",
                "preferred-countries",
                "separate-dial-code",
                "show-flags",
            ]
        );
        assert!(
            controls
                .iter()
                .all(|c| c.condition_field_type() == Some("int-tel-input"))
        );

        let show_flags = &controls[9];
        assert_eq!(show_flags.label(), "Show Flags");
        assert_eq!(show_flags.control_type(), ControlType::Switcher);
        assert_eq!(show_flags.tab(), ControlTab::Content);
        assert_eq!(show_flags.default_value(), Some(&json!(true)));
    }

    #[test]
    fn it_serializes_controls() {
        let controls = field_controls("int-tel-input", &en_us());
        let map = controls[2].to_map().unwrap();
        assert_eq!(
            json!(map),
            json!({
                "name": "auto-placeholder",
                "label": "Auto Placeholder",
                "type": "select",
                "options": {
                    "polite": "polite",
                    "aggressive": "aggressive",
                    "off": "off",
                },
                "default": "polite",
                "dynamic": { "active": true },
                "condition": { "field_type": "int-tel-input" },
                "tab": "advanced",
                "inner_tab": "form_fields_advanced_tab",
                "tabs_wrapper": "form_fields_tabs",
            })
        );
        assert!(controls[3].to_map().unwrap().get("default").is_none());
    }

    #[test]
    fn it_skips_existing_controls() {
        let controls = field_controls("int-tel-input", &en_us());
        let mut stack = vec![
            Map::from_entry("name", "field_type"),
            Map::from_entry("name", "show-flags"),
        ];
        assert_eq!(inject_controls(&mut stack, &controls).unwrap(), 9);
        assert_eq!(stack.len(), 11);
        assert_eq!(inject_controls(&mut stack, &controls).unwrap(), 0);
        assert_eq!(stack[1].get_str("name"), Some("show-flags"));
        assert!(stack[1].get_str("label").is_none());
    }
}
