//! The `int-tel-input` field type.

use crate::{
    assets::{
        INIT_SCRIPT_HANDLE, SCRIPT_HANDLE, STYLE_HANDLE, THEME_STYLE_HANDLE, UTILS_SCRIPT_PATH,
    },
    controls::{self, FieldControl},
    form::{ErrorReporter, FormContext, FormRecord, SubmittedField},
    options::WidgetOptions,
    registrar::{FieldRegistrar, FieldType},
    settings::FieldSettings,
    view,
};
use intl_tel_core::{
    Map, SharedString,
    error::Error,
    extension::JsonObjectExt,
    i18n::Intl,
    validation::{InvalidPhoneNumber, PhoneNumberValidator, Validator},
};
use minijinja::context;
use phonenumber::country::Id;

/// Type id of the field.
pub const FIELD_TYPE: &str = "int-tel-input";

/// Display name of the field.
pub const FIELD_NAME: &str = "Int Tel Input";

/// Public message of a rejected phone number.
pub const INVALID_MESSAGE: &str = "Phone number invalid.";

/// Outcome of validating a phone candidate.
#[derive(Debug)]
pub enum ValidationOutcome {
    /// The candidate is empty or a valid phone number.
    Accepted,
    /// The candidate is rejected for the reason.
    Rejected(InvalidPhoneNumber),
}

impl ValidationOutcome {
    /// Returns `true` if the candidate is accepted.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns `true` if the candidate is rejected.
    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns the internal reason of the rejection.
    #[inline]
    pub fn reason(&self) -> Option<&InvalidPhoneNumber> {
        match self {
            Self::Accepted => None,
            Self::Rejected(reason) => Some(reason),
        }
    }

    /// Returns the public message of the rejection.
    /// Both rejection reasons share the same message.
    #[inline]
    pub fn message(&self) -> Option<&'static str> {
        self.is_rejected().then_some(INVALID_MESSAGE)
    }
}

/// Validates a phone candidate against the default region.
///
/// An empty candidate is accepted without calling the parser,
/// since the required rule is enforced by the hosting form.
pub fn validate_candidate(candidate: &str, default_region: Id) -> ValidationOutcome {
    if candidate.is_empty() {
        return ValidationOutcome::Accepted;
    }
    match PhoneNumberValidator::with_region(default_region).validate(candidate) {
        Ok(()) => ValidationOutcome::Accepted,
        Err(reason) => ValidationOutcome::Rejected(reason),
    }
}

/// The international telephone input field.
#[derive(Debug, Clone, Default)]
pub struct IntTelInputField {
    /// Field settings.
    settings: FieldSettings,
}

impl IntTelInputField {
    /// Creates a new instance with the settings.
    #[inline]
    pub fn new(settings: FieldSettings) -> Self {
        Self { settings }
    }

    /// Registers the field type to the registrar.
    #[inline]
    pub fn register(registrar: &mut FieldRegistrar, settings: FieldSettings) {
        registrar.register(Box::new(Self::new(settings)));
    }

    /// Returns the settings.
    #[inline]
    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    /// Validates the value with the region resolved from the field item settings.
    #[inline]
    pub fn validate_value(&self, value: &str, item: &Map) -> ValidationOutcome {
        validate_candidate(value, self.settings.resolve_region(item))
    }

    /// Returns the widget options of the field item.
    #[inline]
    pub fn widget_options(&self, item: &Map) -> WidgetOptions {
        WidgetOptions::from_item(item, self.settings.asset_url(UTILS_SCRIPT_PATH))
    }

    /// Returns the message of a rejected candidate.
    /// It is translated only if the field locale is set explicitly.
    pub fn rejection_message(&self) -> SharedString {
        match self.settings.explicit_locale() {
            Some(locale) => Intl::translate_or(locale, "phone-number-invalid", INVALID_MESSAGE),
            None => INVALID_MESSAGE.into(),
        }
    }
}

impl FieldType for IntTelInputField {
    #[inline]
    fn field_type(&self) -> &'static str {
        FIELD_TYPE
    }

    #[inline]
    fn name(&self) -> SharedString {
        Intl::translate_or(self.settings.locale(), FIELD_TYPE, FIELD_NAME)
    }

    #[inline]
    fn depended_scripts(&self) -> &[&'static str] {
        &[SCRIPT_HANDLE, INIT_SCRIPT_HANDLE]
    }

    #[inline]
    fn depended_styles(&self) -> &[&'static str] {
        &[STYLE_HANDLE, THEME_STYLE_HANDLE]
    }

    fn render(
        &self,
        item: &Map,
        item_index: usize,
        form: &mut FormContext,
    ) -> Result<String, Error> {
        let element = format!("input{item_index}");
        let label_for = format!("{}{item_index}", form.form_id());
        form.add_render_attribute(&element, "class", "elementor-field-textual");
        form.add_render_attribute(&element, "for", label_for);
        form.add_render_attribute(&element, "type", "tel");
        form.add_render_attribute(&element, "inputmode", "numeric");
        form.add_render_attribute(&element, "maxlength", "19");
        if form.get_render_attribute(&element, "id").is_none() {
            if let Some(custom_id) = item.parse_string("custom_id") {
                form.set_render_attribute(&element, "id", format!("form-field-{custom_id}"));
            }
        }

        let options = self.widget_options(item);
        let context = context! {
            attributes => form.render_attributes(&element),
            options => options,
        };
        view::render(view::INPUT_TEMPLATE, context)
            .map_err(|err| err.wrap(format!("fail to render the `{FIELD_TYPE}` field")))
    }

    fn validate(
        &self,
        field: &SubmittedField,
        _record: &FormRecord,
        reporter: &mut dyn ErrorReporter,
    ) {
        let outcome = self.validate_value(field.value(), field.settings());
        if let ValidationOutcome::Rejected(reason) = outcome {
            tracing::debug!(
                field_id = field.id(),
                parse_failed = reason.is_parse_failed(),
                "phone number rejected: {reason}"
            );
            let message = self.rejection_message();
            reporter.add_error_message(message.clone());
            reporter.add_error(field.id(), message);
        }
    }

    #[inline]
    fn controls(&self) -> Vec<FieldControl> {
        controls::field_controls(FIELD_TYPE, self.settings.locale())
    }

    fn content_template(&self, item: &Map, item_index: usize) -> Result<String, Error> {
        let context = context! {
            index => item_index,
            css_classes => item.get_str("css_classes").unwrap_or_default().trim(),
        };
        view::render(view::PREVIEW_TEMPLATE, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{form::SubmissionErrors, settings::RegionSource};
    use intl_tel_core::{
        extension::TomlTableExt,
        json,
        state::{Env, State},
    };
    use std::path::Path;

    #[test]
    fn it_accepts_empty_candidates() {
        for region in [Id::EC, Id::ES, Id::US] {
            let outcome = validate_candidate("", region);
            assert!(outcome.is_accepted());
            assert_eq!(outcome.message(), None);
        }
    }

    #[test]
    fn it_accepts_valid_numbers() {
        let outcome = validate_candidate("+34911223344", Id::EC);
        assert!(outcome.is_accepted());
        assert!(outcome.reason().is_none());
    }

    #[test]
    fn it_rejects_invalid_numbers() {
        let outcome = validate_candidate("12345", Id::EC);
        assert!(outcome.is_rejected());
        assert!(outcome.reason().is_some_and(|reason| reason.is_invalid_for_region()));
        assert_eq!(outcome.message(), Some("Phone number invalid."));

        let outcome = validate_candidate("not-a-number", Id::EC);
        assert!(outcome.reason().is_some_and(|reason| reason.is_parse_failed()));
        assert_eq!(outcome.message(), Some("Phone number invalid."));
    }

    #[test]
    fn it_validates_candidates_idempotently() {
        for candidate in ["+34911223344", "12345", "not-a-number", ""] {
            let first = validate_candidate(candidate, Id::EC);
            let second = validate_candidate(candidate, Id::EC);
            assert_eq!(first.is_accepted(), second.is_accepted());
            assert_eq!(first.message(), second.message());
        }
    }

    #[test]
    fn it_reports_rejections_once() {
        let field = IntTelInputField::default();
        let record = FormRecord::new();

        let mut errors = SubmissionErrors::new();
        field.validate(&SubmittedField::new("phone", "12345"), &record, &mut errors);
        assert_eq!(errors.messages().len(), 1);
        assert_eq!(errors.field_errors().len(), 1);
        assert_eq!(errors.field_errors().invalid_params(), ["phone"]);

        let map = errors.into_map();
        assert_eq!(map.get("messages"), Some(&json!(["Phone number invalid."])));
        assert_eq!(
            map.get_object("errors").and_then(|errors| errors.get_str("phone")),
            Some("Phone number invalid.")
        );

        let mut errors = SubmissionErrors::new();
        field.validate(&SubmittedField::new("phone", ""), &record, &mut errors);
        field.validate(&SubmittedField::new("phone", "+34911223344"), &record, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn it_keeps_the_english_message_with_the_shipped_prod_config() {
        let config_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config");
        let mut state = State::new(Env::Prod);
        state.load_config(&config_dir).unwrap();
        let default_locale = state
            .get_config("i18n")
            .and_then(|i18n| i18n.get_str("default-locale"));
        assert!(default_locale.is_some());

        let field = IntTelInputField::new(FieldSettings::from_state(&state));
        let mut errors = SubmissionErrors::new();
        field.validate(&SubmittedField::new("phone", "12345"), &FormRecord::new(), &mut errors);
        let map = errors.into_map();
        assert_eq!(map.get("messages"), Some(&json!(["Phone number invalid."])));
        assert_eq!(
            map.get_object("errors").and_then(|errors| errors.get_str("phone")),
            Some("Phone number invalid.")
        );
    }

    #[test]
    fn it_translates_the_message_for_an_explicit_locale() {
        let mut settings = FieldSettings::new();
        settings.set_locale("es-ES");
        let field = IntTelInputField::new(settings);
        assert_eq!(field.rejection_message(), "Número de teléfono no válido.");
        assert_eq!(IntTelInputField::default().rejection_message(), INVALID_MESSAGE);
    }

    #[test]
    fn it_uses_the_configured_default_region() {
        let mut settings = FieldSettings::new();
        settings.set_default_region(Id::ES);
        let field = IntTelInputField::new(settings);
        assert!(field.validate_value("612345678", &Map::new()).is_accepted());
        assert!(field.validate_value("+34911223344", &Map::new()).is_accepted());
        assert!(field.validate_value("12345", &Map::new()).is_rejected());
    }

    #[test]
    fn it_uses_the_initial_country_when_configured() {
        let item = Map::from_entry("initial-country", "es");
        let field = IntTelInputField::default();
        assert!(field.validate_value("612345678", &item).is_rejected());

        let mut settings = FieldSettings::new();
        settings.set_region_source(RegionSource::InitialCountry);
        let field = IntTelInputField::new(settings);
        assert!(field.validate_value("612345678", &item).is_accepted());
        assert!(field.validate_value("612345678", &Map::new()).is_rejected());
    }

    #[test]
    fn it_renders_the_input_markup() {
        let field = IntTelInputField::default();
        let mut form = FormContext::new("contact");
        let item = json!({
            "custom_id": "phone",
            "exclude-countries": "us,ca",
            "preferred-countries": "",
        });
        let markup = field.render(item.as_object().unwrap(), 0, &mut form).unwrap();
        assert!(markup.starts_with(concat!(
            r#"<input class="elementor-field-textual" for="contact0" type="tel" "#,
            r#"inputmode="numeric" maxlength="19" id="form-field-phone" "#,
            r#"data-intl-tel-input='{"utilsScript":"assets/js/utils.js","allowDropdown":true,"#,
        )));
        assert!(markup.contains(r#""excludeCountries":["us","ca"]"#));
        assert!(!markup.contains("preferredCountries"));
        assert!(markup.ends_with("}'>"));
        assert_eq!(form.get_render_attribute("input0", "type"), Some("tel"));
    }

    #[test]
    fn it_renders_the_editor_preview() {
        let field = IntTelInputField::default();
        let item = Map::from_entry("css_classes", "phone-field");
        assert_eq!(
            field.content_template(&item, 3).unwrap(),
            r#"<input type="tel" id="form_field_3" class="elementor-field-textual elementor-field phone-field">"#
        );
    }

    #[test]
    fn it_registers_the_field_type() {
        let mut registrar = FieldRegistrar::new();
        IntTelInputField::register(&mut registrar, FieldSettings::new());
        assert!(registrar.contains("int-tel-input"));

        let field = registrar.get(FIELD_TYPE).unwrap();
        assert_eq!(field.depended_scripts(), [SCRIPT_HANDLE, INIT_SCRIPT_HANDLE]);
        assert_eq!(field.depended_styles(), [STYLE_HANDLE, THEME_STYLE_HANDLE]);

        let controls = field.controls();
        assert_eq!(controls.len(), 10);
        assert!(
            controls
                .iter()
                .all(|control| control.condition_field_type() == Some(FIELD_TYPE))
        );

        let mut stack = vec![Map::from_entry("name", "field_type")];
        assert_eq!(field.update_controls(&mut stack).unwrap(), 10);
        assert_eq!(stack.len(), 11);
    }
}
