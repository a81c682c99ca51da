//! Types shared with the hosting form framework.

use ahash::{HashMap, HashMapExt};
use intl_tel_core::{JsonValue, Map, SharedString, extension::JsonObjectExt, validation::Validation};
use serde::Serialize;

/// A field value submitted with a form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubmittedField {
    /// Field id.
    id: String,
    /// Raw value.
    value: String,
    /// Editor settings of the field item.
    settings: Map,
}

impl SubmittedField {
    /// Creates a new instance.
    #[inline]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            settings: Map::new(),
        }
    }

    /// Sets the editor settings of the field item.
    #[inline]
    #[must_use]
    pub fn with_settings(mut self, settings: Map) -> Self {
        self.settings = settings;
        self
    }

    /// Returns the field id.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the raw value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the editor settings.
    #[inline]
    pub fn settings(&self) -> &Map {
        &self.settings
    }
}

/// The record of a form submission.
#[derive(Debug, Clone, Default)]
pub struct FormRecord {
    /// Submitted fields.
    fields: Vec<SubmittedField>,
    /// Extra meta data.
    meta: Map,
}

impl FormRecord {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a submitted field.
    #[inline]
    pub fn add_field(&mut self, field: SubmittedField) {
        self.fields.push(field);
    }

    /// Sets a meta entry.
    #[inline]
    pub fn set_meta(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.meta.upsert(key, value);
    }

    /// Returns the submitted fields.
    #[inline]
    pub fn fields(&self) -> &[SubmittedField] {
        &self.fields
    }

    /// Returns the submitted field with the id.
    #[inline]
    pub fn get_field(&self, id: &str) -> Option<&SubmittedField> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// Returns the meta data.
    #[inline]
    pub fn meta(&self) -> &Map {
        &self.meta
    }
}

/// Collects errors of a form submission.
pub trait ErrorReporter {
    /// Adds a message to the submission-level error list.
    fn add_error_message(&mut self, message: SharedString);

    /// Adds an error message for the field.
    fn add_error(&mut self, field_id: &str, message: SharedString);
}

/// Errors of a form submission.
#[derive(Debug, Default)]
pub struct SubmissionErrors {
    /// Submission-level messages.
    messages: Vec<SharedString>,
    /// Field-level errors.
    field_errors: Validation,
}

impl SubmissionErrors {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the submission-level messages.
    #[inline]
    pub fn messages(&self) -> &[SharedString] {
        &self.messages
    }

    /// Returns the field-level errors.
    #[inline]
    pub fn field_errors(&self) -> &Validation {
        &self.field_errors
    }

    /// Returns `true` if there are no errors.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.field_errors.is_success()
    }

    /// Consumes `self` and returns the response payload
    /// with the `messages` list and the `errors` map keyed by field id.
    pub fn into_map(self) -> Map {
        let mut map = Map::new();
        let messages = self
            .messages
            .into_iter()
            .map(|message| message.into_owned())
            .collect::<Vec<_>>();
        map.upsert("messages", messages);
        map.upsert("errors", self.field_errors.into_map());
        map
    }
}

impl ErrorReporter for SubmissionErrors {
    #[inline]
    fn add_error_message(&mut self, message: SharedString) {
        self.messages.push(message);
    }

    #[inline]
    fn add_error(&mut self, field_id: &str, message: SharedString) {
        self.field_errors.record(field_id.to_owned(), message);
    }
}

/// An HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Name.
    name: String,
    /// Value.
    value: String,
}

impl Attribute {
    /// Returns the name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Render context of a form widget.
#[derive(Debug, Clone)]
pub struct FormContext {
    /// Form id.
    form_id: String,
    /// Render attributes by element.
    render_attributes: HashMap<String, Vec<Attribute>>,
}

impl FormContext {
    /// Creates a new instance.
    #[inline]
    pub fn new(form_id: impl Into<String>) -> Self {
        Self {
            form_id: form_id.into(),
            render_attributes: HashMap::new(),
        }
    }

    /// Returns the form id.
    #[inline]
    pub fn form_id(&self) -> &str {
        &self.form_id
    }

    /// Adds a render attribute to the element.
    /// A value is appended with a space if the attribute exists.
    pub fn add_render_attribute(&mut self, element: &str, name: &str, value: impl Into<String>) {
        let value = value.into();
        let attributes = self.render_attributes.entry(element.to_owned()).or_default();
        if let Some(attribute) = attributes.iter_mut().find(|attr| attr.name == name) {
            if !value.is_empty() {
                if !attribute.value.is_empty() {
                    attribute.value.push(' ');
                }
                attribute.value.push_str(&value);
            }
        } else {
            attributes.push(Attribute {
                name: name.to_owned(),
                value,
            });
        }
    }

    /// Sets a render attribute of the element, replacing the existing value.
    pub fn set_render_attribute(&mut self, element: &str, name: &str, value: impl Into<String>) {
        let value = value.into();
        let attributes = self.render_attributes.entry(element.to_owned()).or_default();
        if let Some(attribute) = attributes.iter_mut().find(|attr| attr.name == name) {
            attribute.value = value;
        } else {
            attributes.push(Attribute {
                name: name.to_owned(),
                value,
            });
        }
    }

    /// Returns the value of a render attribute.
    pub fn get_render_attribute(&self, element: &str, name: &str) -> Option<&str> {
        self.render_attributes(element)
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns the render attributes of the element in insertion order.
    #[inline]
    pub fn render_attributes(&self, element: &str) -> &[Attribute] {
        self.render_attributes
            .get(element)
            .map(|attributes| attributes.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorReporter, FormContext, FormRecord, SubmissionErrors, SubmittedField};
    use intl_tel_core::{extension::JsonObjectExt, json};

    #[test]
    fn it_collects_submission_errors() {
        let mut errors = SubmissionErrors::new();
        assert!(errors.is_empty());

        errors.add_error_message("Phone number invalid.".into());
        errors.add_error("phone", "Phone number invalid.".into());
        assert!(!errors.is_empty());
        assert_eq!(errors.messages().len(), 1);
        assert!(errors.field_errors().contains_key("phone"));

        let map = errors.into_map();
        assert_eq!(map.get("messages"), Some(&json!(["Phone number invalid."])));
        assert_eq!(
            map.get_object("errors").and_then(|errors| errors.get_str("phone")),
            Some("Phone number invalid.")
        );
    }

    #[test]
    fn it_merges_render_attributes() {
        let mut form = FormContext::new("contact");
        form.add_render_attribute("input0", "class", "elementor-field");
        form.add_render_attribute("input0", "class", "elementor-field-textual");
        form.add_render_attribute("input0", "type", "tel");
        form.set_render_attribute("input0", "type", "text");
        assert_eq!(
            form.get_render_attribute("input0", "class"),
            Some("elementor-field elementor-field-textual")
        );
        assert_eq!(form.get_render_attribute("input0", "type"), Some("text"));
        assert_eq!(form.render_attributes("input0").len(), 2);
        assert!(form.render_attributes("input1").is_empty());
    }

    #[test]
    fn it_finds_submitted_fields() {
        let mut record = FormRecord::new();
        record.add_field(SubmittedField::new("phone", "+593991234567"));
        record.set_meta("page_url", "https://example.com/contact");
        assert_eq!(record.get_field("phone").map(|f| f.value()), Some("+593991234567"));
        assert!(record.get_field("email").is_none());
        assert_eq!(record.meta().get_str("page_url"), Some("https://example.com/contact"));
    }
}
