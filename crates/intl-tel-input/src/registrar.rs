//! Registry of the field types of a form widget.

use crate::{
    controls::{self, FieldControl},
    form::{ErrorReporter, FormContext, FormRecord, SubmittedField},
};
use ahash::{HashMap, HashMapExt};
use intl_tel_core::{Map, SharedString, error::Error, extension::JsonObjectExt};

/// A custom field type of the form widget.
pub trait FieldType: Send + Sync {
    /// Returns the unique type id.
    fn field_type(&self) -> &'static str;

    /// Returns the display name.
    fn name(&self) -> SharedString;

    /// Returns the handles of the scripts the field depends on.
    #[inline]
    fn depended_scripts(&self) -> &[&'static str] {
        &[]
    }

    /// Returns the handles of the styles the field depends on.
    #[inline]
    fn depended_styles(&self) -> &[&'static str] {
        &[]
    }

    /// Renders the field markup for the item.
    fn render(&self, item: &Map, item_index: usize, form: &mut FormContext) -> Result<String, Error>;

    /// Validates the submitted field and reports errors to the reporter.
    fn validate(
        &self,
        field: &SubmittedField,
        record: &FormRecord,
        reporter: &mut dyn ErrorReporter,
    );

    /// Returns the editor controls of the field.
    #[inline]
    fn controls(&self) -> Vec<FieldControl> {
        Vec::new()
    }

    /// Injects the editor controls into the `form_fields` control stack.
    fn update_controls(&self, stack: &mut Vec<Map>) -> Result<usize, Error> {
        controls::inject_controls(stack, &self.controls())
    }

    /// Renders the markup shown in the editor preview.
    fn content_template(&self, item: &Map, item_index: usize) -> Result<String, Error>;
}

/// Registry of field types by type id.
#[derive(Default)]
pub struct FieldRegistrar {
    field_types: HashMap<&'static str, Box<dyn FieldType>>,
}

impl FieldRegistrar {
    /// Creates a new instance.
    #[inline]
    pub fn new() -> Self {
        Self {
            field_types: HashMap::new(),
        }
    }

    /// Registers a field type. An existing entry with the same type id is replaced.
    pub fn register(&mut self, field: Box<dyn FieldType>) {
        let field_type = field.field_type();
        if self.field_types.insert(field_type, field).is_some() {
            tracing::warn!(field_type, "the previous field type is replaced");
        } else {
            tracing::info!(field_type, "field type registered");
        }
    }

    /// Returns the field type for the type id.
    #[inline]
    pub fn get(&self, field_type: &str) -> Option<&dyn FieldType> {
        self.field_types.get(field_type).map(|field| field.as_ref())
    }

    /// Returns `true` if the type id has been registered.
    #[inline]
    pub fn contains(&self, field_type: &str) -> bool {
        self.field_types.contains_key(field_type)
    }

    /// Returns the registered type ids in lexical order.
    pub fn field_types(&self) -> Vec<&'static str> {
        let mut field_types = self.field_types.keys().copied().collect::<Vec<_>>();
        field_types.sort_unstable();
        field_types
    }

    /// Validates the fields of the record with the types in their `field_type` settings.
    /// Fields whose types are not registered are skipped.
    pub fn validate_record(&self, record: &FormRecord, reporter: &mut dyn ErrorReporter) {
        for field in record.fields() {
            if let Some(field_type) = field
                .settings()
                .get_str("field_type")
                .and_then(|field_type| self.get(field_type))
            {
                field_type.validate(field, record, reporter);
            }
        }
    }
}
