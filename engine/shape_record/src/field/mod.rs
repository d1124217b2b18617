//! A single named, typed field of an item.

use shape_value::Value;

use crate::metadata::{FieldMetadata, FieldType};

/// A field value together with its metadata.
#[derive(Clone, Debug)]
pub struct Field {
    value: Value,
    metadata: Option<FieldMetadata>,
}

impl Field {
    /// Create a field. An absent value is stored as `Null`.
    pub fn new(value: Option<Value>, metadata: Option<FieldMetadata>) -> Self {
        Field {
            value: value.unwrap_or_default(),
            metadata,
        }
    }

    /// The field name, if the field has metadata naming it.
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.name.as_deref()
    }

    /// The display label, falling back to the name.
    pub fn label(&self) -> Option<&str> {
        let metadata = self.metadata.as_ref()?;
        metadata.label.as_deref().or(metadata.name.as_deref())
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The value rendered for people; strings are not quoted.
    pub fn display_value(&self) -> String {
        self.value.display_value()
    }

    pub fn metadata(&self) -> Option<&FieldMetadata> {
        self.metadata.as_ref()
    }

    pub fn field_type(&self) -> Option<FieldType> {
        self.metadata.as_ref()?.field_type
    }

    /// Project as a `{ name, value }` pair record whose sides are accessors.
    pub fn to_pair(&self) -> Value {
        let name = self.name().map_or(Value::Null, Value::string);
        let value = self.value.clone();
        Value::pair(
            Value::accessor(move || Ok(name.clone())),
            Value::accessor(move || Ok(value.clone())),
        )
    }
}
