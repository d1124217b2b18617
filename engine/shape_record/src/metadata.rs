//! Field and item metadata.
//!
//! Metadata is plain data, loaded from JSON alongside records. Absent
//! optional entries are skipped when serializing.

/// The declared type of a field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Boolean,
    String,
    Integer,
    Time,
    Date,
    Timestamp,
    Duration,
    Real,
    Decimal,
    Percent,
    Length,
    List,
    Image,
    UsDollars,
    PhoneNumber,
    Map,
}

/// Metadata for a single field.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

impl FieldMetadata {
    /// Metadata carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        FieldMetadata {
            name: Some(name.into()),
            ..FieldMetadata::default()
        }
    }

    /// Set the declared type.
    #[must_use]
    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Metadata for an item: its field descriptions and where it lives.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier_name: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl ItemMetadata {
    /// Metadata with the given field descriptions.
    pub fn with_fields(fields: Vec<FieldMetadata>) -> Self {
        ItemMetadata {
            fields,
            ..ItemMetadata::default()
        }
    }

    /// The first field description with this name.
    pub fn lookup(&self, name: &str) -> Option<&FieldMetadata> {
        self.fields.iter().find(|m| m.name.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests;
