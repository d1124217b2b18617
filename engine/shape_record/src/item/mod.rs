//! Items: records wrapped as ordered sequences of fields.
//!
//! An `Item` is built from a basis of `(name, value)` entries and optional
//! metadata. Each entry becomes one `Field`, in basis order, described by
//! the metadata entry of the same name (or by a bare `{ name }` when there
//! is none).
//!
//! The matcher sees an item through `Item::to_value`, which wraps it as a
//! computed entity:
//!
//! ```text
//! item.to_value()          // matches { Make: "BMW" }
//! item.to_value().field    // member view, matches { field: { Make: "BMW" } }
//! ```

mod entity;

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde_json::Value as Json;
use shape_value::{unknown_field, MatchError, MatchResult, Value};

use crate::field::Field;
use crate::metadata::{FieldMetadata, ItemMetadata};

pub use entity::field_value;
use entity::ItemEntity;

/// A record of named fields.
///
/// Cheap to clone; clones share their fields.
#[derive(Clone, Debug)]
pub struct Item {
    inner: Arc<ItemData>,
}

#[derive(Debug)]
struct ItemData {
    metadata: ItemMetadata,
    fields: Vec<Field>,
    /// Field name to position of the first field with that name.
    index: FxHashMap<String, usize>,
}

impl Item {
    /// Build an item from its basis entries.
    pub fn new<I, K>(basis: I, metadata: Option<ItemMetadata>) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let metadata = metadata.unwrap_or_default();
        let fields: Vec<Field> = basis
            .into_iter()
            .map(|(key, value)| {
                let key: String = key.into();
                let field_metadata = metadata
                    .lookup(&key)
                    .cloned()
                    .unwrap_or_else(|| FieldMetadata::named(key));
                Field::new(Some(value), Some(field_metadata))
            })
            .collect();

        let mut index = FxHashMap::default();
        for (position, field) in fields.iter().enumerate() {
            if let Some(name) = field.name() {
                index.entry(name.to_string()).or_insert(position);
            }
        }

        Item {
            inner: Arc::new(ItemData {
                metadata,
                fields,
                index,
            }),
        }
    }

    /// Build an item from a JSON object.
    pub fn from_json(json: &Json, metadata: Option<ItemMetadata>) -> MatchResult<Self> {
        let Json::Object(entries) = json else {
            return Err(MatchError::Json {
                message: format!("expected an object for an item, found {}", json_kind(json)),
            });
        };
        Ok(Item::new(
            entries.iter().map(|(k, v)| (k.as_str(), Value::from_json(v))),
            metadata,
        ))
    }

    /// All fields, in basis order.
    pub fn fields(&self) -> &[Field] {
        &self.inner.fields
    }

    /// The field with this name.
    pub fn field(&self, name: &str) -> MatchResult<&Field> {
        self.find(name).ok_or_else(|| unknown_field(name))
    }

    fn find(&self, name: &str) -> Option<&Field> {
        let position = *self.inner.index.get(name)?;
        self.inner.fields.get(position)
    }

    pub fn metadata(&self) -> &ItemMetadata {
        &self.inner.metadata
    }

    /// The field named by the metadata's identifier, if any.
    pub fn identifier(&self) -> Option<&Field> {
        let name = self.inner.metadata.identifier_name.as_deref()?;
        self.find(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.inner.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.fields.is_empty()
    }

    /// Wrap as a computed entity for matching.
    pub fn to_value(&self) -> Value {
        Value::entity(ItemEntity::new(self.clone()))
    }

    /// Serialize as a plain JSON object keyed by field name.
    ///
    /// Nested items, lists and mappings are projected recursively.
    pub fn to_json(&self) -> MatchResult<Json> {
        self.to_value().to_json()
    }

    /// Whether both handles share the same fields.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}
