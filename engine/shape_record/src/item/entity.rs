//! The matcher's view of an item.

use shape_value::{unknown_field, FieldSource, MatchResult, Value};

use super::Item;

/// An item as a computed entity.
///
/// Each field is an attribute resolving to its `{ name, value }` pair. The
/// `field` member is a view resolving the same pairs, for patterns shaped
/// like `{ field: { Make: "BMW" } }`.
pub(super) struct ItemEntity {
    item: Item,
}

impl ItemEntity {
    pub(super) fn new(item: Item) -> Self {
        ItemEntity { item }
    }
}

impl FieldSource for ItemEntity {
    fn resolve(&self, key: &str, _context: Option<&Value>) -> MatchResult<Value> {
        Ok(self.item.field(key)?.to_pair())
    }

    fn member(&self, key: &str) -> Option<Value> {
        (key == "field").then(|| {
            Value::entity(FieldView {
                item: self.item.clone(),
            })
        })
    }

    fn keys(&self) -> Vec<String> {
        field_names(&self.item)
    }

    fn type_name(&self) -> &'static str {
        "item"
    }
}

/// The `field` member of an item entity.
struct FieldView {
    item: Item,
}

impl FieldSource for FieldView {
    fn resolve(&self, key: &str, _context: Option<&Value>) -> MatchResult<Value> {
        Ok(self.item.field(key)?.to_pair())
    }

    fn keys(&self) -> Vec<String> {
        field_names(&self.item)
    }

    fn type_name(&self) -> &'static str {
        "field"
    }
}

fn field_names(item: &Item) -> Vec<String> {
    item.fields()
        .iter()
        .filter_map(|f| f.name().map(str::to_string))
        .collect()
}

/// Read a named attribute's resolved value.
///
/// Entities are asked through their resolver and pair records are unwrapped
/// to their `value` side; mappings and pair records yield their own entry.
pub fn field_value(value: &Value, name: &str) -> MatchResult<Value> {
    match value {
        Value::Entity(source) => {
            let attribute = source.resolve(name, Some(value))?;
            match attribute.pair_parts() {
                Some((_, inner)) => inner.resolve(Some(&attribute)),
                None => Ok(attribute),
            }
        }
        _ => value
            .field(name)
            .ok_or_else(|| unknown_field(name))?
            .resolve(Some(value)),
    }
}
