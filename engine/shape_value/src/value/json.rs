//! Projection between `Value` and plain JSON trees.
//!
//! Projection resolves everything computed: accessors are invoked, pair
//! records become `{ "name", "value" }` objects, and entities become objects
//! keyed by `FieldSource::keys`, each attribute unwrapped from its pair record.

use serde_json::{Map, Number, Value as Json};

use super::Value;
use crate::errors::MatchResult;

/// Largest magnitude at which every integer is exactly representable as `f64`.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

impl Value {
    /// Serialize to a plain tree of primitives, sequences and mappings.
    ///
    /// Fails only if an accessor or entity resolver fails.
    pub fn to_json(&self) -> MatchResult<Json> {
        Ok(match self {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::Str(s) => Json::String(s.to_string()),
            Value::List(items) => Json::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<MatchResult<Vec<_>>>()?,
            ),
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                    .collect::<MatchResult<Map<_, _>>>()?,
            ),
            Value::Pair(pair) => {
                let mut out = Map::new();
                out.insert("name".to_string(), pair.name().resolve(Some(self))?.to_json()?);
                out.insert("value".to_string(), pair.value().resolve(Some(self))?.to_json()?);
                Json::Object(out)
            }
            Value::Accessor(accessor) => accessor.call(None)?.to_json()?,
            Value::Entity(source) => {
                let mut out = Map::new();
                for key in source.keys() {
                    let attribute = source.resolve(&key, Some(self))?;
                    let inner = match attribute.pair_parts() {
                        Some((_, value)) => value.resolve(Some(&attribute))?,
                        None => attribute,
                    };
                    out.insert(key, inner.to_json()?);
                }
                Json::Object(out)
            }
        })
    }

    /// Build a value from a JSON tree.
    pub fn from_json(json: &Json) -> Value {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            Json::String(s) => Value::string(s.as_str()),
            Json::Array(items) => Value::list(items.iter().map(Value::from_json).collect()),
            Json::Object(entries) => Value::map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }
}

/// Integral numbers project as JSON integers; non-finite numbers as `null`.
fn number_to_json(n: f64) -> Json {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "integral and within the exactly representable range"
        )]
        let int = n as i64;
        Json::from(int)
    } else {
        Number::from_f64(n).map_or(Json::Null, Json::Number)
    }
}
