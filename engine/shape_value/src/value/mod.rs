//! Runtime values tested by the matcher.
//!
//! # Heap Enforcement
//!
//! Heap payloads live behind `Heap<T>`, whose constructor is private to this
//! module. Build values through the factory methods:
//!
//! ```text
//! let s = Value::string("BMW");                       // OK
//! let row = Value::object([("Year", Value::from(2007))]); // OK
//! let s = Value::Str(Heap::new(...));                 // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Callables
//!
//! Two variants stand in for values that are computed on demand:
//! - `Accessor`: a zero-argument callable, optionally bound to the entity it
//!   was reached through
//! - `Entity`: a keyed resolver (`FieldSource`) that produces a named
//!   attribute, possibly as a `name`/`value` pair record
//!
//! Values are never mutated once built; "computing" only ever produces new
//! values.

mod computed;
mod heap;
mod json;

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::MatchResult;

pub use computed::{Accessor, FieldSource, PairRecord};
pub use heap::Heap;

/// Runtime value tested against a `Pattern`.
#[derive(Clone, Default)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Absent or empty result.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value. `NaN` is representable but never equal to anything.
    Number(f64),

    // Heap Types
    /// String value.
    Str(Heap<str>),
    /// Ordered sequence of values.
    List(Heap<Vec<Value>>),
    /// Mapping from string keys to values, iterated in key order.
    Map(Heap<BTreeMap<String, Value>>),
    /// A `name`/`value` pair record, as produced by record fields.
    Pair(Heap<PairRecord>),

    // Computed
    /// Zero-argument callable resolved on demand.
    Accessor(Accessor),
    /// Computed entity exposing named attributes through a resolver.
    Entity(Heap<dyn FieldSource>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        let owned: String = s.into();
        Value::Str(Heap::from_arc(Arc::from(owned)))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a map value.
    #[inline]
    pub fn map(entries: BTreeMap<String, Value>) -> Self {
        Value::Map(Heap::new(entries))
    }

    /// Create a map value from `(key, value)` entries.
    ///
    /// ```text
    /// let car = Value::object([("Make", Value::string("BMW")), ("Year", Value::from(2007))]);
    /// ```
    pub fn object<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Value::map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Create a `name`/`value` pair record.
    ///
    /// Either side may itself be an accessor.
    #[inline]
    pub fn pair(name: impl Into<Value>, value: impl Into<Value>) -> Self {
        Value::Pair(Heap::new(PairRecord::new(name.into(), value.into())))
    }

    /// Create an accessor that ignores its binding context.
    pub fn accessor<F>(f: F) -> Self
    where
        F: Fn() -> MatchResult<Value> + Send + Sync + 'static,
    {
        Value::Accessor(Accessor::new(f))
    }

    /// Create an accessor that receives the entity it was reached through.
    pub fn bound_accessor<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> MatchResult<Value> + Send + Sync + 'static,
    {
        Value::Accessor(Accessor::bound(f))
    }

    /// Create a computed entity.
    pub fn entity<S>(source: S) -> Self
    where
        S: FieldSource + 'static,
    {
        let shared: Arc<dyn FieldSource> = Arc::new(source);
        Value::Entity(Heap::from_arc(shared))
    }
}

// Value Methods

impl Value {
    /// Get the type name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Pair(_) => "pair",
            Value::Accessor(_) => "accessor",
            Value::Entity(source) => source.type_name(),
        }
    }

    /// Whether this value is a primitive (neither composite nor callable).
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_)
        )
    }

    /// Whether this value must be invoked to obtain its content.
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Accessor(_) | Value::Entity(_))
    }

    /// Try to view as a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to view as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to view as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to view as a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a directly held attribute.
    ///
    /// Maps yield their entries, pair records yield `name` and `value`, and
    /// entities yield their own members. Computed attributes of an entity are
    /// not reached here; see `FieldSource::resolve`.
    pub fn field(&self, key: &str) -> Option<Value> {
        match self {
            Value::Map(entries) => entries.get(key).cloned(),
            Value::Pair(pair) => pair.field(key).cloned(),
            Value::Entity(source) => source.member(key),
            _ => None,
        }
    }

    /// Split a pair record into its `(name, value)` sides.
    ///
    /// A map holding both a `name` and a `value` key counts as a pair record.
    pub fn pair_parts(&self) -> Option<(Value, Value)> {
        match self {
            Value::Pair(pair) => Some((pair.name().clone(), pair.value().clone())),
            Value::Map(entries) => match (entries.get("name"), entries.get("value")) {
                (Some(name), Some(value)) => Some((name.clone(), value.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    /// Invoke an accessor with the given binding context; any other value
    /// resolves to itself.
    pub fn resolve(&self, context: Option<&Value>) -> MatchResult<Value> {
        match self {
            Value::Accessor(accessor) => accessor.call(context),
            _ => Ok(self.clone()),
        }
    }

    /// Display value for user output (strings unquoted).
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            _ => self.to_string(),
        }
    }
}

// Trait Implementations

impl PartialEq for Value {
    /// Structural equality on data, identity on callables.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "strict equality is the contract")]
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Pair(a), Value::Pair(b)) => a == b,
            (Value::Accessor(a), Value::Accessor(b)) => Accessor::ptr_eq(a, b),
            (Value::Entity(a), Value::Entity(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::List(items) => write!(f, "List({:?})", &**items),
            Value::Map(entries) => write!(f, "Map({:?})", &**entries),
            Value::Pair(pair) => write!(f, "Pair({:?})", &**pair),
            Value::Accessor(_) => write!(f, "Accessor"),
            Value::Entity(source) => write!(f, "Entity({})", source.type_name()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "\"{}\"", &**s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{k}\": {v}")?;
                }
                write!(f, "}}")
            }
            Value::Pair(pair) => write!(f, "{{name: {}, value: {}}}", pair.name(), pair.value()),
            Value::Accessor(_) => write!(f, "<accessor>"),
            Value::Entity(source) => write!(f, "<{}>", source.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}
