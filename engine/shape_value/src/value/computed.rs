//! Computed values: accessors, pair records and the computed-entity contract.

use std::fmt;
use std::sync::Arc;

use super::{Heap, Value};
use crate::errors::MatchResult;

/// Signature of an accessor: invoked with the entity it was reached through,
/// if any.
type AccessorFn = dyn Fn(Option<&Value>) -> MatchResult<Value> + Send + Sync;

/// A zero-argument callable standing in for a value.
///
/// The optional argument is the binding context: when the matcher reaches an
/// accessor as a field of a mapping or entity, it passes that container so the
/// accessor can tell which record it belongs to. Accessors built with
/// `Accessor::new` ignore it.
#[derive(Clone)]
pub struct Accessor(Heap<AccessorFn>);

impl Accessor {
    /// Wrap a context-free callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> MatchResult<Value> + Send + Sync + 'static,
    {
        let inner: Arc<AccessorFn> = Arc::new(move |_context: Option<&Value>| f());
        Accessor(Heap::from_arc(inner))
    }

    /// Wrap a callable that receives its binding context.
    pub fn bound<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> MatchResult<Value> + Send + Sync + 'static,
    {
        let inner: Arc<AccessorFn> = Arc::new(f);
        Accessor(Heap::from_arc(inner))
    }

    /// Invoke the accessor.
    #[inline]
    pub fn call(&self, context: Option<&Value>) -> MatchResult<Value> {
        (self.0)(context)
    }

    /// Whether two accessors are the same callable.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Heap::ptr_eq(&a.0, &b.0)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Accessor")
    }
}

/// A `{ name, value }` record.
///
/// Sequences made only of pair records are matched existentially: one pair
/// in the value corresponding to one pair in the pattern is enough.
#[derive(Clone, Debug, PartialEq)]
pub struct PairRecord {
    name: Value,
    value: Value,
}

impl PairRecord {
    /// Create a pair record. Either side may be an accessor.
    pub fn new(name: Value, value: Value) -> Self {
        PairRecord { name, value }
    }

    /// The `name` side, unresolved.
    pub fn name(&self) -> &Value {
        &self.name
    }

    /// The `value` side, unresolved.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Look up `name` or `value` by key.
    pub fn field(&self, key: &str) -> Option<&Value> {
        match key {
            "name" => Some(&self.name),
            "value" => Some(&self.value),
            _ => None,
        }
    }
}

/// The computed-entity contract.
///
/// A record model that wants field-pattern matching without materialising a
/// map implements this trait and is wrapped with `Value::entity`. The matcher
/// asks `member` first for a callable own member (such as a `field` view),
/// then falls back to `resolve` for the named attribute.
pub trait FieldSource: Send + Sync {
    /// Resolve the attribute `key`.
    ///
    /// May return the attribute directly or as a pair record, whose `value`
    /// side the matcher resolves before comparison. `context` is the entity
    /// this source was reached through, when the matcher has one.
    fn resolve(&self, key: &str, context: Option<&Value>) -> MatchResult<Value>;

    /// An own member of the entity, looked up before `resolve`.
    fn member(&self, _key: &str) -> Option<Value> {
        None
    }

    /// Attribute names in projection order.
    fn keys(&self) -> Vec<String> {
        Vec::new()
    }

    /// Type name for diagnostics.
    fn type_name(&self) -> &'static str {
        "entity"
    }
}
