//! Shape Value - runtime values and structural patterns.
//!
//! This crate provides:
//! - Runtime values (`Value`) as a closed tagged variant: primitives,
//!   sequences, string-keyed mappings, name/value pair records, lazy
//!   accessors and computed entities
//! - The computed-entity contract (`FieldSource`) through which an external
//!   record model exposes named attributes lazily
//! - Patterns (`Pattern`) describing the shape a value must have
//! - Error types (`MatchError`, `MatchResult`) for failures raised by
//!   user-supplied callables
//!
//! The matcher and the clause evaluator that consume these types live in
//! `shape_match`.
//!
//! # Value Types
//!
//! All heap payloads go through `Value::` factory methods and are shared via
//! `Heap<T>` (an `Arc` wrapper), so values are cheap to clone and are never
//! mutated once built.

mod errors;
mod pattern;
mod value;

pub use errors::{unknown_field, MatchError, MatchResult};
pub use pattern::{Kind, Literal, PairPattern, Pattern, PatternAccessor};
pub use value::{Accessor, FieldSource, Heap, PairRecord, Value};
