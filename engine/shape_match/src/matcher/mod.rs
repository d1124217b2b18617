//! The structural match predicate.
//!
//! `matches(value, pattern)` decides whether a value conforms to a pattern.
//! The precedence is fixed:
//!
//! 1. Kind wildcards admit primitives of their kind (`NaN` is not a number).
//! 2. A sequence of pair records against a sequence of pair patterns matches
//!    if ANY value pair matches ANY pattern pair on both `name` and `value`.
//! 3. Any other sequence pattern broadcasts its first element over every
//!    element of the value, which must be a sequence.
//! 4. A primitive value only matches an equal literal.
//! 5. An accessor value is resolved (bound to the current context) and the
//!    result is matched; a pattern accessor on the other side is resolved too.
//!    Kind wildcards never resolve accessors, so a lazy member only passes
//!    `Pattern::STRING` and friends if it is itself a primitive.
//! 6. Mappings, pair records and entities match field patterns: every key of
//!    the pattern must match, extra keys on the value are ignored.
//!
//! "No match" is `Ok(false)`. An `Err` only comes from a user accessor or
//! entity resolver and is returned as-is.
//!
//! Recursion follows the shape of the inputs with no depth limit; deeply
//! nested values or patterns can exhaust the stack.

use shape_value::{MatchResult, Pattern, Value};
use smallvec::SmallVec;
use tracing::trace;

/// Inline capacity for pair lists; attribute lists are usually short.
type Pairs<T> = SmallVec<[T; 8]>;

/// Decide whether `value` structurally matches `pattern`.
pub fn matches(value: &Value, pattern: &Pattern) -> MatchResult<bool> {
    matches_in(value, pattern, None)
}

/// Decide whether `value` matches `pattern`, with `context` as the binding
/// for any accessor invoked at the top of `value`.
pub fn matches_in(value: &Value, pattern: &Pattern, context: Option<&Value>) -> MatchResult<bool> {
    match pattern {
        Pattern::Kind(kind) => Ok(kind.admits(value)),
        Pattern::Seq(elements) => match_sequence(value, elements),
        Pattern::Literal(_) | Pattern::Pair(_) | Pattern::Fields(_) | Pattern::Accessor(_) => {
            match value {
                Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_) => {
                    Ok(matches!(pattern, Pattern::Literal(lit) if lit.strict_eq(value)))
                }
                Value::Accessor(accessor) => {
                    let resolved = accessor.call(context)?;
                    let pattern = pattern.resolve()?;
                    matches_in(&resolved, &pattern, None)
                }
                // Sequences are only described by sequence patterns
                Value::List(_) => Ok(false),
                Value::Map(_) | Value::Pair(_) | Value::Entity(_) => {
                    match_mapping(value, pattern, context)
                }
            }
        }
    }
}

/// Steps 2 and 3: pair-sequence existential match, then broadcast.
fn match_sequence(value: &Value, elements: &[Pattern]) -> MatchResult<bool> {
    let Value::List(items) = value else {
        return Ok(false);
    };

    let value_pairs: Option<Pairs<(Value, Value)>> = items.iter().map(Value::pair_parts).collect();
    let pattern_pairs: Option<Pairs<(&Pattern, &Pattern)>> =
        elements.iter().map(Pattern::pair_parts).collect();
    if let (Some(value_pairs), Some(pattern_pairs)) = (value_pairs, pattern_pairs) {
        return any_pair_matches(&value_pairs, &pattern_pairs);
    }

    // Only the first element is the template; the rest are ignored
    let Some(template) = elements.first() else {
        trace!("sequence pattern has no template");
        return Ok(false);
    };
    for item in items.iter() {
        if !matches_in(item, template, None)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Existential pair matching: some value pair matches some pattern pair.
fn any_pair_matches(
    value_pairs: &[(Value, Value)],
    pattern_pairs: &[(&Pattern, &Pattern)],
) -> MatchResult<bool> {
    for (name, value) in value_pairs {
        let name = name.resolve(None)?;
        let value = value.resolve(None)?;
        for (name_pattern, value_pattern) in pattern_pairs {
            if matches_in(&name, &*name_pattern.resolve()?, None)?
                && matches_in(&value, &*value_pattern.resolve()?, None)?
            {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Step 6: every key of a field pattern must match.
fn match_mapping(value: &Value, pattern: &Pattern, context: Option<&Value>) -> MatchResult<bool> {
    match pattern {
        Pattern::Fields(entries) => {
            for (key, sub) in entries {
                let Some(sub) = sub else {
                    trace!(key = key.as_str(), "pattern key is undefined");
                    return Ok(false);
                };
                if !match_field(value, key, sub, context)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        Pattern::Pair(pair) => Ok(match_field(value, "name", &pair.name, context)?
            && match_field(value, "value", &pair.value, context)?),
        Pattern::Accessor(_) => match_mapping(value, &*pattern.resolve()?, context),
        Pattern::Kind(_) | Pattern::Literal(_) | Pattern::Seq(_) => Ok(false),
    }
}

/// Match one key of a field pattern against a mapping, pair or entity.
fn match_field(
    value: &Value,
    key: &str,
    pattern: &Pattern,
    context: Option<&Value>,
) -> MatchResult<bool> {
    // Callable own members see the enclosing value as their context
    if let Some(member) = value.field(key) {
        if member.is_callable() {
            return matches_in(&member, pattern, Some(value));
        }
        if !matches!(value, Value::Entity(_)) {
            return matches_in(&member, pattern, None);
        }
    }

    match value {
        Value::Entity(source) => {
            let attribute = source.resolve(key, context)?;
            match attribute.pair_parts() {
                Some((_, field_value)) => {
                    let resolved = field_value.resolve(Some(&attribute))?;
                    matches_in(&resolved, pattern, None)
                }
                None => matches_in(&attribute, pattern, None),
            }
        }
        _ => {
            trace!(key, "value has no such key");
            Ok(false)
        }
    }
}

/// A structural match decision, as used by the clause evaluator.
///
/// `Structural` is the engine's matcher. Other implementations exist to
/// observe or wrap it, such as counting how often a clause's pattern is
/// actually tested.
pub trait Matcher {
    /// Decide whether `value` matches `pattern`.
    fn matches(&self, value: &Value, pattern: &Pattern) -> MatchResult<bool>;
}

/// The structural matcher.
#[derive(Copy, Clone, Debug, Default)]
pub struct Structural;

impl Matcher for Structural {
    #[inline]
    fn matches(&self, value: &Value, pattern: &Pattern) -> MatchResult<bool> {
        matches(value, pattern)
    }
}

#[cfg(test)]
mod tests;
