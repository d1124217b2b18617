use super::*;
use shape_value::{unknown_field, FieldSource, MatchError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn is_match(value: &Value, pattern: &Pattern) -> bool {
    matches(value, pattern).unwrap_or_else(|e| panic!("unexpected error: {e}"))
}

/// Entity resolving its attributes to `name`/`value` pairs with lazy values.
struct Car {
    make: &'static str,
    year: i32,
}

impl FieldSource for Car {
    fn resolve(&self, key: &str, _context: Option<&Value>) -> MatchResult<Value> {
        let value = match key {
            "Make" => Value::from(self.make),
            "Year" => Value::from(self.year),
            _ => return Err(unknown_field(key)),
        };
        Ok(Value::pair(key, Value::accessor(move || Ok(value.clone()))))
    }
}

fn car(make: &'static str, year: i32) -> Value {
    Value::entity(Car { make, year })
}

// Primitive wildcards

#[test]
fn test_string_wildcard() {
    assert!(is_match(&Value::from("x"), &Pattern::STRING));
    assert!(is_match(&Value::from(""), &Pattern::STRING));
    assert!(!is_match(&Value::from(1), &Pattern::STRING));
    assert!(!is_match(&Value::Null, &Pattern::STRING));
    assert!(!is_match(&Value::list(vec![]), &Pattern::STRING));
}

#[test]
fn test_boolean_wildcard() {
    assert!(is_match(&Value::from(true), &Pattern::BOOLEAN));
    assert!(is_match(&Value::from(false), &Pattern::BOOLEAN));
    assert!(!is_match(&Value::from("true"), &Pattern::BOOLEAN));
}

#[test]
fn test_number_wildcard_rejects_nan() {
    assert!(is_match(&Value::from(0), &Pattern::NUMBER));
    assert!(is_match(&Value::from(-3.5), &Pattern::NUMBER));
    assert!(!is_match(&Value::from(f64::NAN), &Pattern::NUMBER));
    assert!(!is_match(&Value::from("0"), &Pattern::NUMBER));
}

#[test]
fn test_wildcard_does_not_resolve_accessors() {
    let lazy = Value::accessor(|| Ok(Value::from("BMW")));
    assert!(!is_match(&lazy, &Pattern::STRING));
}

// Primitive equality

#[test]
fn test_literal_equality() {
    assert!(is_match(&Value::from("BMW"), &Pattern::from("BMW")));
    assert!(!is_match(&Value::from("BMW"), &Pattern::from("Honda")));
    assert!(is_match(&Value::from(2007), &Pattern::from(2007)));
    assert!(!is_match(&Value::from(2007), &Pattern::from("2007")));
    assert!(is_match(&Value::Null, &Pattern::NULL));
    assert!(!is_match(&Value::from(f64::NAN), &Pattern::from(f64::NAN)));
}

#[test]
fn test_primitive_against_structural_pattern_fails() {
    assert!(!is_match(&Value::from("BMW"), &Pattern::fields([("Make", Pattern::STRING)])));
    assert!(!is_match(&Value::from(1), &Pattern::pair("a", 1)));
    assert!(!is_match(
        &Value::from(1),
        &Pattern::accessor(|| Ok(Pattern::from(1)))
    ));
}

// Broadcast sequences

#[test]
fn test_broadcast_every_element() {
    let nums = Value::list(vec![Value::from(1), Value::from(2), Value::from(3)]);
    assert!(is_match(&nums, &Pattern::each(Pattern::NUMBER)));

    let mixed = Value::list(vec![Value::from(1), Value::from("2")]);
    assert!(!is_match(&mixed, &Pattern::each(Pattern::NUMBER)));
}

#[test]
fn test_broadcast_empty_value_is_vacuous() {
    assert!(is_match(&Value::list(vec![]), &Pattern::each(Pattern::STRING)));
}

#[test]
fn test_broadcast_ignores_extra_template_elements() {
    let strings = Value::list(vec![Value::from("a"), Value::from("b")]);
    let pattern = Pattern::seq(vec![Pattern::STRING, Pattern::NUMBER]);
    assert!(is_match(&strings, &pattern));
}

#[test]
fn test_sequence_shape_mismatch() {
    let list = Value::list(vec![Value::from(1)]);
    assert!(!is_match(&list, &Pattern::NUMBER));
    assert!(!is_match(&list, &Pattern::fields([("0", Pattern::from(1))])));
    assert!(!is_match(&Value::from(1), &Pattern::each(Pattern::NUMBER)));
    assert!(!is_match(
        &Value::object([("a", Value::from(1))]),
        &Pattern::each(Pattern::NUMBER)
    ));
}

#[test]
fn test_empty_sequence_pattern_fails_closed() {
    assert!(!is_match(&Value::list(vec![Value::from(1)]), &Pattern::seq(vec![])));
    assert!(!is_match(&Value::list(vec![]), &Pattern::seq(vec![])));
}

#[test]
fn test_nested_broadcast() {
    let matrix = Value::list(vec![
        Value::list(vec![Value::from(1), Value::from(2)]),
        Value::list(vec![]),
    ]);
    assert!(is_match(&matrix, &Pattern::each(Pattern::each(Pattern::NUMBER))));
}

// Existential pair matching

fn attributes() -> Value {
    Value::list(vec![
        Value::pair("Make", "BMW"),
        Value::pair("Year", 2007),
    ])
}

#[test]
fn test_pairs_match_existentially() {
    assert!(is_match(
        &attributes(),
        &Pattern::pairs([Pattern::pair("Make", "BMW")])
    ));
    assert!(is_match(
        &attributes(),
        &Pattern::pairs([Pattern::pair("Year", 2007)])
    ));
    assert!(!is_match(
        &attributes(),
        &Pattern::pairs([Pattern::pair("Make", "Honda")])
    ));
}

#[test]
fn test_pairs_any_pattern_pair_suffices() {
    let pattern = Pattern::pairs([
        Pattern::pair("Make", "Honda"),
        Pattern::pair("Year", Pattern::NUMBER),
    ]);
    assert!(is_match(&attributes(), &pattern));
}

#[test]
fn test_pairs_name_and_value_must_match_same_pair() {
    // "Make" exists and 2007 exists, but not in the same pair
    assert!(!is_match(
        &attributes(),
        &Pattern::pairs([Pattern::pair("Make", 2007)])
    ));
}

#[test]
fn test_pairs_resolve_accessors_on_both_sides() {
    let lazy = Value::list(vec![Value::pair(
        Value::accessor(|| Ok(Value::from("Make"))),
        Value::accessor(|| Ok(Value::from("BMW"))),
    )]);
    let pattern = Pattern::pairs([Pattern::pair(
        Pattern::accessor(|| Ok(Pattern::from("Make"))),
        Pattern::STRING,
    )]);
    assert!(is_match(&lazy, &pattern));

    let other = Pattern::pairs([Pattern::pair(
        Pattern::accessor(|| Ok(Pattern::from("Model"))),
        Pattern::accessor(|| Ok(Pattern::STRING)),
    )]);
    assert!(!is_match(&lazy, &other));
}

#[test]
fn test_pairs_accept_map_records() {
    let value = Value::list(vec![Value::object([
        ("name", Value::from("Make")),
        ("value", Value::from("BMW")),
    ])]);
    let pattern = Pattern::pairs([Pattern::fields([
        ("name", Pattern::from("Make")),
        ("value", Pattern::from("BMW")),
    ])]);
    assert!(is_match(&value, &pattern));
}

#[test]
fn test_empty_value_against_pair_patterns_fails() {
    assert!(!is_match(
        &Value::list(vec![]),
        &Pattern::pairs([Pattern::pair("Make", "BMW")])
    ));
}

#[test]
fn test_mixed_sequence_falls_back_to_broadcast() {
    let mixed = Value::list(vec![Value::pair("Make", "BMW"), Value::from(1)]);
    assert!(!is_match(&mixed, &Pattern::pairs([Pattern::pair("Make", "BMW")])));
}

// Accessors

#[test]
fn test_accessor_against_accessor_pattern() {
    let value = Value::accessor(|| Ok(Value::from(2007)));
    let pattern = Pattern::accessor(|| Ok(Pattern::NUMBER));
    assert!(is_match(&value, &pattern));

    let wrong = Pattern::accessor(|| Ok(Pattern::STRING));
    assert!(!is_match(&value, &wrong));
}

#[test]
fn test_accessor_resolved_against_literal() {
    let value = Value::accessor(|| Ok(Value::from("BMW")));
    assert!(is_match(&value, &Pattern::from("BMW")));
    assert!(!is_match(&value, &Pattern::from("Honda")));
}

#[test]
fn test_accessor_receives_context() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let row = Value::object([
        ("id", Value::from(7)),
        (
            "double",
            Value::bound_accessor(move |context| {
                counter.fetch_add(1, Ordering::SeqCst);
                let id = context
                    .and_then(|c| c.field("id"))
                    .and_then(|id| id.as_number())
                    .ok_or_else(|| MatchError::new("missing context"))?;
                Ok(Value::from(id * 2.0))
            }),
        ),
    ]);
    assert!(is_match(&row, &Pattern::fields([("double", Pattern::from(14))])));
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn test_accessor_error_propagates() {
    let row = Value::object([(
        "broken",
        Value::accessor(|| Err(MatchError::new("accessor failed"))),
    )]);
    let result = matches(&row, &Pattern::fields([("broken", Pattern::from("x"))]));
    assert_eq!(result, Err(MatchError::new("accessor failed")));

    let nested = matches(&row, &Pattern::fields([("broken", Pattern::fields([("a", 1)]))]));
    assert_eq!(nested, Err(MatchError::new("accessor failed")));
}

#[test]
fn test_wildcard_member_skips_failing_accessor() {
    let row = Value::object([(
        "broken",
        Value::accessor(|| Err(MatchError::new("accessor failed"))),
    )]);
    assert_eq!(matches(&row, &Pattern::fields([("broken", Pattern::STRING)])), Ok(false));
}

// Mappings

#[test]
fn test_mapping_requires_every_pattern_key() {
    let row = Value::object([
        ("Make", Value::from("BMW")),
        ("Model", Value::from("M3")),
        ("Year", Value::from(2007)),
    ]);
    assert!(is_match(&row, &Pattern::fields([("Make", Pattern::from("BMW"))])));
    assert!(is_match(
        &row,
        &Pattern::fields([("Make", Pattern::from("BMW")), ("Year", Pattern::NUMBER)])
    ));
    assert!(!is_match(
        &row,
        &Pattern::fields([("Make", Pattern::from("BMW")), ("Year", Pattern::from(2010))])
    ));
}

#[test]
fn test_mapping_missing_key_fails() {
    let row = Value::object([("Make", Value::from("BMW"))]);
    assert!(!is_match(&row, &Pattern::fields([("Colour", Pattern::STRING)])));
}

#[test]
fn test_empty_field_pattern_is_vacuous() {
    let empty: [(&str, Pattern); 0] = [];
    assert!(is_match(&Value::object([("a", Value::from(1))]), &Pattern::fields(empty)));
    assert!(is_match(&car("BMW", 2007), &Pattern::Fields(vec![])));
}

#[test]
fn test_undefined_pattern_key_fails_closed() {
    let row = Value::object([("Make", Value::from("BMW"))]);
    assert!(!is_match(&row, &Pattern::fields_opt([("Make", None::<Pattern>)])));
    assert!(!is_match(
        &row,
        &Pattern::fields_opt([("Make", Some(Pattern::STRING)), ("Year", None)])
    ));
}

#[test]
fn test_nested_mappings() {
    let row = Value::object([(
        "engine",
        Value::object([("cylinders", Value::from(6)), ("fuel", Value::from("petrol"))]),
    )]);
    let pattern = Pattern::fields([(
        "engine",
        Pattern::fields([("cylinders", Pattern::NUMBER)]),
    )]);
    assert!(is_match(&row, &pattern));
}

#[test]
fn test_pair_value_against_pair_pattern() {
    assert!(is_match(&Value::pair("Make", "BMW"), &Pattern::pair("Make", Pattern::STRING)));
    assert!(!is_match(&Value::pair("Make", "BMW"), &Pattern::pair("Model", Pattern::STRING)));
}

#[test]
fn test_mapping_against_non_field_pattern_fails() {
    let row = Value::object([("a", Value::from(1))]);
    assert!(!is_match(&row, &Pattern::from(1)));
    assert!(!is_match(&row, &Pattern::accessor(|| Ok(Pattern::from(1)))));
}

#[test]
fn test_lazy_field_pattern_against_mapping() {
    let row = Value::object([("Make", Value::from("BMW")), ("Year", Value::from(2007))]);
    let bmw = Pattern::accessor(|| Ok(Pattern::fields([("Make", "BMW")])));
    let honda = Pattern::accessor(|| Ok(Pattern::fields([("Make", "Honda")])));
    assert!(is_match(&row, &bmw));
    assert!(!is_match(&row, &honda));
    assert!(is_match(&car("BMW", 2007), &bmw));
    assert!(!is_match(&car("BMW", 2007), &honda));
}

#[test]
fn test_lazy_pattern_error_propagates_from_mapping() {
    let row = Value::object([("Make", Value::from("BMW"))]);
    let broken = Pattern::accessor(|| Err(MatchError::new("pattern failed")));
    assert_eq!(matches(&row, &broken), Err(MatchError::new("pattern failed")));
}

// Computed entities

#[test]
fn test_entity_field_pattern() {
    assert!(is_match(&car("BMW", 2007), &Pattern::fields([("Make", Pattern::from("BMW"))])));
    assert!(!is_match(&car("Honda", 2010), &Pattern::fields([("Make", Pattern::from("BMW"))])));
    assert!(is_match(
        &car("BMW", 2007),
        &Pattern::fields([("Make", Pattern::STRING), ("Year", Pattern::from(2007))])
    ));
}

#[test]
fn test_entity_unknown_field_propagates() {
    let result = matches(&car("BMW", 2007), &Pattern::fields([("Colour", Pattern::STRING)]));
    assert_eq!(
        result,
        Err(MatchError::UnknownField {
            name: "Colour".to_string()
        })
    );
}

/// Entity with a callable `field` member, reached as `{ field: { Make: .. } }`.
struct Item {
    resolutions: Arc<AtomicUsize>,
}

struct FieldView {
    resolutions: Arc<AtomicUsize>,
}

impl FieldSource for FieldView {
    fn resolve(&self, key: &str, context: Option<&Value>) -> MatchResult<Value> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        // Resolved with the owning item bound as context
        match context {
            Some(Value::Entity(owner)) if owner.type_name() == "item" => {}
            _ => return Err(MatchError::new("field view called without its item")),
        }
        match key {
            "Make" => Ok(Value::pair("Make", Value::accessor(|| Ok(Value::from("BMW"))))),
            _ => Err(unknown_field(key)),
        }
    }
}

impl FieldSource for Item {
    fn resolve(&self, key: &str, _context: Option<&Value>) -> MatchResult<Value> {
        Err(unknown_field(key))
    }

    fn member(&self, key: &str) -> Option<Value> {
        (key == "field").then(|| {
            Value::entity(FieldView {
                resolutions: Arc::clone(&self.resolutions),
            })
        })
    }

    fn type_name(&self) -> &'static str {
        "item"
    }
}

#[test]
fn test_entity_callable_member_bound_to_owner() {
    let resolutions = Arc::new(AtomicUsize::new(0));
    let item = Value::entity(Item {
        resolutions: Arc::clone(&resolutions),
    });
    let pattern = Pattern::fields([("field", Pattern::fields([("Make", Pattern::from("BMW"))]))]);
    assert!(is_match(&item, &pattern));
    assert_eq!(resolutions.load(Ordering::SeqCst), 1);

    let miss = Pattern::fields([("field", Pattern::fields([("Make", Pattern::from("Audi"))]))]);
    assert!(!is_match(&item, &miss));
}

#[test]
fn test_structural_matcher_trait() {
    let matcher = Structural;
    assert!(matcher
        .matches(&Value::from("x"), &Pattern::STRING)
        .unwrap_or(false));
    assert!(!matcher
        .matches(&Value::from(1), &Pattern::STRING)
        .unwrap_or(true));
}
