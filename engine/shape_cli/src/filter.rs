//! Selecting items with a guarded clause.
//!
//! Each item is matched against `{ field: { Make: <make> } }`. The clause
//! guard runs a second, nested match on `{ field: { Year: <year> } }`, so an
//! item is kept only when both hold. `--not` negates the `Make` test but not
//! the guard.

use serde_json::Value as Json;
use shape_match::{match_on, Match, MatchResult, Pattern, Value};
use shape_record::Item;
use tracing::debug;

use crate::options::FilterOptions;

/// The items kept by the filter, in input order.
///
/// Fails before matching anything if `options` do not validate.
pub fn select(items: &[Item], options: &FilterOptions) -> MatchResult<Vec<Item>> {
    options.validate()?;
    let mut selected = Vec::new();
    for item in items {
        if classifier(item.to_value(), options).run()? {
            selected.push(item.clone());
        }
    }
    debug!(total = items.len(), selected = selected.len(), "filtered items");
    Ok(selected)
}

/// Select and render as a pretty-printed JSON array.
pub fn render(items: &[Item], options: &FilterOptions) -> MatchResult<String> {
    let json = select(items, options)?
        .iter()
        .map(Item::to_json)
        .collect::<MatchResult<Vec<_>>>()?;
    Ok(serde_json::to_string_pretty(&Json::Array(json))?)
}

fn classifier(subject: Value, options: &FilterOptions) -> Match<bool> {
    let make = Pattern::fields(
        options
            .make
            .as_deref()
            .map(|make| ("Make", Pattern::from(make))),
    );
    let pattern = Pattern::fields([("field", make)]);

    let year = options.year;
    let guard = move |o: &Value| match year {
        Some(year) => match_on::<bool>(o.clone())
            .with(
                Pattern::fields([("field", Pattern::fields([("Year", year)]))]),
                |_| Ok(true),
            )
            .run(),
        None => Ok(true),
    };

    let base = match_on::<bool>(subject);
    if options.negate {
        base.with_not_when(pattern, guard, |_| Ok(true))
    } else {
        base.with_when(pattern, guard, |_| Ok(true))
    }
}
