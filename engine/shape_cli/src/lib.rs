//! Shape CLI - filter records with the shape matcher.
//!
//! Loads items (the built-in cars or a JSON document), keeps those matching
//! a guarded clause built from the command line, and renders them as JSON.

mod filter;
mod options;

use std::path::Path;

use shape_match::{MatchError, MatchResult};
use shape_record::{car_metadata, cars, load_items, Item};

pub use filter::{render, select};
pub use options::{parse_filter_options, FilterOptions};

/// Load items from a JSON document, described by the car metadata unless
/// the document carries its own.
pub fn load_file(path: &Path) -> MatchResult<Vec<Item>> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| MatchError::new(format!("cannot read {}: {e}", path.display())))?;
    load_items(&source, Some(&car_metadata()))
}

/// Load, filter and render according to `options`.
pub fn run(options: &FilterOptions) -> MatchResult<String> {
    let items = match &options.input {
        Some(path) => load_file(path)?,
        None => cars(),
    };
    render(&items, options)
}
