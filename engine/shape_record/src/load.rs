//! Loading items from JSON documents.
//!
//! Two document shapes are accepted:
//!
//! ```text
//! [ { "Make": "BMW", "Year": 2007 }, ... ]
//!
//! { "metadata": { "fields": [ { "name": "Year", "type": "integer" } ] },
//!   "items": [ { "Make": "BMW", "Year": 2007 }, ... ] }
//! ```
//!
//! A bare array uses the caller's default metadata; a collection document
//! uses its own metadata when present.

use serde_json::Value as Json;
use shape_value::{MatchError, MatchResult};
use tracing::debug;

use crate::item::Item;
use crate::metadata::ItemMetadata;

#[derive(serde::Deserialize)]
struct Collection {
    #[serde(default)]
    metadata: Option<ItemMetadata>,
    items: Vec<Json>,
}

/// Parse a JSON document into items.
pub fn load_items(source: &str, default_metadata: Option<&ItemMetadata>) -> MatchResult<Vec<Item>> {
    let document: Json = serde_json::from_str(source)?;
    let (metadata, entries) = match document {
        Json::Array(entries) => (default_metadata.cloned(), entries),
        Json::Object(_) => {
            let collection: Collection = serde_json::from_value(document)?;
            (
                collection.metadata.or_else(|| default_metadata.cloned()),
                collection.items,
            )
        }
        _ => {
            return Err(MatchError::Json {
                message: "expected an array of items or a collection object".to_string(),
            })
        }
    };

    let items = entries
        .iter()
        .map(|entry| Item::from_json(entry, metadata.clone()))
        .collect::<MatchResult<Vec<_>>>()?;
    debug!(count = items.len(), "loaded items");
    Ok(items)
}
