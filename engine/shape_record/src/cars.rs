//! Built-in car records.

use shape_value::Value;

use crate::item::Item;
use crate::metadata::{FieldMetadata, FieldType, ItemMetadata};

/// Metadata shared by every car: `Make`, `Model` (strings) and `Year`
/// (integer).
pub fn car_metadata() -> ItemMetadata {
    ItemMetadata::with_fields(vec![
        FieldMetadata::named("Make").with_type(FieldType::String),
        FieldMetadata::named("Model").with_type(FieldType::String),
        FieldMetadata::named("Year").with_type(FieldType::Integer),
    ])
}

/// A car item.
pub fn car(make: &str, model: &str, year: u32) -> Item {
    Item::new(
        [
            ("Make", Value::from(make)),
            ("Model", Value::from(model)),
            ("Year", Value::from(year)),
        ],
        Some(car_metadata()),
    )
}

/// BMW M3 2007, BMW M4 2007 and Honda Civic 2010.
pub fn cars() -> Vec<Item> {
    vec![
        car("BMW", "M3", 2007),
        car("BMW", "M4", 2007),
        car("Honda", "Civic", 2010),
    ]
}
