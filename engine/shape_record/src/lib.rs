//! Shape Record - a record model for the shape matcher.
//!
//! Records are `Item`s: ordered sequences of named `Field`s described by
//! `FieldMetadata`. An item is presented to the matcher as a computed entity
//! (`Item::to_value`) whose attributes resolve lazily to `{ name, value }`
//! pairs, and projects to plain JSON with `Item::to_json`.

mod cars;
mod field;
mod item;
mod load;
mod metadata;

pub use cars::{car, car_metadata, cars};
pub use field::Field;
pub use item::{field_value, Item};
pub use load::load_items;
pub use metadata::{FieldMetadata, FieldType, ItemMetadata};
