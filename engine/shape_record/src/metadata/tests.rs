use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_field_type_names() {
    let names: Vec<String> = [
        FieldType::Boolean,
        FieldType::Integer,
        FieldType::UsDollars,
        FieldType::PhoneNumber,
        FieldType::Map,
    ]
    .iter()
    .map(|t| serde_json::to_string(t).unwrap_or_else(|e| panic!("{e}")))
    .collect();
    assert_eq!(
        names,
        vec![
            "\"boolean\"",
            "\"integer\"",
            "\"usdollars\"",
            "\"phonenumber\"",
            "\"map\""
        ]
    );
}

#[test]
fn test_field_metadata_skips_absent_entries() {
    let meta = FieldMetadata::named("Year").with_type(FieldType::Integer);
    let json = serde_json::to_value(&meta).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(json, serde_json::json!({ "name": "Year", "type": "integer" }));
}

#[test]
fn test_item_metadata_from_json() {
    let meta: ItemMetadata = serde_json::from_value(serde_json::json!({
        "identifierName": "Model",
        "collection": "cars",
        "fields": [
            { "name": "Make", "type": "string", "required": true },
            { "name": "Price", "type": "usdollars", "label": "List price", "collectionName": "prices" }
        ]
    }))
    .unwrap_or_else(|e| panic!("{e}"));

    assert_eq!(meta.identifier_name.as_deref(), Some("Model"));
    assert_eq!(meta.collection.as_deref(), Some("cars"));
    assert_eq!(meta.fields.len(), 2);
    assert_eq!(meta.fields[0].required, Some(true));
    assert_eq!(
        meta.fields[1],
        FieldMetadata {
            name: Some("Price".into()),
            label: Some("List price".into()),
            required: None,
            field_type: Some(FieldType::UsDollars),
            collection_name: Some("prices".into()),
        }
    );
}

#[test]
fn test_item_metadata_fields_default_empty() {
    let meta: ItemMetadata = serde_json::from_str("{}").unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(meta, ItemMetadata::default());
}

#[test]
fn test_lookup_first_by_name() {
    let meta = ItemMetadata::with_fields(vec![
        FieldMetadata::named("Make").with_label("Manufacturer"),
        FieldMetadata::named("Make").with_label("Shadowed"),
        FieldMetadata::default(),
    ]);
    let found = meta.lookup("Make").and_then(|m| m.label.as_deref());
    assert_eq!(found, Some("Manufacturer"));
    assert!(meta.lookup("Year").is_none());
}
