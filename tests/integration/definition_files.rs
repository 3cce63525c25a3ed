//! Integration test: loading type hierarchies from definition files.

use std::io::Write;

use phantom_refine::{DefinitionFile, RefineError, TypeRegistry, Value};

fn write_defs(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(json.as_bytes()).expect("write definitions");
    file
}

const INVENTORY: &str = r#"{
  "version": 1,
  "namespace": "inventory",
  "types": [
    { "name": "Quantity", "bases": ["int"], "predicate": "non_negative",
      "description": "A stock quantity." },
    { "name": "Batch", "bases": ["Quantity"], "predicate": { "closed": [1, 500] } },
    { "name": "Sku", "bases": ["str"],
      "predicate": { "full_match": "[A-Z]{3}-\\d{4}" },
      "schema": { "pattern": "^[A-Z]{3}-\\d{4}$" } },
    { "name": "Skus", "bases": ["NonEmpty"], "bound": "tuple[str, ...]",
      "predicate": { "all_of": ["not_mutable", { "count": { "closed": [1, 3] } }] } },
    { "name": "Label", "bound": ["Sized", "Iterable"], "abstract": true },
    { "name": "ShortLabel", "bases": ["Label"], "predicate": { "count": { "less": 5 } } }
  ]
}"#;

#[test]
fn definitions_load_from_path() {
    let file = write_defs(INVENTORY);
    let mut registry = TypeRegistry::with_builtins().expect("builtins");
    let loaded = registry.load_path(file.path()).expect("load definitions");

    assert_eq!(loaded.len(), 6);
    assert_eq!(registry.len(), 9);
    assert!(registry.names().contains(&"inventory::ShortLabel"));
}

#[test]
fn definitions_check_values() {
    let mut registry = TypeRegistry::with_builtins().expect("builtins");
    registry
        .load_definitions(&DefinitionFile::from_json(INVENTORY).expect("parse"))
        .expect("load definitions");

    assert!(registry.conforms("Quantity", &Value::Int(0)).expect("check"));
    assert!(!registry.conforms("Quantity", &Value::Int(-2)).expect("check"));
    assert!(registry.conforms("Batch", &Value::Int(500)).expect("check"));
    assert!(!registry.conforms("Batch", &Value::Int(0)).expect("check"));

    assert!(registry.conforms("Sku", &Value::str("ABC-1234")).expect("check"));
    assert!(!registry.conforms("Sku", &Value::str("ABC-12345")).expect("check"));

    let skus = Value::tuple([Value::str("ABC-1234"), Value::str("XYZ-0001")]);
    assert!(registry.conforms("Skus", &skus).expect("check"));
    assert!(!registry.conforms("Skus", &Value::tuple([])).expect("check"));
    assert!(!registry
        .conforms("Skus", &Value::tuple([Value::Int(1)]))
        .expect("check"));

    assert!(registry.conforms("ShortLabel", &Value::str("tag")).expect("check"));
    assert!(!registry.conforms("ShortLabel", &Value::str("label")).expect("check"));
    assert!(matches!(
        registry.conforms("Label", &Value::str("x")),
        Err(RefineError::AbstractInstanceCheck(_))
    ));
}

#[test]
fn definitions_need_builtins_for_sized_bases() {
    let mut registry = TypeRegistry::new();
    let err = registry
        .load_definitions(&DefinitionFile::from_json(INVENTORY).expect("parse"))
        .unwrap_err();
    assert!(matches!(err, RefineError::NotFound(_)));
    assert!(registry.is_empty());
}

#[test]
fn definitions_schema_entries() {
    let mut registry = TypeRegistry::with_builtins().expect("builtins");
    registry
        .load_definitions(&DefinitionFile::from_json(INVENTORY).expect("parse"))
        .expect("load definitions");

    let schema = registry.get("Sku").expect("Sku").schema();
    assert_eq!(schema.get("title"), Some(&serde_json::json!("Sku")));
    assert_eq!(
        schema.get("pattern"),
        Some(&serde_json::json!("^[A-Z]{3}-\\d{4}$"))
    );

    let schema = registry.get("Skus").expect("Skus").schema();
    assert_eq!(schema.get("type"), Some(&serde_json::json!("array")));
    assert_eq!(schema.get("minItems"), Some(&serde_json::json!(1)));

    let quantity = registry.get("inventory::Quantity").expect("Quantity");
    assert_eq!(quantity.description(), Some("A stock quantity."));
}

#[test]
fn definitions_reject_bad_files() {
    let file = write_defs(r#"{ "version": 7, "types": [] }"#);
    let err = TypeRegistry::new().load_path(file.path()).unwrap_err();
    assert!(matches!(err, RefineError::InvalidFileFormat(_)));

    let file = write_defs("not json");
    let err = TypeRegistry::new().load_path(file.path()).unwrap_err();
    assert!(matches!(err, RefineError::InvalidFileFormat(_)));

    let err = TypeRegistry::new()
        .load_path(std::path::Path::new("/nonexistent/phantom-refine/defs.json"))
        .unwrap_err();
    assert!(matches!(err, RefineError::Io(_)));
}

#[test]
fn definitions_reject_mutable_bound() {
    let file = write_defs(
        r#"{ "version": 1, "types": [ { "name": "Bag", "bound": "list", "predicate": "always" } ] }"#,
    );
    let mut registry = TypeRegistry::new();
    let err = registry.load_path(file.path()).unwrap_err();
    assert!(matches!(err, RefineError::MutableBound { .. }));
    assert!(registry.is_empty());
}

#[test]
fn definitions_later_files_extend_earlier() {
    let base = write_defs(
        r#"{ "version": 1, "namespace": "geo",
             "types": [ { "name": "Latitude", "bases": ["Number"], "predicate": { "closed": [-90, 90] } } ] }"#,
    );
    let extension = write_defs(
        r#"{ "version": 1, "namespace": "polar",
             "types": [ { "name": "Arctic", "bases": ["geo::Latitude"], "predicate": { "open_closed": [66.5, 90] } } ] }"#,
    );
    let mut registry = TypeRegistry::new();
    registry.load_path(base.path()).expect("base file");
    registry.load_path(extension.path()).expect("extension file");

    assert!(registry.conforms("polar::Arctic", &Value::Float(70.1)).expect("check"));
    assert!(!registry.conforms("polar::Arctic", &Value::Int(10)).expect("check"));
    assert!(registry.conforms("Latitude", &Value::Int(10)).expect("check"));
    assert!(!registry.conforms("Latitude", &Value::str("10")).expect("check"));
}
