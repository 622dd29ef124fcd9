//! Integration tests for loading schema files
//!
//! These tests write schema documents to disk and load them through the
//! registry, the way an application would at startup.

use std::fs;

use serde_json::json;
use strata_core::schema::SchemaBuilder;
use strata_core::{SchemaError, Value};
use strata_parser::{ParseError, SchemaLoader, SchemaParser, TypeRegistry};
use tempfile::TempDir;

const SHOP: &str = r#"
# Shared building blocks first
structure:
  name: Timestamped
  properties:
    created_at: { type: number, min: 0, default: 0 }
---
structure:
  name: Product
  description: Something we sell
  mixins: [Timestamped]
  properties:
    sku: { type: string, min_length: 3 }
    price: { type: number, min: 0 }
    tags: { type: array, items: string, default: [] }
    status: { type: enum, values: [draft, live], default: draft }
---
structure:
  name: DigitalProduct
  extends: Product
  properties:
    download_url: { type: string, nullable: true }
"#;

#[test]
fn test_load_file_compiles_every_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("shop.yaml");
    fs::write(&path, SHOP).unwrap();

    let mut loader = SchemaLoader::new(TypeRegistry::new());
    let compiled = loader.load_file(&path).unwrap();

    let names: Vec<_> = compiled.iter().map(|ty| ty.name()).collect();
    assert_eq!(names, vec!["Timestamped", "Product", "DigitalProduct"]);

    let digital = loader.registry().get("DigitalProduct").unwrap();
    assert_eq!(
        digital.property_names().collect::<Vec<_>>(),
        vec!["created_at", "sku", "price", "tags", "status", "download_url"]
    );
}

#[test]
fn test_loaded_type_lifecycle() {
    let mut loader = SchemaLoader::new(TypeRegistry::new());
    loader.load_str(SHOP).unwrap();
    let product = loader.registry().get("Product").unwrap().clone();

    let mut book = product
        .construct(Value::from(json!({"sku": "BK-1", "price": "12.5"})))
        .unwrap();
    assert_eq!(book.get("price"), Some(&Value::from(12.5)));
    assert_eq!(book.get("status"), Some(&Value::from("draft")));

    let err = book.set("status", "archived").unwrap_err();
    assert!(matches!(err, SchemaError::Mutation { .. }));
    assert_eq!(book.get("status"), Some(&Value::from("draft")));

    book.set("status", "live").unwrap();
    let record = book.to_record().unwrap();
    assert_eq!(
        record,
        json!({
            "created_at": 0,
            "sku": "BK-1",
            "price": 12.5,
            "tags": [],
            "status": "live"
        })
    );
    assert_eq!(product.from_record(&record).unwrap(), book);
}

#[test]
fn test_construction_errors_surface_through_parse_error() {
    fn build(loader: &mut SchemaLoader) -> strata_parser::Result<()> {
        loader.load_str(SHOP)?;
        let product = loader.registry().get("Product").unwrap();
        product.construct(Value::from(json!({"sku": "X", "price": -1})))?;
        Ok(())
    }

    let mut loader = SchemaLoader::new(TypeRegistry::new());
    match build(&mut loader) {
        Err(ParseError::Schema(err)) => assert_eq!(
            err.messages(),
            &[
                ".sku must be at least 3 characters long",
                ".price must be greater than or equal to 0",
            ]
        ),
        other => panic!("Expected schema error, got {:?}", other),
    }
}

#[test]
fn test_programmatic_and_declarative_types_mix() {
    let money = SchemaBuilder::new("Money")
        .property("amount", strata_core::types::number())
        .property("currency", strata_core::types::enumeration(["EUR", "USD"]))
        .compile();

    let mut registry = TypeRegistry::new();
    registry.register(money);

    let mut loader = SchemaLoader::new(registry);
    let invoice = loader
        .load_str(
            r#"
structure:
  name: Invoice
  properties:
    total: Money
    lines: { type: array, items: { type: Money } }
"#,
        )
        .unwrap()
        .remove(0);

    let err = invoice
        .construct(Value::from(json!({
            "total": {"amount": 10, "currency": "EUR"},
            "lines": [{"amount": 10, "currency": "GBP"}]
        })))
        .unwrap_err();
    assert_eq!(
        err.messages(),
        &[r#".lines[0].currency must be one of [EUR, USD], got "GBP""#]
    );
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.yaml");

    match SchemaParser::parse_file(&path) {
        Err(ParseError::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected Io error, got {:?}", other),
    }
}

#[test]
fn test_failed_document_keeps_earlier_registrations() {
    let yaml = r#"
structure:
  name: Tag
  properties:
    label: string
---
structure:
  name: Post
  mixins: [Missing]
  properties:
    title: string
"#;

    let mut loader = SchemaLoader::new(TypeRegistry::new());
    let err = loader.load_str(yaml).unwrap_err();
    assert!(matches!(err, ParseError::UnknownMixin(name) if name == "Missing"));
    assert!(loader.registry().contains("Tag"));
    assert!(!loader.registry().contains("Post"));
}
