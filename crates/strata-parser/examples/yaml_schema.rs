//! Loading record types from YAML
//!
//! Run with: cargo run --example yaml_schema

use strata_core::schema::SchemaBuilder;
use strata_core::Value;
use strata_parser::{SchemaLoader, TypeRegistry};
use tracing_subscriber::EnvFilter;

const SCHEMAS: &str = r#"
structure:
  name: Address
  properties:
    city: { type: string, min_length: 1 }
    zip: { type: string, nullable: true }
---
structure:
  name: User
  description: A registered user
  mixins: [Greeter]
  properties:
    name: { type: string, min_length: 1 }
    age: { type: integer, min: 0, default: 0 }
    role: { type: enum, values: [admin, member], default: member }
    address: Address
"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strata_parser=info")),
        )
        .init();

    println!("=== Strata YAML Schema Example ===\n");

    // Methods are attached through registered mixins
    let mut registry = TypeRegistry::new();
    registry.register_mixin(
        "Greeter",
        SchemaBuilder::new("Greeter").method("greet", |this, _| {
            let name = this.get("name").and_then(Value::as_str).unwrap_or_default();
            Ok(Value::from(format!("Hello, {}!", name)))
        }),
    );

    let mut loader = SchemaLoader::new(registry);
    for ty in loader.load_str(SCHEMAS)? {
        println!("Loaded {:?}", ty);
    }

    let user = loader
        .registry()
        .get("User")
        .ok_or_else(|| anyhow::anyhow!("User was not registered"))?;

    let mut ada = user.construct(Value::from(serde_json::json!({
        "name": "Ada",
        "address": {"city": "London"}
    })))?;
    println!("\nConstructed: {}", ada);
    println!("Greeting: {}", ada.call("greet", &[])?);
    println!("Record: {}", ada.to_record()?);

    if let Err(err) = ada.set("role", "owner") {
        println!("\nRejected write:\n{}", err);
    }

    match user.construct(Value::from(serde_json::json!({"address": {"city": ""}}))) {
        Ok(_) => println!("\nUnexpectedly valid"),
        Err(err) => println!("\nRejected construction:\n{}", err),
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
