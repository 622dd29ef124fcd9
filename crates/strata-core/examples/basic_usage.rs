//! Basic usage example for strata-core
//!
//! Run with: cargo run --example basic_usage

use strata_core::schema::{PropertyOptions, SchemaBuilder};
use strata_core::types::{self, NumberType, StringType};
use strata_core::Value;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("strata_core=debug")),
        )
        .init();

    println!("=== Strata Core Basic Usage Example ===\n");

    // Example 1: Declaring and compiling a type
    println!("1. Compiling a Person type:");
    let person = SchemaBuilder::new("Person")
        .property("name", StringType::new().min_length(1))
        .property_with(
            "age",
            NumberType::new().min(0.0).integer(),
            PropertyOptions::new().with_default(0),
        )
        .method("greet", |this, _| {
            let name = this.get("name").and_then(Value::as_str).unwrap_or_default();
            Ok(Value::from(format!("Hello, {}!", name)))
        })
        .compile();
    println!("   {:?}\n", person);

    // Example 2: Constructing an instance
    println!("2. Constructing {{name: \"Ada\"}}:");
    let mut ada = match person.construct(Value::object([("name", "Ada")])) {
        Ok(instance) => instance,
        Err(err) => {
            eprintln!("   {}", err);
            return;
        }
    };
    println!("   {}\n", ada);

    // Example 3: A failing construction lists every message
    println!("3. Constructing {{}}:");
    if let Err(err) = person.construct(Value::empty_object()) {
        println!("   {}\n", err);
    }

    // Example 4: Guarded mutation
    println!("4. Writing age = -1:");
    if let Err(err) = ada.set("age", -1) {
        println!("   {}", err);
    }
    println!("   age is still {:?}\n", ada.get("age"));

    // Example 5: Methods
    println!("5. Calling greet:");
    match ada.call("greet", &[]) {
        Ok(greeting) => println!("   {}\n", greeting),
        Err(err) => println!("   {}\n", err),
    }

    // Example 6: Extension and serialization
    println!("6. Extending Person into Employee:");
    let employee = person
        .extend("Employee")
        .property("company", types::string())
        .compile();
    match employee.construct(Value::object([("name", "Grace"), ("company", "Navy")])) {
        Ok(grace) => match grace.to_record() {
            Ok(record) => println!("   {}", record),
            Err(err) => println!("   {}", err),
        },
        Err(err) => println!("   {}", err),
    }

    println!("\n=== Example Complete ===");
}
