//! Schema builder
//!
//! Accumulates property and method declarations before compilation.
//!
//! # Example
//!
//! ```
//! use strata_core::schema::{PropertyOptions, SchemaBuilder};
//! use strata_core::types::{self, NumberType};
//! use strata_core::Value;
//!
//! let person = SchemaBuilder::new("Person")
//!     .property("name", types::string())
//!     .property_with("age", NumberType::new().min(0.0), PropertyOptions::new().with_default(0))
//!     .compile();
//!
//! let ada = person.construct(Value::object([("name", "Ada")])).unwrap();
//! assert_eq!(ada.get("age"), Some(&Value::from(0)));
//! ```

use super::compiled::{CompileOptions, CompiledType};
use super::table::{PropertyDefinition, PropertyOptions, SchemaTable};
use crate::descriptor::IntoDescriptor;
use crate::value::{Method, Value};
use std::fmt;
use std::sync::Arc;

/// Anything whose declarations can be mixed into a builder
pub trait MixinSource {
    fn schema_table(&self) -> &SchemaTable;
}

impl MixinSource for SchemaTable {
    fn schema_table(&self) -> &SchemaTable {
        self
    }
}

impl MixinSource for SchemaBuilder {
    fn schema_table(&self) -> &SchemaTable {
        &self.table
    }
}

impl MixinSource for CompiledType {
    fn schema_table(&self) -> &SchemaTable {
        self.table()
    }
}

type CreateHook = Arc<dyn Fn(&CompiledType) + Send + Sync>;

/// Mutable accumulator of declarations
#[derive(Clone)]
pub struct SchemaBuilder {
    name: String,
    description: Option<String>,
    table: SchemaTable,
    on_create: Vec<CreateHook>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            table: SchemaTable::new(),
            on_create: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn table(&self) -> &SchemaTable {
        &self.table
    }

    /// Attach a human-readable description to compiled types
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare a property with default options
    pub fn property(self, name: impl Into<String>, ty: impl IntoDescriptor) -> Self {
        self.property_with(name, ty, PropertyOptions::default())
    }

    /// Declare (or redeclare) a property.
    ///
    /// The type is not inspected here; a malformed declaration surfaces as a
    /// validation failure once instances are built.
    pub fn property_with(
        mut self,
        name: impl Into<String>,
        ty: impl IntoDescriptor,
        options: PropertyOptions,
    ) -> Self {
        self.table
            .properties
            .insert(name, PropertyDefinition::new(ty.into_descriptor(), options));
        self
    }

    /// Declare (or redeclare) a method from a closure
    pub fn method<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&mut super::Instance, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.method_impl(name, Method::new(func))
    }

    /// Declare (or redeclare) a method from an existing binding
    pub fn method_impl(mut self, name: impl Into<String>, method: Method) -> Self {
        self.table.methods.insert(name, method);
        self
    }

    /// Merge another builder's or compiled type's declarations; the source
    /// wins on name collisions
    pub fn mixin<S: MixinSource + ?Sized>(mut self, source: &S) -> Self {
        self.table.merge(source.schema_table());
        self
    }

    /// Register a hook run with every type compiled from this builder
    pub fn on_create<F>(mut self, hook: F) -> Self
    where
        F: Fn(&CompiledType) + Send + Sync + 'static,
    {
        self.on_create.push(Arc::new(hook));
        self
    }

    /// Compile with default options
    pub fn compile(&self) -> CompiledType {
        self.compile_with(CompileOptions::default())
    }

    /// Compile the current declarations into an independent type.
    ///
    /// The builder is left untouched; later declarations do not affect
    /// types already compiled.
    pub fn compile_with(&self, options: CompileOptions) -> CompiledType {
        let compiled = CompiledType::compile(
            self.name.clone(),
            self.description.clone(),
            self.table.clone(),
            options,
        );
        for hook in &self.on_create {
            hook(&compiled);
        }
        compiled
    }
}

impl fmt::Debug for SchemaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaBuilder")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("properties", &self.table.properties.keys().collect::<Vec<_>>())
            .field("methods", &self.table.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_redeclaring_overwrites_in_place() {
        let builder = SchemaBuilder::new("Item")
            .property("id", types::string())
            .property("count", types::number())
            .property("id", types::number());

        let keys: Vec<_> = builder.table().properties.keys().collect();
        assert_eq!(keys, vec!["id", "count"]);
        assert_eq!(builder.table().properties.get("id").unwrap().ty.name(), "number");
    }

    #[test]
    fn test_mixin_source_wins() {
        let base = SchemaBuilder::new("Base")
            .property("id", types::string())
            .property("label", types::string());
        let overlay = SchemaBuilder::new("Overlay")
            .property("label", types::number())
            .method("describe", |_, _| Ok(Value::Null));

        let merged = base.mixin(&overlay);
        assert_eq!(merged.name(), "Base");
        assert_eq!(
            merged.table().properties.get("label").unwrap().ty.name(),
            "number"
        );
        assert!(merged.table().methods.contains_key("describe"));
    }

    #[test]
    fn test_mixin_accepts_compiled_types() {
        let stamped = SchemaBuilder::new("Stamped")
            .property("created_at", types::number())
            .compile();

        let builder = SchemaBuilder::new("Post")
            .property("title", types::string())
            .mixin(&stamped);
        let keys: Vec<_> = builder.table().properties.keys().collect();
        assert_eq!(keys, vec!["title", "created_at"]);
    }

    #[test]
    fn test_compile_does_not_touch_builder() {
        let builder = SchemaBuilder::new("Item").property("id", types::string());
        let first = builder.compile();
        let builder = builder.property("extra", types::number());
        let second = builder.compile();

        assert!(!first.ptr_eq(&second));
        assert_eq!(first.property_names().count(), 1);
        assert_eq!(second.property_names().count(), 2);
    }

    #[test]
    fn test_description_reaches_compiled_type() {
        let builder = SchemaBuilder::new("Item").property("id", types::string());
        assert_eq!(builder.compile().description(), None);

        let ty = builder.description("Something we sell").compile();
        assert_eq!(ty.description(), Some("Something we sell"));
        assert_eq!(ty.extend("Special").compile().description(), None);
    }

    #[test]
    fn test_on_create_runs_per_compile() {
        let created = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&created);
        let builder = SchemaBuilder::new("Hooked")
            .property("id", types::string())
            .on_create(move |ty| {
                assert_eq!(ty.name(), "Hooked");
                seen.fetch_add(1, Ordering::SeqCst);
            });

        builder.compile();
        builder.compile();
        assert_eq!(created.load(Ordering::SeqCst), 2);
    }
}
