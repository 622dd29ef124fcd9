//! Compiled types
//!
//! A [`CompiledType`] is the immutable artifact produced by
//! [`SchemaBuilder::compile`](super::SchemaBuilder::compile). It owns a frozen
//! snapshot of the declaration table, the validator list derived from it and
//! a serializer pair, and it constructs validated [`Instance`]s.
//!
//! Compiled types are cheap to clone; clones share the same snapshot.

use super::builder::SchemaBuilder;
use super::instance::Instance;
use super::serializer::{DefaultSerializer, RecordSerializer};
use super::table::{PropertyDefinition, SchemaTable};
use super::validator::{run_all, FieldSource, FieldValidator};
use crate::descriptor::{Descriptor, DescriptorExt, IntoDescriptor, TypeDescriptor, Validation};
use crate::error::{Result, SchemaError};
use crate::value::Value;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Compile options
#[derive(Clone, Default)]
pub struct CompileOptions {
    /// Replaces the default `to_record`/`from_record` pair wholesale
    pub serializer: Option<Arc<dyn RecordSerializer>>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom serializer pair
    pub fn with_serializer(mut self, serializer: impl RecordSerializer + 'static) -> Self {
        self.serializer = Some(Arc::new(serializer));
        self
    }
}

impl fmt::Debug for CompileOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileOptions")
            .field("custom_serializer", &self.serializer.is_some())
            .finish()
    }
}

struct TypeInner {
    name: String,
    description: Option<String>,
    table: SchemaTable,
    validators: Vec<FieldValidator>,
    serializer: Arc<dyn RecordSerializer>,
}

/// A constructible record type
#[derive(Clone)]
pub struct CompiledType {
    inner: Arc<TypeInner>,
}

impl CompiledType {
    pub(crate) fn compile(
        name: String,
        description: Option<String>,
        table: SchemaTable,
        options: CompileOptions,
    ) -> Self {
        let mut validators = Vec::with_capacity(table.properties.len() + table.methods.len());
        for (key, property) in table.properties.iter() {
            validators.push(FieldValidator::Property {
                key: key.to_string(),
                ty: Arc::clone(&property.ty),
            });
        }
        for key in table.methods.keys() {
            validators.push(FieldValidator::Method {
                key: key.to_string(),
            });
        }

        let serializer = options
            .serializer
            .unwrap_or_else(|| Arc::new(DefaultSerializer));

        debug!(
            type_name = %name,
            properties = table.properties.len(),
            methods = table.methods.len(),
            "compiled structure"
        );

        Self {
            inner: Arc::new(TypeInner {
                name,
                description,
                table,
                validators,
                serializer,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn description(&self) -> Option<&str> {
        self.inner.description.as_deref()
    }

    /// The frozen declaration table this type was compiled from
    pub fn table(&self) -> &SchemaTable {
        &self.inner.table
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.inner.table.properties.get(name)
    }

    /// Declared property names in declaration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.inner.table.properties.keys()
    }

    pub fn has_method(&self, name: &str) -> bool {
        self.inner.table.methods.contains_key(name)
    }

    /// Number of validators: one per property, one per method
    pub fn validator_count(&self) -> usize {
        self.inner.validators.len()
    }

    /// Two handles to the same compiled type
    pub fn ptr_eq(&self, other: &CompiledType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Construct an instance from a plain data record.
    ///
    /// Each declared property takes the input's value when present and
    /// non-null, else its default, and is then coerced by its descriptor.
    /// Keys the type does not declare are ignored. The candidate must pass
    /// every validator; otherwise all collected messages are returned and no
    /// instance escapes.
    pub fn construct(&self, data: impl Into<Value>) -> Result<Instance> {
        let candidate = Instance::from_parts(self.clone(), self.prepare(&data.into()));
        let validation = self.validate_fields(&candidate);
        if !validation.is_valid() {
            debug!(
                type_name = %self.name(),
                errors = validation.errors().len(),
                "construction rejected"
            );
            return Err(SchemaError::Construction {
                type_name: self.name().to_string(),
                messages: validation.into_errors(),
            });
        }

        trace!(type_name = %self.name(), "constructed instance");
        Ok(candidate)
    }

    /// Run the full validator list against a value.
    ///
    /// Plain objects and records of any type are checked structurally;
    /// every other value fails with a single message.
    pub fn validate(&self, value: &Value) -> Validation {
        match value {
            Value::Object(map) => self.validate_fields(map),
            Value::Record(instance) => self.validate_fields(instance),
            other => Validation::invalid(format!(
                "must be a {} record, got {}",
                self.name(),
                other.kind()
            )),
        }
    }

    /// Structural membership test: does `value` pass every validator now
    pub fn is_instance(&self, value: &Value) -> bool {
        self.validate(value).is_valid()
    }

    pub(crate) fn validate_fields(&self, source: &dyn FieldSource) -> Validation {
        run_all(&self.inner.validators, source)
    }

    /// Serialize an instance through this type's serializer pair
    pub fn to_record(&self, instance: &Instance) -> Result<JsonValue> {
        self.inner.serializer.to_record(self, instance)
    }

    /// Deserialize a JSON record and construct an instance
    pub fn from_record(&self, json: &JsonValue) -> Result<Instance> {
        self.inner.serializer.from_record(self, json)
    }

    /// A new builder pre-seeded with this type's declarations
    pub fn extend(&self, name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name).mixin(self)
    }

    /// A descriptor accepting `Null` or a valid record of this type
    pub fn nullable(&self) -> Descriptor {
        self.clone().into_descriptor().nullable()
    }

    /// Field values of a construction candidate: input or default, coerced
    fn prepare(&self, data: &Value) -> Vec<Value> {
        self.inner
            .table
            .properties
            .iter()
            .map(|(key, property)| {
                let raw = match data.field(key) {
                    Some(value) if !value.is_null() => value.into_owned(),
                    _ => property.default_value(),
                };
                property.ty.coerce(raw)
            })
            .collect()
    }
}

impl TypeDescriptor for CompiledType {
    fn name(&self) -> &str {
        CompiledType::name(self)
    }

    fn validate(&self, value: &Value) -> Validation {
        CompiledType::validate(self, value)
    }

    /// Own records pass through; plain objects and foreign records are
    /// rebuilt. A candidate that fails validation comes back as a plain
    /// object of its coerced fields and this type's methods, so the
    /// enclosing validation reports only the nested fields that are wrong.
    fn coerce(&self, value: Value) -> Value {
        let rebuild = match &value {
            Value::Record(instance) => !instance.compiled_type().ptr_eq(self),
            Value::Object(_) => true,
            _ => false,
        };
        if !rebuild {
            return value;
        }

        let candidate = Instance::from_parts(self.clone(), self.prepare(&value));
        if self.validate_fields(&candidate).is_valid() {
            return Value::Record(candidate);
        }

        let mut fields: BTreeMap<String, Value> = candidate
            .fields()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        for (key, method) in self.table().methods.iter() {
            fields
                .entry(key.to_string())
                .or_insert_with(|| Value::Method(method.clone()));
        }
        Value::Object(fields)
    }

    fn serialize(&self, value: &Value) -> Result<JsonValue> {
        match value {
            Value::Record(instance) => self.to_record(instance),
            other => Err(SchemaError::Serialize {
                type_name: self.name().to_string(),
                message: format!("expected a {} record, got {}", self.name(), other.kind()),
            }),
        }
    }

    /// `null` stays `Null` so a missing nested record falls back to the
    /// property default
    fn deserialize(&self, json: &JsonValue) -> Result<Value> {
        if json.is_null() {
            return Ok(Value::Null);
        }
        self.from_record(json).map(Value::Record)
    }
}

impl fmt::Debug for CompiledType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledType")
            .field("name", &self.name())
            .field("properties", &self.property_names().collect::<Vec<_>>())
            .field("methods", &self.table().methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::PropertyOptions;
    use crate::types::{self, NumberType};

    fn person() -> CompiledType {
        SchemaBuilder::new("Person")
            .property("name", types::string())
            .property_with(
                "age",
                NumberType::new().min(0.0),
                PropertyOptions::new().with_default(0),
            )
            .compile()
    }

    #[test]
    fn test_validators_follow_declaration_order() {
        let ty = SchemaBuilder::new("Greeter")
            .property("name", types::string())
            .method("greet", |_, _| Ok(Value::Null))
            .property("age", types::number())
            .compile();

        assert_eq!(ty.validator_count(), 3);
        assert_eq!(ty.property_names().collect::<Vec<_>>(), vec!["name", "age"]);
        assert!(ty.has_method("greet"));
    }

    #[test]
    fn test_construct_applies_defaults_and_coercion() {
        let ty = person();
        let instance = ty
            .construct(Value::object([("name", "Ada"), ("age", "36")]))
            .unwrap();
        assert_eq!(instance.get("age"), Some(&Value::from(36)));

        let instance = ty.construct(Value::object([("name", "Ada")])).unwrap();
        assert_eq!(instance.get("age"), Some(&Value::from(0)));
    }

    #[test]
    fn test_construct_treats_null_as_absent() {
        let ty = person();
        let instance = ty
            .construct(Value::object([("name", Value::from("Ada")), ("age", Value::Null)]))
            .unwrap();
        assert_eq!(instance.get("age"), Some(&Value::from(0)));
    }

    #[test]
    fn test_construct_ignores_undeclared_input_keys() {
        let ty = person();
        let instance = ty
            .construct(Value::object([("name", "Ada"), ("nickname", "Countess")]))
            .unwrap();
        assert!(instance.get("nickname").is_none());
        assert!(instance.extras().is_empty());
    }

    #[test]
    fn test_validate_rejects_non_mappings() {
        let ty = person();
        assert_eq!(
            ty.validate(&Value::from(3)).errors(),
            &["must be a Person record, got number"]
        );
        assert!(!ty.is_instance(&Value::Null));
    }

    #[test]
    fn test_serialize_rejects_plain_values() {
        let ty = person();
        let err = TypeDescriptor::serialize(&ty, &Value::from("x")).unwrap_err();
        assert!(matches!(err, SchemaError::Serialize { .. }));
    }

    #[test]
    fn test_deserialize_null_is_null() {
        let ty = person();
        assert_eq!(
            TypeDescriptor::deserialize(&ty, &JsonValue::Null).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_compiled_type_debug_lists_declarations() {
        let debug = format!("{:?}", person());
        assert!(debug.contains("Person"));
        assert!(debug.contains("\"name\""));
        assert!(debug.contains("\"age\""));
    }
}
