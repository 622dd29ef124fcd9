//! Record serializer pair
//!
//! The serialized form of an instance is a plain JSON object whose keys are
//! exactly the declared property names. No type tags or version envelopes are
//! added here.

use super::compiled::CompiledType;
use super::instance::Instance;
use crate::error::{Result, SchemaError};
use crate::value::Value;
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

/// Converts instances to and from their JSON record form.
///
/// A custom implementation passed through
/// [`CompileOptions`](super::CompileOptions) replaces both directions.
pub trait RecordSerializer: Send + Sync {
    /// Serialize an instance
    fn to_record(&self, ty: &CompiledType, instance: &Instance) -> Result<JsonValue>;

    /// Deserialize a JSON record and construct an instance from it
    fn from_record(&self, ty: &CompiledType, json: &JsonValue) -> Result<Instance>;
}

/// Maps every declared property through its descriptor
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSerializer;

impl RecordSerializer for DefaultSerializer {
    fn to_record(&self, ty: &CompiledType, instance: &Instance) -> Result<JsonValue> {
        let mut record = serde_json::Map::new();
        for (key, property) in ty.table().properties.iter() {
            let value = instance.get(key).unwrap_or(&Value::Null);
            record.insert(key.to_string(), property.ty.serialize(value)?);
        }
        Ok(JsonValue::Object(record))
    }

    fn from_record(&self, ty: &CompiledType, json: &JsonValue) -> Result<Instance> {
        let object = json.as_object().ok_or_else(|| SchemaError::Deserialize {
            type_name: ty.name().to_string(),
            message: format!("expected a JSON object, got {}", json_kind(json)),
        })?;

        let mut data = BTreeMap::new();
        for (key, property) in ty.table().properties.iter() {
            let raw = object.get(key).unwrap_or(&JsonValue::Null);
            data.insert(key.to_string(), property.ty.deserialize(raw)?);
        }
        ty.construct(Value::Object(data))
    }
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
