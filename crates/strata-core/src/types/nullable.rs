//! Nullable view over another descriptor

use crate::descriptor::{Descriptor, TypeDescriptor, Validation};
use crate::error::Result;
use crate::value::Value;
use serde_json::Value as JsonValue;

/// Accepts `Null` and delegates every non-null value to the inner descriptor
#[derive(Debug, Clone)]
pub struct Nullable {
    inner: Descriptor,
    name: String,
}

impl Nullable {
    pub fn new(inner: Descriptor) -> Self {
        let name = format!("{}?", inner.name());
        Self { inner, name }
    }

    pub fn inner(&self) -> &Descriptor {
        &self.inner
    }
}

impl TypeDescriptor for Nullable {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &Value) -> Validation {
        if value.is_null() {
            Validation::valid()
        } else {
            self.inner.validate(value)
        }
    }

    fn coerce(&self, value: Value) -> Value {
        if value.is_null() {
            value
        } else {
            self.inner.coerce(value)
        }
    }

    fn serialize(&self, value: &Value) -> Result<JsonValue> {
        if value.is_null() {
            Ok(JsonValue::Null)
        } else {
            self.inner.serialize(value)
        }
    }

    fn deserialize(&self, json: &JsonValue) -> Result<Value> {
        if json.is_null() {
            Ok(Value::Null)
        } else {
            self.inner.deserialize(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::descriptor::{DescriptorExt, TypeDescriptor};
    use crate::types;
    use crate::value::Value;
    use serde_json::Value as JsonValue;

    #[test]
    fn test_nullable_accepts_null() {
        let ty = types::string().nullable();
        assert_eq!(ty.name(), "string?");
        assert!(ty.validate(&Value::Null).is_valid());
        assert!(ty.validate(&Value::from("x")).is_valid());
        assert_eq!(
            ty.validate(&Value::from(1)).errors(),
            &["must be a string, got number"]
        );
    }

    #[test]
    fn test_nullable_short_circuits_null() {
        let ty = types::number().nullable();
        assert_eq!(ty.coerce(Value::Null), Value::Null);
        assert_eq!(ty.coerce(Value::from("5")), Value::from(5));
        assert_eq!(ty.serialize(&Value::Null).unwrap(), JsonValue::Null);
        assert_eq!(ty.deserialize(&JsonValue::Null).unwrap(), Value::Null);
    }
}
