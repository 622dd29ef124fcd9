//! Homogeneous array type

use super::expected;
use crate::descriptor::{Descriptor, IntoDescriptor, TypeDescriptor, Validation};
use crate::error::Result;
use crate::value::Value;
use serde_json::Value as JsonValue;

/// Array whose elements all satisfy one item descriptor.
///
/// Element errors are prefixed with their index, e.g. `[2] must be a number`.
#[derive(Debug, Clone)]
pub struct ArrayType {
    item: Descriptor,
    name: String,
}

impl ArrayType {
    pub fn new(item: impl IntoDescriptor) -> Self {
        let item = item.into_descriptor();
        let name = format!("array<{}>", item.name());
        Self { item, name }
    }

    pub fn item(&self) -> &Descriptor {
        &self.item
    }
}

impl TypeDescriptor for ArrayType {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, value: &Value) -> Validation {
        let items = match value {
            Value::Array(items) => items,
            other => return Validation::invalid(expected("an array", other)),
        };

        let mut validation = Validation::valid();
        for (index, item) in items.iter().enumerate() {
            validation.merge(self.item.validate(item).prefixed(&format!("[{}]", index)));
        }
        validation
    }

    fn coerce(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|item| self.item.coerce(item)).collect())
            }
            other => other,
        }
    }

    fn serialize(&self, value: &Value) -> Result<JsonValue> {
        match value {
            Value::Array(items) => Ok(JsonValue::Array(
                items
                    .iter()
                    .map(|item| self.item.serialize(item))
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => other.to_json(),
        }
    }

    fn deserialize(&self, json: &JsonValue) -> Result<Value> {
        match json {
            JsonValue::Array(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(|item| self.item.deserialize(item))
                    .collect::<Result<Vec<_>>>()?,
            )),
            other => Ok(Value::from(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumberType;
    use serde_json::json;

    #[test]
    fn test_array_reports_every_bad_element() {
        let ty = ArrayType::new(NumberType::new());
        assert_eq!(ty.name(), "array<number>");

        let value = Value::Array(vec![Value::from(1), Value::from("x"), Value::Null]);
        assert_eq!(
            ty.validate(&value).errors(),
            &["[1] must be a number, got string", "[2] must be a number, got null"]
        );
        assert_eq!(
            ty.validate(&Value::from("x")).errors(),
            &["must be an array, got string"]
        );
    }

    #[test]
    fn test_array_coerces_elements() {
        let ty = ArrayType::new(NumberType::new());
        let coerced = ty.coerce(Value::Array(vec![Value::from("1"), Value::from(2)]));
        assert_eq!(coerced, Value::Array(vec![Value::from(1), Value::from(2)]));
        assert!(ty.validate(&coerced).is_valid());
    }

    #[test]
    fn test_array_serialization() {
        let ty = ArrayType::new(NumberType::new());
        let value = Value::Array(vec![Value::from(1), Value::from(2.5)]);
        let json = ty.serialize(&value).unwrap();
        assert_eq!(json, json!([1, 2.5]));
        assert_eq!(ty.deserialize(&json).unwrap(), value);
    }
}
