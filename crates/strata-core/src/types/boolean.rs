//! Boolean type

use super::expected;
use crate::descriptor::{TypeDescriptor, Validation};
use crate::value::Value;

#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanType;

impl TypeDescriptor for BooleanType {
    fn name(&self) -> &str {
        "boolean"
    }

    fn validate(&self, value: &Value) -> Validation {
        match value {
            Value::Bool(_) => Validation::valid(),
            other => Validation::invalid(expected("a boolean", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_validation() {
        assert!(BooleanType.validate(&Value::Bool(false)).is_valid());

        let validation = BooleanType.validate(&Value::from("true"));
        assert_eq!(validation.errors(), &["must be a boolean, got string"]);
    }
}
