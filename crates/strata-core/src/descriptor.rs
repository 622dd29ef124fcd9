//! Type descriptor contract
//!
//! Every property's declared type implements [`TypeDescriptor`]. The schema
//! machinery never inspects a descriptor beyond this contract, so primitive
//! types, nullable views and compiled record types are interchangeable.

use crate::error::Result;
use crate::types::Nullable;
use crate::value::Value;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// Outcome of validating one value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    /// Ordered diagnostic messages; empty when the value is valid
    pub errors: Vec<String>,
}

impl Validation {
    /// A passing validation
    pub fn valid() -> Self {
        Self { errors: Vec::new() }
    }

    /// A failing validation with a single message
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    pub fn from_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }

    /// Prefix every message with a path segment, e.g. `.name` or `[2]`
    pub fn prefixed(self, path: &str) -> Self {
        Self {
            errors: self
                .errors
                .into_iter()
                .map(|message| {
                    // Nested paths chain without a separator: `.address.city ...`
                    if message.starts_with('.') || message.starts_with('[') {
                        format!("{}{}", path, message)
                    } else {
                        format!("{} {}", path, message)
                    }
                })
                .collect(),
        }
    }

    /// Append another validation's messages
    pub fn merge(&mut self, other: Validation) {
        self.errors.extend(other.errors);
    }
}

/// Capabilities required of any value type used as a property's type
pub trait TypeDescriptor: fmt::Debug + Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Check a value without side effects
    fn validate(&self, value: &Value) -> Validation;

    /// Best-effort normalization applied before validation.
    ///
    /// Must be idempotent on already-coerced input.
    fn coerce(&self, value: Value) -> Value {
        value
    }

    /// Turn a value into its JSON-compatible form
    fn serialize(&self, value: &Value) -> Result<JsonValue> {
        value.to_json()
    }

    /// Inverse of [`TypeDescriptor::serialize`]
    fn deserialize(&self, json: &JsonValue) -> Result<Value> {
        Ok(Value::from(json))
    }
}

/// Shared handle to a type descriptor
pub type Descriptor = Arc<dyn TypeDescriptor>;

/// Conversion into a shared descriptor handle
pub trait IntoDescriptor {
    fn into_descriptor(self) -> Descriptor;
}

impl<T: TypeDescriptor + 'static> IntoDescriptor for T {
    fn into_descriptor(self) -> Descriptor {
        Arc::new(self)
    }
}

impl IntoDescriptor for Descriptor {
    fn into_descriptor(self) -> Descriptor {
        self
    }
}

impl IntoDescriptor for &Descriptor {
    fn into_descriptor(self) -> Descriptor {
        Arc::clone(self)
    }
}

/// Derived views available on every descriptor handle
pub trait DescriptorExt {
    /// A view that additionally accepts `Null`
    fn nullable(&self) -> Descriptor;
}

impl DescriptorExt for Descriptor {
    fn nullable(&self) -> Descriptor {
        Arc::new(Nullable::new(Arc::clone(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_prefixing() {
        let validation = Validation::from_errors(vec![
            "must be a string, got null".to_string(),
            ".city must be a string, got number".to_string(),
            "[0] must be a number, got string".to_string(),
        ])
        .prefixed(".address");

        assert_eq!(
            validation.errors(),
            &[
                ".address must be a string, got null".to_string(),
                ".address.city must be a string, got number".to_string(),
                ".address[0] must be a number, got string".to_string(),
            ]
        );
    }

    #[test]
    fn test_validation_merge_keeps_order() {
        let mut validation = Validation::invalid("first");
        validation.merge(Validation::valid());
        validation.merge(Validation::invalid("second"));
        assert!(!validation.is_valid());
        assert_eq!(validation.into_errors(), vec!["first", "second"]);
    }

    #[test]
    fn test_default_serialization_is_plain_json() {
        #[derive(Debug)]
        struct Anything;

        impl TypeDescriptor for Anything {
            fn name(&self) -> &str {
                "anything"
            }

            fn validate(&self, _value: &Value) -> Validation {
                Validation::valid()
            }
        }

        let descriptor = Anything.into_descriptor();
        let json = descriptor.serialize(&Value::from("x")).unwrap();
        assert_eq!(json, JsonValue::String("x".to_string()));
        assert_eq!(descriptor.deserialize(&json).unwrap(), Value::from("x"));
        assert_eq!(descriptor.coerce(Value::from(1)), Value::from(1));
    }
}
