//! Unconstrained type

use crate::descriptor::{TypeDescriptor, Validation};
use crate::value::Value;

/// Accepts every value, including `Null`
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyType;

impl TypeDescriptor for AnyType {
    fn name(&self) -> &str {
        "any"
    }

    fn validate(&self, _value: &Value) -> Validation {
        Validation::valid()
    }
}
