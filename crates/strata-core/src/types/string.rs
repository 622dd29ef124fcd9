//! String type

use super::expected;
use crate::descriptor::{TypeDescriptor, Validation};
use crate::value::Value;

/// UTF-8 string with optional length bounds (counted in characters)
#[derive(Debug, Clone, Default)]
pub struct StringType {
    min_length: Option<usize>,
    max_length: Option<usize>,
}

impl StringType {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require at least `len` characters
    pub fn min_length(mut self, len: usize) -> Self {
        self.min_length = Some(len);
        self
    }

    /// Allow at most `len` characters
    pub fn max_length(mut self, len: usize) -> Self {
        self.max_length = Some(len);
        self
    }
}

impl TypeDescriptor for StringType {
    fn name(&self) -> &str {
        "string"
    }

    fn validate(&self, value: &Value) -> Validation {
        let s = match value {
            Value::String(s) => s,
            other => return Validation::invalid(expected("a string", other)),
        };

        let mut validation = Validation::valid();
        let len = s.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                validation.merge(Validation::invalid(format!(
                    "must be at least {} characters long",
                    min
                )));
            }
        }
        if let Some(max) = self.max_length {
            if len > max {
                validation.merge(Validation::invalid(format!(
                    "must be at most {} characters long",
                    max
                )));
            }
        }
        validation
    }
}
