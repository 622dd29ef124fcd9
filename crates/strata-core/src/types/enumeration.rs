//! Enumeration type

use super::expected;
use crate::descriptor::{TypeDescriptor, Validation};
use crate::value::Value;

/// String restricted to a fixed set of variants
#[derive(Debug, Clone)]
pub struct EnumType {
    variants: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }
}

impl TypeDescriptor for EnumType {
    fn name(&self) -> &str {
        "enum"
    }

    fn validate(&self, value: &Value) -> Validation {
        match value {
            Value::String(s) if self.variants.iter().any(|v| v == s) => Validation::valid(),
            Value::String(s) => Validation::invalid(format!(
                "must be one of [{}], got {:?}",
                self.variants.join(", "),
                s
            )),
            other => Validation::invalid(expected("one of the enum variants", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_validation() {
        let ty = EnumType::new(["admin", "member"]);
        assert!(ty.validate(&Value::from("admin")).is_valid());
        assert_eq!(
            ty.validate(&Value::from("guest")).errors(),
            &["must be one of [admin, member], got \"guest\""]
        );
        assert_eq!(
            ty.validate(&Value::from(1)).errors(),
            &["must be one of the enum variants, got number"]
        );
    }
}
