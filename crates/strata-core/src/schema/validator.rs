//! Per-key validators derived at compile time

use crate::descriptor::{Descriptor, Validation};
use crate::value::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Anything that can answer "what is the value at this key"
pub(crate) trait FieldSource {
    fn lookup(&self, key: &str) -> Option<Cow<'_, Value>>;
}

impl FieldSource for BTreeMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<Cow<'_, Value>> {
        self.get(key).map(Cow::Borrowed)
    }
}

/// One entry of a compiled type's validator list
#[derive(Debug, Clone)]
pub(crate) enum FieldValidator {
    /// Runs the property's descriptor and prefixes messages with `.key`
    Property { key: String, ty: Descriptor },
    /// Loose shape check: the value at `key` must be callable
    Method { key: String },
}

impl FieldValidator {
    pub(crate) fn check(&self, source: &dyn FieldSource) -> Validation {
        match self {
            FieldValidator::Property { key, ty } => {
                let null = Value::Null;
                let value = source.lookup(key);
                let value = value.as_deref().unwrap_or(&null);
                ty.validate(value).prefixed(&format!(".{}", key))
            }
            FieldValidator::Method { key } => {
                let kind = source.lookup(key).map(|value| value.kind());
                match kind {
                    Some(kind) if kind.is_callable() => Validation::valid(),
                    Some(kind) => Validation::invalid(format!(".{} must be a method, got {}", key, kind)),
                    None => Validation::invalid(format!(".{} must be a method, got null", key)),
                }
            }
        }
    }
}

/// Run every validator, collecting all messages in list order
pub(crate) fn run_all(validators: &[FieldValidator], source: &dyn FieldSource) -> Validation {
    let mut validation = Validation::valid();
    for validator in validators {
        validation.merge(validator.check(source));
    }
    validation
}
