//! Validated record instances
//!
//! An [`Instance`] stores one value per declared property, in declaration
//! order, plus an unrestricted side map for keys its type does not declare.
//! Every write to a declared property goes through the mutation guard in
//! [`Instance::set`]; there is no other way to reach the stored values
//! mutably.

use super::compiled::CompiledType;
use super::validator::FieldSource;
use crate::descriptor::Validation;
use crate::error::{Result, SchemaError};
use crate::value::Value;
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// A live record produced by a compiled type's constructor
#[derive(Clone)]
pub struct Instance {
    ty: CompiledType,
    values: Vec<Value>,
    extras: BTreeMap<String, Value>,
}

impl Instance {
    /// Values must line up with the type's property order
    pub(crate) fn from_parts(ty: CompiledType, values: Vec<Value>) -> Self {
        Self {
            ty,
            values,
            extras: BTreeMap::new(),
        }
    }

    /// The compiled type that constructed this instance
    pub fn compiled_type(&self) -> &CompiledType {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Read a declared property or an extra key
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self.ty.table().properties.position(key) {
            Some(position) => self.values.get(position),
            None => self.extras.get(key),
        }
    }

    /// Write a value.
    ///
    /// Declared properties are coerced, validated in isolation with their
    /// descriptor, and committed only when valid; a rejected write leaves
    /// the previous value in place. A declared method name only accepts a
    /// callable replacement. Other keys are stored unrestricted.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let Some((position, property)) = self.ty.table().properties.get_full(key) else {
            if self.ty.has_method(key) && !value.kind().is_callable() {
                debug!(type_name = %self.ty.name(), method = %key, "mutation rejected");
                return Err(SchemaError::Mutation {
                    type_name: self.ty.name().to_string(),
                    property: key.to_string(),
                    messages: vec![format!("must be a method, got {}", value.kind())],
                    value,
                });
            }
            self.extras.insert(key.to_string(), value);
            return Ok(());
        };

        let descriptor = &property.ty;
        let coerced = descriptor.coerce(value);
        let validation = descriptor.validate(&coerced);
        if !validation.is_valid() {
            debug!(
                type_name = %self.ty.name(),
                property = %key,
                errors = validation.errors().len(),
                "mutation rejected"
            );
            return Err(SchemaError::Mutation {
                type_name: self.ty.name().to_string(),
                property: key.to_string(),
                value: coerced,
                messages: validation.into_errors(),
            });
        }

        self.values[position] = coerced;
        Ok(())
    }

    /// Invoke a method binding.
    ///
    /// The key resolves like any other lookup, so a field or extra key
    /// holding a method shadows the type's binding.
    pub fn call(&mut self, name: &str, args: &[Value]) -> Result<Value> {
        let method = match self.lookup(name) {
            Some(value) => match value.as_ref() {
                Value::Method(method) => method.clone(),
                _ => {
                    return Err(SchemaError::NotCallable {
                        type_name: self.type_name().to_string(),
                        key: name.to_string(),
                    })
                }
            },
            None => {
                return Err(SchemaError::UnknownMethod {
                    type_name: self.type_name().to_string(),
                    method: name.to_string(),
                })
            }
        };

        method.call(self, args).map_err(|source| SchemaError::Method {
            type_name: self.type_name().to_string(),
            method: name.to_string(),
            source,
        })
    }

    /// Declared properties in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty.table().properties.keys().zip(self.values.iter())
    }

    /// Keys written outside the declared properties
    pub fn extras(&self) -> &BTreeMap<String, Value> {
        &self.extras
    }

    /// Run the type's full validator list against this instance
    pub fn validate(&self) -> Validation {
        self.ty.validate_fields(self)
    }

    /// Serialize through the type's serializer pair
    pub fn to_record(&self) -> Result<JsonValue> {
        self.ty.to_record(self)
    }

    /// Resolve a key: declared field, then extra key, then method binding
    pub(crate) fn lookup(&self, key: &str) -> Option<Cow<'_, Value>> {
        if let Some(value) = self.get(key) {
            return Some(Cow::Borrowed(value));
        }
        self.ty
            .table()
            .methods
            .get(key)
            .map(|method| Cow::Owned(Value::Method(method.clone())))
    }
}

impl FieldSource for Instance {
    fn lookup(&self, key: &str) -> Option<Cow<'_, Value>> {
        Instance::lookup(self, key)
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.ty.ptr_eq(&other.ty) && self.values == other.values && self.extras == other.extras
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.type_name());
        for (key, value) in self.fields() {
            out.field(key, value);
        }
        for (key, value) in &self.extras {
            out.field(key, value);
        }
        out.finish()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.type_name())?;
        for (i, (key, value)) in self.fields().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, " {}: {}", key, value)?;
        }
        f.write_str(" }")
    }
}
