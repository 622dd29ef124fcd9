//! Reference type descriptors
//!
//! A small set of primitive descriptors satisfying the
//! [`TypeDescriptor`](crate::descriptor::TypeDescriptor) contract:
//! - Strings, numbers and booleans
//! - Enumerations of string variants
//! - Homogeneous arrays
//! - An unconstrained type and the nullable view

pub mod any;
pub mod array;
pub mod boolean;
pub mod enumeration;
pub mod nullable;
pub mod number;
pub mod string;

pub use any::AnyType;
pub use array::ArrayType;
pub use boolean::BooleanType;
pub use enumeration::EnumType;
pub use nullable::Nullable;
pub use number::NumberType;
pub use string::StringType;

use crate::descriptor::{Descriptor, IntoDescriptor};
use crate::value::Value;

/// Unconstrained string type
pub fn string() -> Descriptor {
    StringType::new().into_descriptor()
}

/// Unconstrained number type
pub fn number() -> Descriptor {
    NumberType::new().into_descriptor()
}

/// Boolean type
pub fn boolean() -> Descriptor {
    BooleanType.into_descriptor()
}

/// String type restricted to the given variants
pub fn enumeration<I, S>(variants: I) -> Descriptor
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumType::new(variants).into_descriptor()
}

/// Array type whose elements all satisfy `item`
pub fn array(item: impl IntoDescriptor) -> Descriptor {
    ArrayType::new(item).into_descriptor()
}

/// Type accepting every value
pub fn any() -> Descriptor {
    AnyType.into_descriptor()
}

/// Standard mismatch message, e.g. `must be a string, got null`
pub(crate) fn expected(what: &str, value: &Value) -> String {
    format!("must be {}, got {}", what, value.kind())
}
