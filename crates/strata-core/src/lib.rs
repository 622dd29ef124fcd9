//! Strata Core - runtime record schemas
//!
//! This crate provides the building blocks for describing record types at
//! runtime and working with their instances:
//! - Value types for record data
//! - The type descriptor contract and a reference set of primitive types
//! - The schema builder and compiled types
//! - Validated instances and their serializer pair
//! - Error types

pub mod descriptor;
pub mod error;
pub mod schema;
pub mod types;
pub mod value;

// Re-export commonly used types
pub use descriptor::{Descriptor, DescriptorExt, IntoDescriptor, TypeDescriptor, Validation};
pub use error::{Result, SchemaError};
pub use schema::{
    CompileOptions, CompiledType, DefaultValue, Instance, MixinSource, PropertyOptions,
    RecordSerializer, SchemaBuilder,
};
pub use value::{Method, Value, ValueKind};
