//! Strata - runtime record schemas with validated instances
//!
//! Declare record types in code with [`SchemaBuilder`] or in YAML through
//! [`parser::SchemaLoader`], then construct, mutate and serialize instances
//! that always satisfy their type's validators.

pub use strata_core::{
    descriptor, error, schema, types, value, CompileOptions, CompiledType, DefaultValue,
    Descriptor, DescriptorExt, Instance, IntoDescriptor, Method, MixinSource, PropertyOptions,
    RecordSerializer, Result, SchemaBuilder, SchemaError, TypeDescriptor, Validation, Value,
    ValueKind,
};

/// Declarative YAML front-end
pub use strata_parser as parser;
