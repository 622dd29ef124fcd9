//! Record schemas
//!
//! This module contains the schema machinery:
//! - Declaration tables and property options
//! - The schema builder and its mixin sources
//! - Compiled types, their validators and serializer pair
//! - Validated instances

pub mod builder;
pub mod compiled;
pub mod instance;
pub mod serializer;
pub mod table;
mod validator;

pub use builder::{MixinSource, SchemaBuilder};
pub use compiled::{CompileOptions, CompiledType};
pub use instance::Instance;
pub use serializer::{DefaultSerializer, RecordSerializer};
pub use table::{DefaultValue, OrderedMap, PropertyDefinition, PropertyOptions, SchemaTable};
