//! Strata Parser - YAML schema documents for Strata record types
//!
//! This crate parses declarative `structure:` documents and compiles them
//! into [`strata_core::CompiledType`]s through a registry of named
//! structures and mixins.

pub mod document;
pub mod error;
pub mod loader;
pub mod parser;
pub mod registry;
pub mod yaml;

// Re-export main parser types
pub use document::{PropertyDecl, SchemaDocument, TypeExpr};
pub use error::{ParseError, Result};
pub use loader::{LoaderOptions, SchemaLoader};
pub use parser::SchemaParser;
pub use registry::TypeRegistry;
pub use yaml::YamlParser;
