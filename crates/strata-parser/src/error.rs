//! Parser error types

use std::path::PathBuf;
use strata_core::SchemaError;
use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Schema file could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Property type is neither built in nor registered
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Mixin name is not registered
    #[error("Unknown mixin: {0}")]
    UnknownMixin(String),

    /// Unknown field
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Error raised by a compiled type
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
