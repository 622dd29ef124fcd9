//! Error types for Strata Core

use crate::value::Value;
use thiserror::Error;

/// Schema error type
///
/// Declarations never fail on their own; every variant here is raised while
/// constructing, mutating, serializing or invoking behavior on instances.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A candidate instance failed one or more validators
    #[error("Data validation failed for new {type_name}\n{}", bullet_list(.messages))]
    Construction {
        type_name: String,
        messages: Vec<String>,
    },

    /// A single property write failed its isolated validation
    #[error(
        "Data validation failed when modifying {type_name}.{property}: {value}\n{}",
        bullet_list(.messages)
    )]
    Mutation {
        type_name: String,
        property: String,
        value: Value,
        messages: Vec<String>,
    },

    /// A value could not be turned into its JSON form
    #[error("Cannot serialize {type_name}: {message}")]
    Serialize { type_name: String, message: String },

    /// A JSON value could not be turned back into a value
    #[error("Cannot deserialize {type_name}: {message}")]
    Deserialize { type_name: String, message: String },

    /// No method binding exists under the given name
    #[error("Unknown method: {type_name}.{method}")]
    UnknownMethod { type_name: String, method: String },

    /// The key resolves to a value that cannot be invoked
    #[error("{type_name}.{key} is not callable")]
    NotCallable { type_name: String, key: String },

    /// A method implementation returned an error
    #[error("Method {type_name}.{method} failed: {source}")]
    Method {
        type_name: String,
        method: String,
        #[source]
        source: anyhow::Error,
    },
}

impl SchemaError {
    /// Validation messages carried by construction and mutation failures
    pub fn messages(&self) -> &[String] {
        match self {
            SchemaError::Construction { messages, .. } | SchemaError::Mutation { messages, .. } => {
                messages
            }
            _ => &[],
        }
    }
}

fn bullet_list(messages: &[String]) -> String {
    messages
        .iter()
        .map(|message| format!(" - {}", message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type for schema operations
pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_display_lists_every_message() {
        let err = SchemaError::Construction {
            type_name: "User".to_string(),
            messages: vec![
                ".name must be a string, got null".to_string(),
                ".age must be a number, got string".to_string(),
            ],
        };

        let display = err.to_string();
        assert!(display.starts_with("Data validation failed for new User"));
        assert!(display.contains(" - .name must be a string, got null"));
        assert!(display.contains(" - .age must be a number, got string"));
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_mutation_display_names_property_and_value() {
        let err = SchemaError::Mutation {
            type_name: "User".to_string(),
            property: "age".to_string(),
            value: Value::Number(-1.0),
            messages: vec!["must be greater than or equal to 0".to_string()],
        };

        let display = err.to_string();
        assert!(display.contains("User.age: -1"));
        assert!(display.contains(" - must be greater than or equal to 0"));
    }

    #[test]
    fn test_other_errors_carry_no_messages() {
        let err = SchemaError::UnknownMethod {
            type_name: "User".to_string(),
            method: "greet".to_string(),
        };
        assert!(err.messages().is_empty());
        assert_eq!(err.to_string(), "Unknown method: User.greet");
    }
}
