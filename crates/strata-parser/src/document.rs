//! Schema document model
//!
//! The parsed, not yet resolved form of a `structure:` document.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Property type expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TypeExpr {
    String {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_length: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_length: Option<usize>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
        #[serde(default)]
        integer: bool,
    },
    Boolean,
    Any,
    Enum {
        values: Vec<String>,
    },
    Array {
        items: Box<TypeExpr>,
    },
    /// A previously registered structure
    Named {
        name: String,
    },
}

impl TypeExpr {
    /// Unconstrained expression for a bare type name
    pub fn from_name(name: &str) -> Self {
        match name {
            "string" => TypeExpr::String {
                min_length: None,
                max_length: None,
            },
            "number" => TypeExpr::Number {
                min: None,
                max: None,
                integer: false,
            },
            "integer" => TypeExpr::Number {
                min: None,
                max: None,
                integer: true,
            },
            "boolean" | "bool" => TypeExpr::Boolean,
            "any" => TypeExpr::Any,
            other => TypeExpr::Named {
                name: other.to_string(),
            },
        }
    }

    /// Names of registered structures this expression depends on
    pub fn references(&self) -> Vec<&str> {
        match self {
            TypeExpr::Named { name } => vec![name.as_str()],
            TypeExpr::Array { items } => items.references(),
            _ => Vec::new(),
        }
    }
}

/// One declared property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeExpr,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Option keys the parser does not recognize, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<(String, JsonValue)>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: false,
            default: None,
            description: None,
            options: Vec::new(),
        }
    }
}

/// A parsed `structure:` document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Registered structure to extend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    /// Registered mixins or structures, applied in order
    #[serde(default)]
    pub mixins: Vec<String>,
    /// Properties in document order
    pub properties: Vec<PropertyDecl>,
}

impl SchemaDocument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            extends: None,
            mixins: Vec::new(),
            properties: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Every structure name the document needs registered before loading
    pub fn dependencies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let referenced = self
            .extends
            .iter()
            .map(String::as_str)
            .chain(self.properties.iter().flat_map(|p| p.ty.references()));
        for name in referenced {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
