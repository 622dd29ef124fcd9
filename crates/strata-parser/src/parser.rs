//! Schema parser
//!
//! Parses YAML `structure:` documents into [`SchemaDocument`]s.

use crate::document::{PropertyDecl, SchemaDocument, TypeExpr};
use crate::error::{ParseError, Result};
use crate::yaml::YamlParser;
use serde_yaml::Value as YamlValue;
use std::path::Path;

/// Option keys every property understands
const COMMON_KEYS: &[&str] = &["type", "nullable", "default", "description"];
const STRING_KEYS: &[&str] = &["min_length", "max_length"];
const NUMBER_KEYS: &[&str] = &["min", "max", "integer"];
const ENUM_KEYS: &[&str] = &["values"];
const ARRAY_KEYS: &[&str] = &["items"];
const NO_KEYS: &[&str] = &[];

/// Schema parser
pub struct SchemaParser;

impl SchemaParser {
    /// Parse a single schema document from a YAML string
    pub fn parse(yaml_str: &str) -> Result<SchemaDocument> {
        let yaml = YamlParser::parse(yaml_str)?;
        Self::parse_from_yaml(&yaml)
    }

    /// Parse every document of a `---` separated YAML stream
    pub fn parse_multi(yaml_str: &str) -> Result<Vec<SchemaDocument>> {
        YamlParser::parse_multi_document(yaml_str)?
            .iter()
            .map(Self::parse_from_yaml)
            .collect()
    }

    /// Read and parse every document in a file
    pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<SchemaDocument>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_multi(&content)
    }

    /// Parse a schema document from a YAML value
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<SchemaDocument> {
        let structure = yaml
            .get("structure")
            .ok_or_else(|| ParseError::MissingField {
                field: "structure".to_string(),
            })?;

        let name = YamlParser::get_string(structure, "name").map_err(|_| {
            ParseError::MissingField {
                field: "structure.name".to_string(),
            }
        })?;

        let mut document = SchemaDocument::new(name);
        document.description = YamlParser::get_optional_string(structure, "description");
        document.extends = YamlParser::get_optional_string(structure, "extends");
        document.mixins = YamlParser::get_string_list(structure, "mixins", "structure.mixins")?;

        match structure.get("properties") {
            None | Some(YamlValue::Null) => {}
            Some(YamlValue::Mapping(mapping)) => {
                for (key, value) in mapping {
                    let prop_name = key.as_str().ok_or_else(|| ParseError::InvalidValue {
                        field: "structure.properties".to_string(),
                        message: "property names must be strings".to_string(),
                    })?;
                    document
                        .properties
                        .push(Self::parse_property(prop_name, value)?);
                }
            }
            Some(_) => {
                return Err(ParseError::InvalidValue {
                    field: "structure.properties".to_string(),
                    message: "expected a mapping of property declarations".to_string(),
                })
            }
        }

        Ok(document)
    }

    /// Parse one property declaration
    ///
    /// Supports:
    /// 1. Shorthand: a bare type name (`age: number`)
    /// 2. Full form: a mapping with `type` and options
    fn parse_property(name: &str, yaml: &YamlValue) -> Result<PropertyDecl> {
        let path = format!("structure.properties.{}", name);

        if let Some(type_name) = yaml.as_str() {
            return Ok(PropertyDecl::new(name, Self::shorthand(type_name, &path)?));
        }

        if !yaml.is_mapping() {
            return Err(ParseError::InvalidValue {
                field: path,
                message: "expected a type name or a mapping".to_string(),
            });
        }

        let (ty, type_keys) = Self::parse_type(yaml, &path)?;
        let mut decl = PropertyDecl::new(name, ty);
        decl.nullable =
            YamlParser::get_optional_bool(yaml, "nullable", &format!("{}.nullable", path))?
                .unwrap_or(false);
        decl.description = YamlParser::get_optional_string(yaml, "description");
        decl.default = match yaml.get("default") {
            Some(value) => Some(YamlParser::to_json(value, &format!("{}.default", path))?),
            None => None,
        };

        for key in YamlParser::get_keys(yaml) {
            if COMMON_KEYS.contains(&key.as_str()) || type_keys.contains(&key.as_str()) {
                continue;
            }
            let option_path = format!("{}.{}", path, key);
            let value = yaml.get(key.as_str()).unwrap_or(&YamlValue::Null);
            decl.options
                .push((key.clone(), YamlParser::to_json(value, &option_path)?));
        }

        Ok(decl)
    }

    /// A bare type name; `array` and `enum` need options and cannot stand
    /// alone
    fn shorthand(type_name: &str, path: &str) -> Result<TypeExpr> {
        let required = match type_name {
            "array" => "items",
            "enum" => "values",
            _ => return Ok(TypeExpr::from_name(type_name)),
        };
        Err(ParseError::MissingField {
            field: format!("{}.{}", path, required),
        })
    }

    /// Parse the type expression of a mapping, returning the option keys the
    /// type consumed
    fn parse_type(yaml: &YamlValue, path: &str) -> Result<(TypeExpr, &'static [&'static str])> {
        let type_name = YamlParser::get_string(yaml, "type").map_err(|_| ParseError::MissingField {
            field: format!("{}.type", path),
        })?;

        let opt = |key: &str| format!("{}.{}", path, key);

        Ok(match type_name.as_str() {
            "string" => (
                TypeExpr::String {
                    min_length: YamlParser::get_optional_usize(yaml, "min_length", &opt("min_length"))?,
                    max_length: YamlParser::get_optional_usize(yaml, "max_length", &opt("max_length"))?,
                },
                STRING_KEYS,
            ),
            "number" | "integer" => (
                TypeExpr::Number {
                    min: YamlParser::get_optional_f64(yaml, "min", &opt("min"))?,
                    max: YamlParser::get_optional_f64(yaml, "max", &opt("max"))?,
                    integer: type_name == "integer"
                        || YamlParser::get_optional_bool(yaml, "integer", &opt("integer"))?
                            .unwrap_or(false),
                },
                NUMBER_KEYS,
            ),
            "enum" => {
                let values = YamlParser::get_string_list(yaml, "values", &opt("values"))?;
                if values.is_empty() {
                    return Err(ParseError::MissingField {
                        field: opt("values"),
                    });
                }
                (TypeExpr::Enum { values }, ENUM_KEYS)
            }
            "array" => {
                let items = match yaml.get("items") {
                    None => {
                        return Err(ParseError::MissingField {
                            field: opt("items"),
                        })
                    }
                    Some(YamlValue::String(item_type)) => Self::shorthand(item_type, &opt("items"))?,
                    Some(items) if items.is_mapping() => Self::parse_type(items, &opt("items"))?.0,
                    Some(_) => {
                        return Err(ParseError::InvalidValue {
                            field: opt("items"),
                            message: "expected a type name or a mapping".to_string(),
                        })
                    }
                };
                (
                    TypeExpr::Array {
                        items: Box::new(items),
                    },
                    ARRAY_KEYS,
                )
            }
            other => (TypeExpr::from_name(other), NO_KEYS),
        })
    }
}
