//! YAML helpers
//!
//! Field accessors over `serde_yaml::Value` and conversion into JSON values.

use crate::error::{ParseError, Result};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// YAML parser utilities
pub struct YamlParser;

impl YamlParser {
    /// Parse YAML string into a YAML value
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Parse YAML string containing multiple documents separated by `---`.
    ///
    /// Empty documents (e.g. a leading `---`) are skipped.
    pub fn parse_multi_document(yaml_str: &str) -> Result<Vec<YamlValue>> {
        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(yaml_str) {
            let value = YamlValue::deserialize(document)?;
            if !value.is_null() {
                documents.push(value);
            }
        }
        Ok(documents)
    }

    /// Get a required string field from YAML object
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| ParseError::MissingField {
                field: field.to_string(),
            })
    }

    /// Get an optional string field from YAML object
    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    }

    /// Get an optional boolean field, rejecting non-boolean values
    pub fn get_optional_bool(obj: &YamlValue, field: &str, path: &str) -> Result<Option<bool>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(None),
            Some(value) => value.as_bool().map(Some).ok_or_else(|| ParseError::InvalidValue {
                field: path.to_string(),
                message: "expected a boolean".to_string(),
            }),
        }
    }

    /// Get an optional number field, rejecting non-numeric values
    pub fn get_optional_f64(obj: &YamlValue, field: &str, path: &str) -> Result<Option<f64>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| ParseError::InvalidValue {
                field: path.to_string(),
                message: "expected a number".to_string(),
            }),
        }
    }

    /// Get an optional non-negative integer field
    pub fn get_optional_usize(obj: &YamlValue, field: &str, path: &str) -> Result<Option<usize>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(None),
            Some(value) => value
                .as_u64()
                .map(|n| Some(n as usize))
                .ok_or_else(|| ParseError::InvalidValue {
                    field: path.to_string(),
                    message: "expected a non-negative integer".to_string(),
                }),
        }
    }

    /// Get an optional list of strings; a single string counts as a list of one
    pub fn get_string_list(obj: &YamlValue, field: &str, path: &str) -> Result<Vec<String>> {
        match obj.get(field) {
            None | Some(YamlValue::Null) => Ok(Vec::new()),
            Some(YamlValue::String(s)) => Ok(vec![s.clone()]),
            Some(YamlValue::Sequence(items)) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    item.as_str()
                        .map(|s| s.to_string())
                        .ok_or_else(|| ParseError::InvalidValue {
                            field: format!("{}[{}]", path, idx),
                            message: "expected a string".to_string(),
                        })
                })
                .collect(),
            Some(_) => Err(ParseError::InvalidValue {
                field: path.to_string(),
                message: "expected a list of strings".to_string(),
            }),
        }
    }

    /// Get all keys from a YAML mapping
    pub fn get_keys(obj: &YamlValue) -> Vec<String> {
        if let Some(mapping) = obj.as_mapping() {
            mapping
                .keys()
                .filter_map(|k| k.as_str())
                .map(|s| s.to_string())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Convert a YAML value into JSON.
    ///
    /// Mapping keys must be strings (numbers and booleans are stringified);
    /// tags are dropped.
    pub fn to_json(value: &YamlValue, path: &str) -> Result<JsonValue> {
        Ok(match value {
            YamlValue::Null => JsonValue::Null,
            YamlValue::Bool(b) => JsonValue::Bool(*b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    JsonValue::from(i)
                } else if let Some(u) = n.as_u64() {
                    JsonValue::from(u)
                } else {
                    n.as_f64()
                        .and_then(serde_json::Number::from_f64)
                        .map(JsonValue::Number)
                        .ok_or_else(|| ParseError::InvalidValue {
                            field: path.to_string(),
                            message: format!("{} has no JSON form", n),
                        })?
                }
            }
            YamlValue::String(s) => JsonValue::String(s.clone()),
            YamlValue::Sequence(items) => JsonValue::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(idx, item)| Self::to_json(item, &format!("{}[{}]", path, idx)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            YamlValue::Mapping(mapping) => {
                let mut out = serde_json::Map::with_capacity(mapping.len());
                for (key, item) in mapping {
                    let key = match key {
                        YamlValue::String(s) => s.clone(),
                        YamlValue::Number(n) => n.to_string(),
                        YamlValue::Bool(b) => b.to_string(),
                        _ => {
                            return Err(ParseError::InvalidValue {
                                field: path.to_string(),
                                message: "mapping keys must be scalars".to_string(),
                            })
                        }
                    };
                    let item = Self::to_json(item, &format!("{}.{}", path, key))?;
                    out.insert(key, item);
                }
                JsonValue::Object(out)
            }
            YamlValue::Tagged(tagged) => Self::to_json(&tagged.value, path)?,
        })
    }
}
