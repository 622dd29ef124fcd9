//! Runtime value types for Strata records
//!
//! `Value` is close to a JSON value, with two additions: a `Record` holds a
//! constructed instance of some compiled type, and a `Method` holds a
//! callable shared behavior binding. `Null` doubles as "absent".

use crate::error::Result;
use crate::schema::Instance;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Largest integer an f64 represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Runtime value type
#[derive(Clone, Default)]
pub enum Value {
    /// Null or absent value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Number value (f64 handles both int and float)
    Number(f64),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Plain key-value mapping
    Object(BTreeMap<String, Value>),
    /// Instance of a compiled type
    Record(Instance),
    /// Callable behavior binding
    Method(Method),
}

/// Coarse classification of a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
    Record,
    Method,
}

impl ValueKind {
    /// Only method bindings can be invoked
    pub fn is_callable(self) -> bool {
        matches!(self, ValueKind::Method)
    }

    /// Get kind name as string
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Record => "record",
            ValueKind::Method => "method",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Build an object value from key/value pairs
    pub fn object<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// An empty object value
    pub fn empty_object() -> Self {
        Value::Object(BTreeMap::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Record(_) => ValueKind::Record,
            Value::Method(_) => ValueKind::Method,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Instance> {
        match self {
            Value::Record(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_method(&self) -> Option<&Method> {
        match self {
            Value::Method(method) => Some(method),
            _ => None,
        }
    }

    /// Look up a key on a mapping-shaped value.
    ///
    /// Objects answer from their entries; records answer from declared
    /// fields, extra keys and method bindings. Every other value has no keys.
    pub fn field(&self, key: &str) -> Option<Cow<'_, Value>> {
        match self {
            Value::Object(map) => map.get(key).map(Cow::Borrowed),
            Value::Record(instance) => instance.lookup(key),
            _ => None,
        }
    }

    /// Convert to plain JSON.
    ///
    /// Records go through their compiled type's serializer; methods have no
    /// JSON form and become `null`.
    pub fn to_json(&self) -> Result<JsonValue> {
        Ok(match self {
            Value::Null | Value::Method(_) => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Number(n) => number_to_json(*n),
            Value::String(s) => JsonValue::String(s.clone()),
            Value::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::with_capacity(map.len());
                for (key, value) in map {
                    out.insert(key.clone(), value.to_json()?);
                }
                JsonValue::Object(out)
            }
            Value::Record(instance) => instance.to_record()?,
        })
    }
}

fn number_to_json(n: f64) -> JsonValue {
    if n.is_finite() && n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        JsonValue::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Method(a), Value::Method(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(items) => f.debug_tuple("Array").field(items).finish(),
            Value::Object(map) => f.debug_tuple("Object").field(map).finish(),
            Value::Record(instance) => f.debug_tuple("Record").field(instance).finish(),
            Value::Method(method) => fmt::Debug::fmt(method, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {}", key, value)?;
                }
                f.write_str("}")
            }
            Value::Record(instance) => write!(f, "{}", instance),
            Value::Method(_) => f.write_str("[method]"),
        }
    }
}

impl From<JsonValue> for Value {
    fn from(json: JsonValue) -> Self {
        match json {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&JsonValue> for Value {
    fn from(json: &JsonValue) -> Self {
        Value::from(json.clone())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Object(map)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Record(instance)
    }
}

impl From<Method> for Value {
    fn from(method: Method) -> Self {
        Value::Method(method)
    }
}

/// Signature of a method implementation.
///
/// The receiver is the instance the method was invoked on; writes through it
/// go through the same mutation guard as any other caller.
pub type MethodFn = dyn Fn(&mut Instance, &[Value]) -> anyhow::Result<Value> + Send + Sync;

/// Shared behavior attached to every instance of a compiled type
#[derive(Clone)]
pub struct Method {
    func: Arc<MethodFn>,
}

impl Method {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&mut Instance, &[Value]) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invoke the method on a receiver
    pub fn call(&self, receiver: &mut Instance, args: &[Value]) -> anyhow::Result<Value> {
        (self.func)(receiver, args)
    }

    /// Methods compare by identity of the shared implementation
    pub fn ptr_eq(&self, other: &Method) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Method(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_kinds() {
        assert_eq!(Value::Null.kind(), ValueKind::Null);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::from(42).kind(), ValueKind::Number);
        assert_eq!(Value::from("hi").kind(), ValueKind::String);
        assert_eq!(Value::Array(vec![]).kind(), ValueKind::Array);
        assert_eq!(Value::empty_object().kind(), ValueKind::Object);

        let method = Method::new(|_, _| Ok(Value::Null));
        assert_eq!(Value::from(method).kind(), ValueKind::Method);
        assert!(ValueKind::Method.is_callable());
        assert!(!ValueKind::Object.is_callable());
    }

    #[test]
    fn test_value_from_json() {
        let value = Value::from(json!({
            "name": "Ada",
            "age": 36,
            "tags": ["math", "engines"],
            "retired": null
        }));

        assert_eq!(value.field("name").as_deref(), Some(&Value::from("Ada")));
        assert_eq!(value.field("age").as_deref(), Some(&Value::Number(36.0)));
        assert_eq!(value.field("retired").as_deref(), Some(&Value::Null));
        assert!(value.field("missing").is_none());
        assert_eq!(
            value.field("tags").and_then(|v| v.as_array().map(|a| a.len())),
            Some(2)
        );
    }

    #[test]
    fn test_value_to_json_keeps_integers_integral() {
        let value = Value::object([("count", Value::from(3)), ("ratio", Value::from(0.5))]);
        let json = value.to_json().unwrap();
        assert_eq!(json, json!({"count": 3, "ratio": 0.5}));
        assert_eq!(Value::Number(f64::NAN).to_json().unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_method_serializes_to_null() {
        let method = Method::new(|_, _| Ok(Value::Null));
        assert_eq!(Value::from(method).to_json().unwrap(), JsonValue::Null);
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Number(-1.0).to_string(), "-1");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::from("Ada").to_string(), "\"Ada\"");
        assert_eq!(
            Value::Array(vec![Value::from(1), Value::Null]).to_string(),
            "[1, null]"
        );
        assert_eq!(
            Value::object([("a", Value::from(true))]).to_string(),
            "{\"a\": true}"
        );
    }

    #[test]
    fn test_method_equality_is_identity() {
        let a = Method::new(|_, _| Ok(Value::Null));
        let b = Method::new(|_, _| Ok(Value::Null));
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
    }

    #[test]
    fn test_primitives_have_no_fields() {
        assert!(Value::from(5).field("anything").is_none());
        assert!(Value::Null.field("anything").is_none());
    }
}
