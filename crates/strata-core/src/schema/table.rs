//! Property and method tables
//!
//! A [`SchemaTable`] is the ordered declaration set a builder accumulates and
//! a compiled type freezes. Merging is last-writer-wins: an overwritten key
//! keeps its original position, new keys are appended.

use crate::descriptor::Descriptor;
use crate::value::{Method, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered map keyed by name
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite in place, returning the replaced value
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    /// Position and value of an entry
    pub fn get_full(&self, key: &str) -> Option<(usize, &V)> {
        self.index
            .get(key)
            .map(|&position| (position, &self.entries[position].1))
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }
}

impl<V: Clone> OrderedMap<V> {
    /// Copy every entry of `other` into `self`, `other` winning on collision
    pub fn merge(&mut self, other: &OrderedMap<V>) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Default value of a property: a literal or a zero-argument factory
#[derive(Clone)]
pub enum DefaultValue {
    /// Cloned into every new instance
    Literal(Value),
    /// Invoked once per construction
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        DefaultValue::Literal(value.into())
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        DefaultValue::Factory(Arc::new(factory))
    }

    /// Produce a fresh default value
    pub fn produce(&self) -> Value {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// Options attached to a property declaration
#[derive(Debug, Clone, Default)]
pub struct PropertyOptions {
    /// Value used when the input record has no (or a null) value
    pub default: Option<DefaultValue>,
    /// Optional description
    pub description: Option<String>,
    /// Any other named options, kept verbatim
    pub extra: OrderedMap<Value>,
}

impl PropertyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a literal default
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(DefaultValue::literal(value));
        self
    }

    /// Set a default factory, invoked fresh for each instance
    pub fn with_default_fn<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(DefaultValue::factory(factory));
        self
    }

    /// Set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an additional named option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key, value.into());
        self
    }
}

/// A declared property: its type and options
#[derive(Debug, Clone)]
pub struct PropertyDefinition {
    /// Property type
    pub ty: Descriptor,
    /// Default, description and other options
    pub options: PropertyOptions,
}

impl PropertyDefinition {
    pub fn new(ty: Descriptor, options: PropertyOptions) -> Self {
        Self { ty, options }
    }

    /// Raw value to use when the input has none
    pub fn default_value(&self) -> Value {
        self.options
            .default
            .as_ref()
            .map(DefaultValue::produce)
            .unwrap_or(Value::Null)
    }
}

/// Ordered property and method declarations
#[derive(Debug, Clone, Default)]
pub struct SchemaTable {
    pub properties: OrderedMap<PropertyDefinition>,
    pub methods: OrderedMap<Method>,
}

impl SchemaTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another table into this one, `other` winning on collision
    pub fn merge(&mut self, other: &SchemaTable) {
        self.properties.merge(&other.properties);
        self.methods.merge(&other.methods);
    }

    /// Same property and method names in the same order, with the same
    /// descriptors and method implementations
    pub fn same_shape(&self, other: &SchemaTable) -> bool {
        self.properties.len() == other.properties.len()
            && self.methods.len() == other.methods.len()
            && self
                .properties
                .iter()
                .zip(other.properties.iter())
                .all(|((ka, a), (kb, b))| ka == kb && Arc::ptr_eq(&a.ty, &b.ty))
            && self
                .methods
                .iter()
                .zip(other.methods.iter())
                .all(|((ka, a), (kb, b))| ka == kb && a.ptr_eq(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_ordered_map_overwrite_keeps_position() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 3), Some(1));

        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("a", &3), ("b", &2)]);
        assert_eq!(map.position("b"), Some(1));
    }

    #[test]
    fn test_ordered_map_merge_last_writer_wins() {
        let mut left = OrderedMap::new();
        left.insert("a", 1);
        left.insert("b", 2);

        let mut right = OrderedMap::new();
        right.insert("c", 30);
        right.insert("b", 20);

        left.merge(&right);
        assert_eq!(left.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(left.get("b"), Some(&20));
        assert_eq!(left.get("c"), Some(&30));
    }

    #[test]
    fn test_default_factory_runs_per_call() {
        let counter = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&counter);
        let default = DefaultValue::factory(move || {
            Value::from(seen.fetch_add(1, Ordering::SeqCst) as i64)
        });

        assert_eq!(default.produce(), Value::from(0));
        assert_eq!(default.produce(), Value::from(1));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_property_without_default_is_null() {
        let property = PropertyDefinition::new(types::string(), PropertyOptions::new());
        assert_eq!(property.default_value(), Value::Null);

        let property = PropertyDefinition::new(
            types::number(),
            PropertyOptions::new().with_default(0),
        );
        assert_eq!(property.default_value(), Value::from(0));
    }

    #[test]
    fn test_property_options_keep_extra_entries() {
        let options = PropertyOptions::new()
            .with_description("Display name")
            .with_option("indexed", true);
        assert_eq!(options.description.as_deref(), Some("Display name"));
        assert_eq!(options.extra.get("indexed"), Some(&Value::Bool(true)));
    }
}
