//! Type registry
//!
//! Named compiled structures and mixin builders that schema documents can
//! refer to by name.

use crate::document::TypeExpr;
use crate::error::{ParseError, Result};
use std::collections::HashMap;
use strata_core::schema::{MixinSource, SchemaBuilder, SchemaTable};
use strata_core::types::{self, EnumType, NumberType, StringType};
use strata_core::{CompiledType, Descriptor, IntoDescriptor};

/// Registry of named structures and mixins
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    structures: HashMap<String, CompiledType>,
    mixins: HashMap<String, SchemaBuilder>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compiled structure under its own name, replacing any
    /// previous structure of that name
    pub fn register(&mut self, ty: CompiledType) -> Option<CompiledType> {
        self.structures.insert(ty.name().to_string(), ty)
    }

    /// Register a mixin builder under a name.
    ///
    /// Mixins are how method bindings reach declarative schemas.
    pub fn register_mixin(&mut self, name: impl Into<String>, mixin: SchemaBuilder) {
        self.mixins.insert(name.into(), mixin);
    }

    pub fn get(&self, name: &str) -> Option<&CompiledType> {
        self.structures.get(name)
    }

    pub fn get_mixin(&self, name: &str) -> Option<&SchemaBuilder> {
        self.mixins.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.structures.contains_key(name)
    }

    /// Registered structure names, sorted
    pub fn structure_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.structures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Declarations to merge for a mixin name: registered mixins first, then
    /// registered structures
    pub fn mixin_table(&self, name: &str) -> Result<&SchemaTable> {
        if let Some(builder) = self.mixins.get(name) {
            return Ok(builder.schema_table());
        }
        self.structures
            .get(name)
            .map(|ty| ty.schema_table())
            .ok_or_else(|| ParseError::UnknownMixin(name.to_string()))
    }

    /// Turn a type expression into a descriptor
    pub fn resolve(&self, expr: &TypeExpr) -> Result<Descriptor> {
        Ok(match expr {
            TypeExpr::String {
                min_length,
                max_length,
            } => {
                let mut ty = StringType::new();
                if let Some(len) = min_length {
                    ty = ty.min_length(*len);
                }
                if let Some(len) = max_length {
                    ty = ty.max_length(*len);
                }
                ty.into_descriptor()
            }
            TypeExpr::Number { min, max, integer } => {
                let mut ty = NumberType::new();
                if let Some(min) = min {
                    ty = ty.min(*min);
                }
                if let Some(max) = max {
                    ty = ty.max(*max);
                }
                if *integer {
                    ty = ty.integer();
                }
                ty.into_descriptor()
            }
            TypeExpr::Boolean => types::boolean(),
            TypeExpr::Any => types::any(),
            TypeExpr::Enum { values } => EnumType::new(values.iter().cloned()).into_descriptor(),
            TypeExpr::Array { items } => types::array(self.resolve(items)?),
            TypeExpr::Named { name } => self
                .structures
                .get(name)
                .cloned()
                .ok_or_else(|| ParseError::UnknownType(name.clone()))?
                .into_descriptor(),
        })
    }
}
