//! Schema loader
//!
//! Turns parsed documents into compiled types, registering each one so later
//! documents can extend, mix in or nest it.

use crate::document::{PropertyDecl, SchemaDocument};
use crate::error::{ParseError, Result};
use crate::parser::SchemaParser;
use crate::registry::TypeRegistry;
use std::path::Path;
use strata_core::schema::{PropertyOptions, SchemaBuilder};
use strata_core::{CompiledType, DescriptorExt, Value};
use tracing::{debug, info};

/// Loader options
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Keep unrecognized property options in `PropertyOptions::extra`;
    /// when false they are rejected
    pub allow_unknown_options: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            allow_unknown_options: true,
        }
    }
}

/// Compiles schema documents against a registry
pub struct SchemaLoader {
    registry: TypeRegistry,
    options: LoaderOptions,
}

impl SchemaLoader {
    /// Create a new loader with default options
    pub fn new(registry: TypeRegistry) -> Self {
        Self::with_options(registry, LoaderOptions::default())
    }

    /// Create a new loader with custom options
    pub fn with_options(registry: TypeRegistry, options: LoaderOptions) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TypeRegistry {
        &mut self.registry
    }

    pub fn into_registry(self) -> TypeRegistry {
        self.registry
    }

    /// Build (without compiling) the builder a document describes.
    ///
    /// Every referenced structure must already be registered. The extended
    /// structure is merged first, then each mixin in order, then the
    /// document's own properties, so later sources win.
    pub fn builder_for(&self, doc: &SchemaDocument) -> Result<SchemaBuilder> {
        if let Some(missing) = doc
            .dependencies()
            .into_iter()
            .find(|name| !self.registry.contains(name))
        {
            return Err(ParseError::UnknownType(missing.to_string()));
        }

        let mut builder = match &doc.extends {
            Some(parent) => self
                .registry
                .get(parent)
                .ok_or_else(|| ParseError::UnknownType(parent.clone()))?
                .extend(doc.name.as_str()),
            None => SchemaBuilder::new(doc.name.as_str()),
        };
        if let Some(description) = &doc.description {
            builder = builder.description(description.as_str());
        }

        for mixin in &doc.mixins {
            builder = builder.mixin(self.registry.mixin_table(mixin)?);
        }

        for decl in &doc.properties {
            let ty = self.registry.resolve(&decl.ty)?;
            let ty = if decl.nullable { ty.nullable() } else { ty };
            builder = builder.property_with(decl.name.as_str(), ty, self.property_options(doc, decl)?);
        }

        Ok(builder)
    }

    /// Compile a document and register the result
    pub fn compile_document(&mut self, doc: &SchemaDocument) -> Result<CompiledType> {
        let compiled = self.builder_for(doc)?.compile();
        if self.registry.register(compiled.clone()).is_some() {
            debug!(structure = %doc.name, "replaced registered structure");
        }
        debug!(
            structure = %doc.name,
            properties = compiled.property_names().count(),
            "registered structure"
        );
        Ok(compiled)
    }

    /// Load every document in a YAML string, in order
    pub fn load_str(&mut self, yaml_str: &str) -> Result<Vec<CompiledType>> {
        let documents = SchemaParser::parse_multi(yaml_str)?;
        let compiled = documents
            .iter()
            .map(|doc| self.compile_document(doc))
            .collect::<Result<Vec<_>>>()?;
        info!("Loaded {} structure(s)", compiled.len());
        Ok(compiled)
    }

    /// Load every document in a file, in order
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<Vec<CompiledType>> {
        let path = path.as_ref();
        let documents = SchemaParser::parse_file(path)?;
        let compiled = documents
            .iter()
            .map(|doc| self.compile_document(doc))
            .collect::<Result<Vec<_>>>()?;
        info!("Loaded {} structure(s) from {:?}", compiled.len(), path);
        Ok(compiled)
    }

    fn property_options(&self, doc: &SchemaDocument, decl: &PropertyDecl) -> Result<PropertyOptions> {
        let mut options = PropertyOptions::new();
        if let Some(default) = &decl.default {
            options = options.with_default(Value::from(default));
        }
        if let Some(description) = &decl.description {
            options = options.with_description(description.as_str());
        }
        for (key, value) in &decl.options {
            if !self.options.allow_unknown_options {
                return Err(ParseError::UnknownField(format!(
                    "{}.properties.{}.{}",
                    doc.name, decl.name, key
                )));
            }
            options = options.with_option(key.as_str(), Value::from(value));
        }
        Ok(options)
    }
}
