//! Registry of named refinement types.
//!
//! The registry is the explicit registration step for type hierarchies
//! loaded at runtime: definition files name their bases by string, and the
//! registry resolves those names to previously defined types.
//!
//! # Modules
//!
//! - [`config`] — JSON definition file format and predicate specs.

pub mod config;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{RefineError, Result};
use crate::phantom::{Ancestor, Refinement, RefinementBuilder, RefinementType};
use crate::repr::Repr;
use crate::sized::SizedFamily;
use crate::value::Value;

pub use config::{DefinitionFile, PredicateSpec, TypeSpec, DEFINITION_FILE_VERSION};

/// Named refinement types, keyed by fully qualified name.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: BTreeMap<String, Arc<RefinementType>>,
}

impl TypeRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in sized family.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        let family = SizedFamily::new()?;
        for member in family.members() {
            registry.register(Arc::clone(member))?;
        }
        Ok(registry)
    }

    /// Add a defined type under its name.
    pub fn register(&mut self, refinement: Arc<RefinementType>) -> Result<()> {
        let name = refinement.name().to_string();
        if self.types.contains_key(&name) {
            return Err(RefineError::AlreadyDefined(name));
        }
        log::debug!("registered {name}");
        self.types.insert(name, refinement);
        Ok(())
    }

    /// Define a type and register it.
    pub fn define(&mut self, builder: RefinementBuilder) -> Result<Arc<RefinementType>> {
        let refinement = builder.define()?;
        self.register(Arc::clone(&refinement))?;
        Ok(refinement)
    }

    /// Look up a type by fully qualified name, or by short name when that
    /// is unambiguous.
    pub fn get(&self, name: &str) -> Result<Arc<RefinementType>> {
        if let Some(found) = self.types.get(name) {
            return Ok(Arc::clone(found));
        }
        let mut candidates = self.types.values().filter(|t| t.short_name() == name);
        match (candidates.next(), candidates.next()) {
            (Some(found), None) => Ok(Arc::clone(found)),
            (Some(_), Some(_)) => Err(RefineError::NotFound(format!("{name} (ambiguous)"))),
            (None, _) => Err(RefineError::NotFound(name.to_string())),
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.types.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<RefinementType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Instance check against a named type.
    pub fn conforms(&self, name: &str, value: &Value) -> Result<bool> {
        self.get(name)?.conforms(value)
    }

    /// Parse against a named type.
    pub fn parse(&self, name: &str, value: Value) -> Result<Value> {
        self.get(name)?.parse(value)
    }

    /// Register every type of a definition file, in order.
    ///
    /// Either all types are registered or, on the first error, none are.
    pub fn load_definitions(&mut self, file: &DefinitionFile) -> Result<Vec<String>> {
        let mut staged = self.clone();
        let mut defined = Vec::with_capacity(file.types.len());
        for spec in &file.types {
            let refinement = staged.build_spec(file, spec)?.define()?;
            defined.push(refinement.name().to_string());
            staged.register(refinement)?;
        }
        *self = staged;
        log::info!(
            "loaded {} type definition(s){}",
            defined.len(),
            file.namespace
                .as_deref()
                .map(|ns| format!(" into {ns}"))
                .unwrap_or_default()
        );
        Ok(defined)
    }

    /// Read a definition file and register its types.
    pub fn load_path(&mut self, path: &Path) -> Result<Vec<String>> {
        let file = DefinitionFile::from_path(path)?;
        self.load_definitions(&file)
    }

    fn build_spec(&self, file: &DefinitionFile, spec: &TypeSpec) -> Result<RefinementBuilder> {
        let name = file.qualify(&spec.name);
        let mut builder = RefinementBuilder::new(&name);
        for base in &spec.bases {
            builder = builder.ancestor(self.resolve_ancestor(file, &name, base)?);
        }
        if let Some(bound) = &spec.bound {
            builder = builder.bound(bound.clone());
        }
        if let Some(predicate) = &spec.predicate {
            builder = builder.predicate(predicate.build()?);
        }
        if spec.is_abstract {
            builder = builder.abstract_type();
        }
        if let Some(description) = &spec.description {
            builder = builder.description(description);
        }
        for (key, value) in &spec.schema {
            builder = builder.schema_entry(key, value.clone());
        }
        Ok(builder)
    }

    /// A base names a registered type (within the file's namespace first)
    /// or else is a type expression.
    fn resolve_ancestor(&self, file: &DefinitionFile, name: &str, base: &str) -> Result<Ancestor> {
        if let Some(found) = self.types.get(&file.qualify(base)) {
            return Ok(Ancestor::Refinement(Arc::clone(found)));
        }
        let lookup = match self.get(base) {
            Ok(found) => return Ok(Ancestor::Refinement(found)),
            Err(err) => err,
        };
        base.parse::<Repr>().map(Ancestor::Repr).map_err(|_| match lookup {
            RefineError::NotFound(_) if self.is_ambiguous(base) => {
                RefineError::NotFound(format!("{base} (ambiguous base of {name})"))
            }
            _ => RefineError::NotFound(format!("{base} (base of {name})")),
        })
    }

    /// Whether `name` is not a full name but the short name of several types.
    fn is_ambiguous(&self, name: &str) -> bool {
        !self.types.contains_key(name)
            && self.types.values().filter(|t| t.short_name() == name).count() > 1
    }
}
