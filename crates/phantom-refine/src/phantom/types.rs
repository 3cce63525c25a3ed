//! Refinement type definitions and their builder.

use std::sync::Arc;

use crate::bound::{resolve_bound, Bound, BoundRequest, BoundSource, MutabilityGuard};
use crate::error::{RefineError, Result};
use crate::predicate::Predicate;
use crate::repr::Repr;
use crate::schema::Schema;
use crate::value::Value;

// ---------------------------------------------------------------------------
// Ancestor
// ---------------------------------------------------------------------------

/// A declared base of a refinement type.
#[derive(Debug, Clone)]
pub enum Ancestor {
    /// A plain representation; contributes to the implicit bound.
    Repr(Repr),
    /// Another refinement type; contributes an inherited bound and
    /// predicate.
    Refinement(Arc<RefinementType>),
}

impl Ancestor {
    pub fn as_refinement(&self) -> Option<&Arc<RefinementType>> {
        match self {
            Ancestor::Refinement(t) => Some(t),
            Ancestor::Repr(_) => None,
        }
    }
}

impl From<Repr> for Ancestor {
    fn from(repr: Repr) -> Self {
        Ancestor::Repr(repr)
    }
}

impl From<Arc<RefinementType>> for Ancestor {
    fn from(t: Arc<RefinementType>) -> Self {
        Ancestor::Refinement(t)
    }
}

// ---------------------------------------------------------------------------
// RefinementType
// ---------------------------------------------------------------------------

/// A refinement type: a bound plus a predicate.
///
/// Every field is resolved once, by [`RefinementBuilder::define`], and never
/// changes afterwards; a defined type can be shared freely across threads.
#[derive(Debug)]
pub struct RefinementType {
    pub(crate) name: String,
    pub(crate) bound: Option<Bound>,
    pub(crate) bound_source: Option<BoundSource>,
    pub(crate) within_bound: Option<Predicate<Value>>,
    pub(crate) predicate: Option<Predicate<Value>>,
    pub(crate) is_abstract: bool,
    pub(crate) ancestor: Option<Arc<RefinementType>>,
    pub(crate) bases: Vec<Ancestor>,
    pub(crate) description: Option<String>,
    pub(crate) schema: Schema,
}

impl RefinementType {
    /// Fully qualified name, e.g. `phantom::sized::NonEmpty`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last path segment of the name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// Resolved bound; `None` only for abstract types.
    pub fn bound(&self) -> Option<&Bound> {
        self.bound.as_ref()
    }

    /// Which rule produced the bound.
    pub fn bound_source(&self) -> Option<BoundSource> {
        self.bound_source
    }

    /// Resolved predicate; `None` only for abstract types.
    pub fn predicate(&self) -> Option<&Predicate<Value>> {
        self.predicate.as_ref()
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Nearest refinement-type ancestor.
    pub fn ancestor(&self) -> Option<&Arc<RefinementType>> {
        self.ancestor.as_ref()
    }

    /// Declared bases, in declaration order.
    pub fn bases(&self) -> &[Ancestor] {
        &self.bases
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The nearest-ancestor chain, starting with the direct ancestor.
    pub fn ancestors(&self) -> Vec<Arc<RefinementType>> {
        let mut chain = Vec::new();
        let mut current = self.ancestor.clone();
        while let Some(t) = current {
            current = t.ancestor.clone();
            chain.push(t);
        }
        chain
    }

    /// Whether `self` is `other` or declares it, directly or transitively,
    /// among its refinement bases.
    ///
    /// This is declared ancestry only. A descendant with its own predicate
    /// may accept values its ancestor rejects.
    pub fn is_subtype_of(&self, other: &RefinementType) -> bool {
        std::ptr::eq(self, other)
            || self
                .bases
                .iter()
                .filter_map(Ancestor::as_refinement)
                .any(|base| base.is_subtype_of(other))
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for a refinement type definition.
///
/// Calling [`define`](Self::define) is the single registration step: it
/// resolves the predicate and bound, checks them against the ancestors and
/// freezes the result.
#[derive(Debug, Clone)]
pub struct RefinementBuilder {
    name: String,
    bases: Vec<Ancestor>,
    bound: Option<Bound>,
    predicate: Option<Predicate<Value>>,
    is_abstract: bool,
    description: Option<String>,
    schema: Schema,
    guard: MutabilityGuard,
}

impl RefinementBuilder {
    /// Start a definition with a fully qualified name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bases: Vec::new(),
            bound: None,
            predicate: None,
            is_abstract: false,
            description: None,
            schema: Schema::new(),
            guard: MutabilityGuard::default(),
        }
    }

    /// Append a representation base.
    pub fn base(mut self, repr: Repr) -> Self {
        self.bases.push(Ancestor::Repr(repr));
        self
    }

    /// Append a refinement-type base.
    pub fn extends(mut self, parent: &Arc<RefinementType>) -> Self {
        self.bases.push(Ancestor::Refinement(Arc::clone(parent)));
        self
    }

    /// Append a base of either kind.
    pub fn ancestor(mut self, ancestor: Ancestor) -> Self {
        self.bases.push(ancestor);
        self
    }

    /// Set the explicit bound.
    pub fn bound(mut self, bound: impl Into<Bound>) -> Self {
        self.bound = Some(bound.into());
        self
    }

    /// Set the type's own predicate. It replaces the ancestor's predicate
    /// rather than combining with it; compose with `all_of` to keep both.
    pub fn predicate(mut self, predicate: Predicate<Value>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Mark the type abstract: bound and predicate may be left to
    /// descendants, and the type cannot be used in instance checks.
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add an entry to this type's schema, on top of its ancestor's.
    pub fn schema_entry(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.schema.insert(key.into(), value);
        self
    }

    /// Replace the mutability guard applied to the resolved bound.
    pub fn mutability_guard(mut self, guard: MutabilityGuard) -> Self {
        self.guard = guard;
        self
    }

    /// Resolve and freeze the definition.
    pub fn define(self) -> Result<Arc<RefinementType>> {
        let predicate = self.predicate.clone().or_else(|| {
            self.bases
                .iter()
                .filter_map(Ancestor::as_refinement)
                .find_map(|base| base.predicate().cloned())
        });
        if predicate.is_none() && !self.is_abstract {
            log::warn!("rejected definition of {}: no predicate", self.name);
            return Err(RefineError::UnresolvedPredicate(self.name));
        }

        let resolved = resolve_bound(BoundRequest {
            name: &self.name,
            explicit: self.bound.as_ref(),
            bases: &self.bases,
            is_abstract: self.is_abstract,
            guard: &self.guard,
        })
        .map_err(|err| {
            log::warn!("rejected definition of {}: {err}", self.name);
            err
        })?;

        let ancestor = self
            .bases
            .iter()
            .find_map(Ancestor::as_refinement)
            .cloned();
        let (bound, bound_source) = match resolved {
            Some(resolved) => (Some(resolved.bound), Some(resolved.source)),
            None => (None, None),
        };
        let within_bound = bound.as_ref().map(Bound::within);

        log::debug!(
            "defined refinement type {} (abstract: {}, predicate: {})",
            self.name,
            self.is_abstract,
            predicate.as_ref().map(Predicate::name).unwrap_or("-"),
        );

        Ok(Arc::new(RefinementType {
            name: self.name,
            bound,
            bound_source,
            within_bound,
            predicate,
            is_abstract: self.is_abstract,
            ancestor,
            bases: self.bases,
            description: self.description,
            schema: self.schema,
        }))
    }
}
