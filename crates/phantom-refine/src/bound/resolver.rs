//! Bound resolution — computing and freezing the bound of a new type.
//!
//! Resolution runs exactly once, when a refinement type is defined. The
//! bound is chosen by precedence:
//! 1. the explicit bound given on the definition
//! 2. the implicit bound: the representation bases listed before the first
//!    refinement base (one base gives a single bound, several an
//!    intersection)
//! 3. the bound inherited from the nearest refinement ancestor
//!
//! A concrete type with none of these is rejected; an abstract one is left
//! unbounded. Whatever is chosen must narrow the inherited bound and must
//! not be a known-mutable representation.

use std::fmt;

use crate::error::{RefineError, Result};
use crate::phantom::Ancestor;
use crate::repr::Repr;

use super::{Bound, MutabilityGuard};

/// Which precedence rule produced a resolved bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSource {
    Explicit,
    Implicit,
    Inherited,
}

impl BoundSource {
    /// Return a stable string tag.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Implicit => "implicit",
            Self::Inherited => "inherited",
        }
    }
}

impl fmt::Display for BoundSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// A bound together with the rule that selected it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBound {
    pub bound: Bound,
    pub source: BoundSource,
}

/// Inputs to bound resolution for one type definition.
#[derive(Debug, Clone, Copy)]
pub struct BoundRequest<'a> {
    /// Fully qualified name of the type being defined, for diagnostics.
    pub name: &'a str,
    /// Bound supplied directly on the definition.
    pub explicit: Option<&'a Bound>,
    /// Declared ancestors, nearest first.
    pub bases: &'a [Ancestor],
    pub is_abstract: bool,
    pub guard: &'a MutabilityGuard,
}

/// Collect the representation bases that precede the first refinement
/// base.
pub fn implicit_bound(bases: &[Ancestor]) -> Option<Bound> {
    let reprs: Vec<Repr> = bases
        .iter()
        .map_while(|base| match base {
            Ancestor::Repr(repr) => Some(repr.clone()),
            Ancestor::Refinement(_) => None,
        })
        .collect();
    Bound::from_reprs(reprs)
}

/// The resolved bound of the nearest refinement ancestor that has one.
pub fn inherited_bound(bases: &[Ancestor]) -> Option<&Bound> {
    bases
        .iter()
        .filter_map(Ancestor::as_refinement)
        .find_map(|ancestor| ancestor.bound())
}

/// Resolve the bound for a new type definition.
///
/// Returns `Ok(None)` only for abstract types with nothing to resolve.
pub fn resolve_bound(request: BoundRequest<'_>) -> Result<Option<ResolvedBound>> {
    let inherited = inherited_bound(request.bases);

    let (bound, source) = if let Some(explicit) = request.explicit {
        (explicit.clone(), BoundSource::Explicit)
    } else if let Some(implicit) = implicit_bound(request.bases) {
        (implicit, BoundSource::Implicit)
    } else if let Some(inherited) = inherited {
        (inherited.clone(), BoundSource::Inherited)
    } else if !request.is_abstract {
        return Err(RefineError::UnresolvedBound(request.name.to_string()));
    } else {
        log::debug!("abstract type {} defers its bound", request.name);
        return Ok(None);
    };

    if let Some(inherited) = inherited {
        if !bound.is_subtype_of(inherited) {
            return Err(RefineError::BoundIncompatible {
                name: request.name.to_string(),
                bound: bound.to_string(),
                inherited: inherited.to_string(),
            });
        }
    }

    if request.guard.rejects_bound(&bound) {
        return Err(RefineError::MutableBound {
            name: request.name.to_string(),
            bound: bound.to_string(),
        });
    }

    log::debug!("resolved {source} bound {bound} for {}", request.name);
    Ok(Some(ResolvedBound { bound, source }))
}
