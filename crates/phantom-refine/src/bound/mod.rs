//! Bounds — the representation a value must conform to before a
//! refinement type's predicate is evaluated.
//!
//! The bound module provides:
//! - Single and intersection bounds
//! - Covariant bound compatibility (narrowing down a hierarchy)
//! - The bound check, as a predicate and as a descriptive error
//! - A best-effort guard against known-mutable representations
//! - Bound resolution for newly defined types (see [`resolver`])

pub mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RefineError, Result};
use crate::predicate::{all_of, of_complex_type, of_type, Predicate};
use crate::repr::Repr;
use crate::value::Value;

pub use resolver::{implicit_bound, inherited_bound, resolve_bound, BoundRequest, BoundSource, ResolvedBound};

/// The representation-level type(s) governing a refinement type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BoundRepr", into = "BoundRepr")]
pub enum Bound {
    /// A single, possibly parametrized or union, representation.
    Single(Repr),
    /// Every listed representation must be satisfied. Never empty.
    Intersection(Vec<Repr>),
}

impl Bound {
    /// Collapse an ordered list of representations: none gives no bound,
    /// one gives a single bound, more give an intersection.
    pub fn from_reprs(mut reprs: Vec<Repr>) -> Option<Bound> {
        match reprs.len() {
            0 => None,
            1 => Some(Bound::Single(reprs.remove(0))),
            _ => Some(Bound::Intersection(reprs)),
        }
    }

    /// An intersection bound. Fails on an empty list.
    pub fn intersection(reprs: impl IntoIterator<Item = Repr>) -> Result<Bound> {
        Bound::from_reprs(reprs.into_iter().collect())
            .ok_or_else(|| RefineError::InvalidRepr("empty intersection bound".into()))
    }

    /// The representations making up this bound.
    pub fn parts(&self) -> &[Repr] {
        match self {
            Bound::Single(repr) => std::slice::from_ref(repr),
            Bound::Intersection(reprs) => reprs,
        }
    }

    /// Whether every value within `self` is also within `wider`: each part
    /// of `wider` must be a supertype of some part of `self`.
    pub fn is_subtype_of(&self, wider: &Bound) -> bool {
        wider
            .parts()
            .iter()
            .all(|w| self.parts().iter().any(|n| n.is_subtype_of(w)))
    }

    /// The bound check as a predicate. Intersections are checked part by
    /// part with [`of_type`]; single bounds structurally with
    /// [`of_complex_type`].
    pub fn within(&self) -> Predicate<Value> {
        match self {
            Bound::Intersection(reprs) => all_of(reprs.iter().cloned().map(of_type)),
            Bound::Single(repr) => of_complex_type(repr.clone()),
        }
    }

    /// Check a value against the bound, describing the mismatch.
    pub fn check(&self, value: &Value) -> Result<()> {
        if self.within().test(value) {
            Ok(())
        } else {
            Err(RefineError::OutOfBound {
                bound: self.to_string(),
                value: value.to_string(),
            })
        }
    }
}

impl From<Repr> for Bound {
    fn from(repr: Repr) -> Self {
        Bound::Single(repr)
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Single(repr) => write!(f, "{repr}"),
            Bound::Intersection(reprs) => {
                let parts: Vec<String> = reprs.iter().map(Repr::to_string).collect();
                write!(f, "Intersection[{}]", parts.join(", "))
            }
        }
    }
}

/// Wire form of a bound: a type expression, or a list of them for an
/// intersection.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum BoundRepr {
    One(Repr),
    Many(Vec<Repr>),
}

impl TryFrom<BoundRepr> for Bound {
    type Error = RefineError;

    fn try_from(wire: BoundRepr) -> Result<Self> {
        match wire {
            BoundRepr::One(repr) => Ok(Bound::Single(repr)),
            BoundRepr::Many(reprs) => Bound::intersection(reprs),
        }
    }
}

impl From<Bound> for BoundRepr {
    fn from(bound: Bound) -> Self {
        match bound {
            Bound::Single(repr) => BoundRepr::One(repr),
            Bound::Intersection(reprs) => BoundRepr::Many(reprs),
        }
    }
}

// ---------------------------------------------------------------------------
// Mutability guard
// ---------------------------------------------------------------------------

/// Deny-list of representations known to be mutable.
///
/// This is a best-effort check, not a soundness guarantee: representations
/// missing from the list are treated as immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutabilityGuard {
    denied: Vec<Repr>,
}

impl MutabilityGuard {
    /// A guard denying the given representations (and their subtypes).
    pub fn new(denied: impl IntoIterator<Item = Repr>) -> Self {
        Self {
            denied: denied.into_iter().collect(),
        }
    }

    /// A guard that denies nothing.
    pub fn permissive() -> Self {
        Self { denied: Vec::new() }
    }

    /// Add a representation to the deny-list.
    pub fn deny(mut self, repr: Repr) -> Self {
        if !self.denied.contains(&repr) {
            self.denied.push(repr);
        }
        self
    }

    pub fn denied(&self) -> &[Repr] {
        &self.denied
    }

    /// A union is mutable when any member is.
    pub fn is_known_mutable(&self, repr: &Repr) -> bool {
        match repr {
            Repr::Union(members) => members.iter().any(|m| self.is_known_mutable(m)),
            repr => self.denied.iter().any(|d| repr.is_subtype_of(d)),
        }
    }

    pub fn rejects_bound(&self, bound: &Bound) -> bool {
        bound.parts().iter().any(|r| self.is_known_mutable(r))
    }

    pub fn rejects_value(&self, value: &Value) -> bool {
        self.is_known_mutable(&value.runtime_type())
    }

    /// The guard as a value predicate, failing for known-mutable values.
    pub fn value_predicate(&self) -> Predicate<Value> {
        let guard = self.clone();
        Predicate::new("is_not_mutable_instance", move |v: &Value| {
            !guard.rejects_value(v)
        })
    }
}

impl Default for MutabilityGuard {
    fn default() -> Self {
        Self::new([Repr::List, Repr::Set, Repr::Dict])
    }
}

/// Fails for values of a representation on the default deny-list.
pub fn is_not_mutable_instance() -> Predicate<Value> {
    MutabilityGuard::default().value_predicate()
}
