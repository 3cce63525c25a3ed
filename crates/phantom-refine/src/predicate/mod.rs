//! Predicates — named, pure boolean functions over values.
//!
//! The predicate module provides:
//! - The [`Predicate`] abstraction itself
//! - Generic predicates (equality, identity, type checks)
//! - Boolean composition (conjunction, disjunction, negation)
//! - Numeric comparisons and intervals
//! - Collection predicates (membership, size, quantifiers)
//! - Regular-expression predicates over strings
//!
//! Names are derived from the constructor and its arguments and are used
//! only in diagnostics, never for equality or control flow.

pub mod boolean;
pub mod collection;
pub mod generic;
pub mod interval;
pub mod numeric;
pub mod re;

use std::fmt;
use std::sync::Arc;

pub use boolean::{all_of, any_of, both, either, negate, one_of, xor};
pub use generic::{equal, identical, of_complex_type, of_type, of_types};

/// A named, pure, deterministic boolean function over `T`.
///
/// Predicates are immutable and cheap to clone; clones share the same
/// function.
pub struct Predicate<T: ?Sized> {
    name: Arc<str>,
    check: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T: ?Sized> Predicate<T> {
    /// Create a predicate from a diagnostic name and a function.
    pub fn new(name: impl Into<String>, check: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: Arc::from(name.into()),
            check: Arc::new(check),
        }
    }

    /// Diagnostic name, e.g. `greater(0)`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate.
    pub fn test(&self, value: &T) -> bool {
        (self.check)(value)
    }
}

impl<T: ?Sized + 'static> Predicate<T> {
    /// Conjunction with another predicate; see [`boolean::both`].
    pub fn and(self, other: Predicate<T>) -> Predicate<T> {
        boolean::both(self, other)
    }

    /// Disjunction with another predicate; see [`boolean::either`].
    pub fn or(self, other: Predicate<T>) -> Predicate<T> {
        boolean::either(self, other)
    }

    /// Negation; see [`boolean::negate`].
    pub fn not(self) -> Predicate<T> {
        boolean::negate(self)
    }
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

impl<T: ?Sized> fmt::Display for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Render a constructor call, e.g. `bind_name("greater", &[&0])` → `greater(0)`.
pub(crate) fn bind_name(ctor: &str, args: &[&dyn fmt::Display]) -> String {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    format!("{ctor}({})", args.join(", "))
}
