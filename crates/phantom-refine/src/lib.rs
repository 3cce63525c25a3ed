//! phantom-refine — Refinement types for dynamic values.
//!
//! A refinement type pairs a bound (the representation a value must have)
//! with a predicate (the property it must satisfy). Bounds and predicates
//! are resolved once, when the type is defined, and checked against the
//! inherited bound so a hierarchy can only narrow. Parsing is the single
//! way to obtain a validated value and never copies it.

pub mod bound;
pub mod error;
pub mod phantom;
pub mod predicate;
pub mod registry;
pub mod repr;
pub mod schema;
pub mod sized;
pub mod value;

// Re-export primary types
pub use error::{RefineError, Result};
pub use phantom::{Ancestor, Refinement, RefinementBuilder, RefinementType, Validator};
pub use predicate::Predicate;
pub use repr::Repr;
pub use value::{ArrayMode, Value};

// Re-export bound types
pub use bound::{is_not_mutable_instance, Bound, BoundSource, MutabilityGuard, ResolvedBound};

// Re-export registry types
pub use registry::{DefinitionFile, PredicateSpec, TypeRegistry, TypeSpec, DEFINITION_FILE_VERSION};

pub use schema::Schema;
pub use sized::{define_sized, sized_builder, SizedFamily};
