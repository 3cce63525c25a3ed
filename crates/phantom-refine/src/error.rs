//! Error types for phantom-refine.
//!
//! Definition-time errors describe a badly authored type hierarchy and are
//! never recovered internally. Call-time errors are either the abstract
//! misuse condition or the routine parse failure.

/// Refinement error types covering definition and validation.
#[derive(Debug, thiserror::Error)]
pub enum RefineError {
    #[error("Concrete refinement type {0} must define a bound")]
    UnresolvedBound(String),

    #[error("Concrete refinement type {0} must define a predicate")]
    UnresolvedPredicate(String),

    #[error("The bound of {name} ({bound}) is not compatible with its inherited bound ({inherited})")]
    BoundIncompatible {
        name: String,
        bound: String,
        inherited: String,
    },

    #[error("The bound of {name} ({bound}) is a known mutable type")]
    MutableBound { name: String, bound: String },

    #[error("Abstract refinement type {0} cannot be used in instance checks")]
    AbstractInstanceCheck(String),

    #[error("Value is not within bound of {bound}: {value}")]
    OutOfBound { bound: String, value: String },

    #[error("Could not parse {type_name} from {value}")]
    Parse { type_name: String, value: String },

    #[error("Invalid type expression: {0}")]
    InvalidRepr(String),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Refinement type not found: {0}")]
    NotFound(String),

    #[error("Refinement type already defined: {0}")]
    AlreadyDefined(String),

    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RefineError {
    /// Whether this error was raised while defining a type, as opposed to
    /// while checking or parsing a value.
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedBound(_)
                | Self::UnresolvedPredicate(_)
                | Self::BoundIncompatible { .. }
                | Self::MutableBound { .. }
        )
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, RefineError>;
