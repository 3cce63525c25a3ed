//! Refinement types — definition and the instance-check / parse protocol.
//!
//! The phantom module provides:
//! - Refinement type definitions, resolved once and then frozen
//! - A builder that is the single registration step for new types
//! - The [`Refinement`] capability: membership test and validated parse
//! - Diagnostics and a validator hook for external frameworks

pub mod protocol;
pub mod types;

pub use protocol::{Refinement, Validator};
pub use types::{Ancestor, RefinementBuilder, RefinementType};
