//! JSON definition files.
//!
//! A definition file declares a namespace and an ordered list of types:
//!
//! ```json
//! { "version": 1, "namespace": "app",
//!   "types": [
//!     { "name": "Natural", "bases": ["int"], "predicate": { "ge": 0 } },
//!     { "name": "Small", "bases": ["Natural"], "predicate": { "less": 10 } } ] }
//! ```
//!
//! Literal values inside predicates are read from JSON with arrays taken
//! as tuples.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bound::{is_not_mutable_instance, Bound};
use crate::error::{RefineError, Result};
use crate::predicate::boolean::{always, falsy, never, truthy};
use crate::predicate::collection::{contained, contains, count, every, exists};
use crate::predicate::interval::{closed, closed_open, open, open_closed};
use crate::predicate::numeric::{
    even, ge, greater, le, less, modulo, negative, non_negative, non_positive, odd, positive,
};
use crate::predicate::re::{is_full_match, is_match};
use crate::predicate::{all_of, any_of, equal, negate, of_complex_type, of_type, one_of, Predicate};
use crate::repr::Repr;
use crate::schema::Schema;
use crate::value::{ArrayMode, Value};

/// Supported definition file format version.
pub const DEFINITION_FILE_VERSION: u32 = 1;

/// A parsed definition file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionFile {
    /// Format version number.
    pub version: u32,
    /// Prefix for every type name in the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    /// Type definitions, registered in order.
    #[serde(default)]
    pub types: Vec<TypeSpec>,
}

impl DefinitionFile {
    /// Parse and version-check a definition file.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: DefinitionFile = serde_json::from_str(json)
            .map_err(|e| RefineError::InvalidFileFormat(format!("failed to parse definitions: {e}")))?;
        if file.version != DEFINITION_FILE_VERSION {
            return Err(RefineError::InvalidFileFormat(format!(
                "unsupported definition file version {} (expected {DEFINITION_FILE_VERSION})",
                file.version
            )));
        }
        Ok(file)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json).map_err(|e| match e {
            RefineError::InvalidFileFormat(msg) => {
                RefineError::InvalidFileFormat(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// The fully qualified form of a name declared in this file.
    pub fn qualify(&self, name: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}::{name}"),
            None => name.to_string(),
        }
    }
}

/// One type definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    pub name: String,
    /// Registered refinement names or type expressions, in order.
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bound: Option<Bound>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<PredicateSpec>,
    #[serde(rename = "abstract", default)]
    pub is_abstract: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Extra schema entries for this type.
    #[serde(default, skip_serializing_if = "Schema::is_empty")]
    pub schema: Schema,
}

/// Declarative form of a predicate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateSpec {
    Always,
    Never,
    Truthy,
    Falsy,
    NotMutable,
    Positive,
    NonPositive,
    Negative,
    NonNegative,
    Even,
    Odd,
    Equal(serde_json::Value),
    Greater(serde_json::Value),
    Ge(serde_json::Value),
    Less(serde_json::Value),
    Le(serde_json::Value),
    Open(serde_json::Value, serde_json::Value),
    Closed(serde_json::Value, serde_json::Value),
    OpenClosed(serde_json::Value, serde_json::Value),
    ClosedOpen(serde_json::Value, serde_json::Value),
    Modulo { n: i64, predicate: Box<PredicateSpec> },
    OfType(Repr),
    OfComplexType(Repr),
    Contains(serde_json::Value),
    Contained(serde_json::Value),
    Count(Box<PredicateSpec>),
    Exists(Box<PredicateSpec>),
    Every(Box<PredicateSpec>),
    Match(String),
    FullMatch(String),
    Not(Box<PredicateSpec>),
    AllOf(Vec<PredicateSpec>),
    AnyOf(Vec<PredicateSpec>),
    OneOf(Vec<PredicateSpec>),
}

fn literal(json: &serde_json::Value) -> Value {
    Value::from_json(json, ArrayMode::Tuple)
}

fn build_all(specs: &[PredicateSpec]) -> Result<Vec<Predicate<Value>>> {
    specs.iter().map(PredicateSpec::build).collect()
}

impl PredicateSpec {
    /// Construct the predicate. Fails only on invalid regular expressions.
    pub fn build(&self) -> Result<Predicate<Value>> {
        let predicate = match self {
            Self::Always => always(),
            Self::Never => never(),
            Self::Truthy => truthy(),
            Self::Falsy => falsy(),
            Self::NotMutable => is_not_mutable_instance(),
            Self::Positive => positive(),
            Self::NonPositive => non_positive(),
            Self::Negative => negative(),
            Self::NonNegative => non_negative(),
            Self::Even => even(),
            Self::Odd => odd(),
            Self::Equal(v) => equal(literal(v)),
            Self::Greater(v) => greater(literal(v)),
            Self::Ge(v) => ge(literal(v)),
            Self::Less(v) => less(literal(v)),
            Self::Le(v) => le(literal(v)),
            Self::Open(low, high) => open(literal(low), literal(high)),
            Self::Closed(low, high) => closed(literal(low), literal(high)),
            Self::OpenClosed(low, high) => open_closed(literal(low), literal(high)),
            Self::ClosedOpen(low, high) => closed_open(literal(low), literal(high)),
            Self::Modulo { n, predicate } => modulo(*n, predicate.build()?),
            Self::OfType(repr) => of_type(repr.clone()),
            Self::OfComplexType(repr) => of_complex_type(repr.clone()),
            Self::Contains(v) => contains(literal(v)),
            Self::Contained(v) => contained(literal(v)),
            Self::Count(p) => count(p.build()?),
            Self::Exists(p) => exists(p.build()?),
            Self::Every(p) => every(p.build()?),
            Self::Match(pattern) => is_match(pattern)?,
            Self::FullMatch(pattern) => is_full_match(pattern)?,
            Self::Not(p) => negate(p.build()?),
            Self::AllOf(ps) => all_of(build_all(ps)?),
            Self::AnyOf(ps) => any_of(build_all(ps)?),
            Self::OneOf(ps) => one_of(build_all(ps)?),
        };
        Ok(predicate)
    }
}
