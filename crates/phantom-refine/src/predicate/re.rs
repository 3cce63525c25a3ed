//! Regular-expression predicates over string values.
//!
//! Patterns are compiled once, when the predicate is created. Non-string
//! arguments fail.

use regex::Regex;

use crate::error::{RefineError, Result};
use crate::value::Value;

use super::{bind_name, Predicate};

fn anchored(ctor: &'static str, pattern: &str, compiled: &str) -> Result<Predicate<Value>> {
    let regex = Regex::new(compiled).map_err(|e| RefineError::InvalidPattern(e.to_string()))?;
    let name = bind_name(ctor, &[&Value::str(pattern)]);
    Ok(Predicate::new(name, move |v: &Value| match v {
        Value::Str(s) => regex.is_match(s),
        _ => false,
    }))
}

/// Succeeds when the start of the argument matches `pattern`.
pub fn is_match(pattern: &str) -> Result<Predicate<Value>> {
    anchored("is_match", pattern, &format!("^(?:{pattern})"))
}

/// Succeeds when the whole argument matches `pattern`.
pub fn is_full_match(pattern: &str) -> Result<Predicate<Value>> {
    anchored("is_full_match", pattern, &format!(r"^(?:{pattern})\z"))
}
