//! The instance-check / parse protocol.
//!
//! `parse` is the only way to obtain a validated value. It returns its
//! argument untouched, so identity survives validation.

use std::sync::Arc;

use crate::error::{RefineError, Result};
use crate::value::Value;

use super::types::RefinementType;

/// A parse function in the shape validation frameworks expect.
pub type Validator = Box<dyn Fn(Value) -> Result<Value> + Send + Sync>;

/// Capability shared by every refinement type.
pub trait Refinement {
    /// Fully qualified type name.
    fn name(&self) -> &str;

    /// Whether `value` is a member of the type.
    ///
    /// Non-members give `Ok(false)`. Errors are reserved for misuse, such
    /// as checking against an abstract type.
    fn conforms(&self, value: &Value) -> Result<bool>;

    /// Return `value` unchanged when it is a member, otherwise fail with a
    /// parse error naming the type and the value.
    fn parse(&self, value: Value) -> Result<Value> {
        if self.conforms(&value)? {
            Ok(value)
        } else {
            Err(RefineError::Parse {
                type_name: self.name().to_string(),
                value: value.to_string(),
            })
        }
    }
}

impl<R: Refinement + ?Sized> Refinement for Arc<R> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn conforms(&self, value: &Value) -> Result<bool> {
        (**self).conforms(value)
    }

    fn parse(&self, value: Value) -> Result<Value> {
        (**self).parse(value)
    }
}

impl Refinement for RefinementType {
    fn name(&self) -> &str {
        &self.name
    }

    fn conforms(&self, value: &Value) -> Result<bool> {
        if self.is_abstract {
            return Err(RefineError::AbstractInstanceCheck(self.name.clone()));
        }
        let (Some(within), Some(predicate)) = (&self.within_bound, &self.predicate) else {
            return Err(RefineError::AbstractInstanceCheck(self.name.clone()));
        };
        if !within.test(value) {
            log::trace!("{value} is outside the bound of {}", self.name);
            return Ok(false);
        }
        let result = predicate.test(value);
        log::trace!("{}({value}) = {result} for {}", predicate.name(), self.name);
        Ok(result)
    }
}

impl RefinementType {
    /// Explain why `value` is not a member, or `None` when it is.
    pub fn diagnose(&self, value: &Value) -> Result<Option<String>> {
        if self.conforms(value)? {
            return Ok(None);
        }
        if let Some(bound) = &self.bound {
            if let Err(err) = bound.check(value) {
                return Ok(Some(err.to_string()));
            }
        }
        let predicate = self.predicate.as_ref().map(|p| p.name()).unwrap_or("-");
        Ok(Some(format!("{value} does not satisfy {predicate}")))
    }

    /// A one-element sequence holding this type's parse function.
    pub fn validators(self: &Arc<Self>) -> Vec<Validator> {
        let this = Arc::clone(self);
        vec![Box::new(move |value| this.parse(value))]
    }
}
