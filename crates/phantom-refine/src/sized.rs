//! Sized collections with size boundaries.
//!
//! Members of the family are bounded by `SizedIterable` and carry the
//! predicate `all_of([is_not_mutable_instance, count(len)])`. The mutability
//! check is a deny-list of common mutable collections, not a guarantee.

use std::sync::Arc;

use serde_json::json;

use crate::bound::is_not_mutable_instance;
use crate::error::Result;
use crate::phantom::{RefinementBuilder, RefinementType};
use crate::predicate::collection::count;
use crate::predicate::numeric::greater;
use crate::predicate::{all_of, equal, Predicate};
use crate::repr::Repr;
use crate::value::Value;

/// Namespace of the built-in sized family.
pub const SIZED_NAMESPACE: &str = "phantom::sized";

/// The built-in sized family: the abstract base plus `NonEmpty` and
/// `Empty`.
#[derive(Debug, Clone)]
pub struct SizedFamily {
    pub base: Arc<RefinementType>,
    pub non_empty: Arc<RefinementType>,
    pub empty: Arc<RefinementType>,
}

impl SizedFamily {
    pub fn new() -> Result<Self> {
        let base = RefinementBuilder::new(format!("{SIZED_NAMESPACE}::PhantomSized"))
            .bound(Repr::SizedIterable)
            .abstract_type()
            .description("A sized collection whose size satisfies a predicate.")
            .schema_entry("type", json!("array"))
            .define()?;

        let non_empty = sized_builder(
            format!("{SIZED_NAMESPACE}::NonEmpty"),
            greater(Value::Int(0)),
            &base,
        )
        .description("A non-empty array.")
        .schema_entry("minItems", json!(1))
        .define()?;

        let empty = sized_builder(
            format!("{SIZED_NAMESPACE}::Empty"),
            equal(Value::Int(0)),
            &base,
        )
        .description("An empty array.")
        .schema_entry("maxItems", json!(0))
        .define()?;

        Ok(Self {
            base,
            non_empty,
            empty,
        })
    }

    /// All members, base first.
    pub fn members(&self) -> [&Arc<RefinementType>; 3] {
        [&self.base, &self.non_empty, &self.empty]
    }
}

/// Start a sized definition: `len` is applied to the size of the value.
pub fn sized_builder(
    name: impl Into<String>,
    len: Predicate<Value>,
    base: &Arc<RefinementType>,
) -> RefinementBuilder {
    RefinementBuilder::new(name)
        .extends(base)
        .predicate(all_of([is_not_mutable_instance(), count(len)]))
}

/// Define a sized type extending `base`.
pub fn define_sized(
    name: impl Into<String>,
    len: Predicate<Value>,
    base: &Arc<RefinementType>,
) -> Result<Arc<RefinementType>> {
    sized_builder(name, len, base).define()
}
