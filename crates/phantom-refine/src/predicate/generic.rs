//! Generic predicates — equality, identity and representation checks.

use std::fmt;

use crate::repr::Repr;
use crate::value::Value;

use super::{bind_name, Predicate};

/// Succeeds when the argument is equal to `a`.
pub fn equal<T>(a: T) -> Predicate<T>
where
    T: PartialEq + fmt::Display + Send + Sync + 'static,
{
    Predicate::new(bind_name("equal", &[&a]), move |b: &T| *b == a)
}

/// Succeeds when the argument is the same value as `a`, see
/// [`Value::is_same`].
pub fn identical(a: Value) -> Predicate<Value> {
    Predicate::new(bind_name("identical", &[&a]), move |b: &Value| {
        a.is_same(b)
    })
}

/// Succeeds when the argument is an instance of `t`. Type parameters are
/// erased; use [`of_complex_type`] to check items too.
pub fn of_type(t: Repr) -> Predicate<Value> {
    Predicate::new(bind_name("of_type", &[&t]), move |v: &Value| {
        t.is_instance(v)
    })
}

/// Succeeds when the argument is an instance of any of `types`.
pub fn of_types(types: impl IntoIterator<Item = Repr>) -> Predicate<Value> {
    let types: Vec<Repr> = types.into_iter().collect();
    let rendered: Vec<String> = types.iter().map(Repr::to_string).collect();
    let name = format!("of_type(({}))", rendered.join(", "));
    Predicate::new(name, move |v: &Value| types.iter().any(|t| t.is_instance(v)))
}

/// Succeeds when the argument structurally conforms to `t`, including
/// union members and collection items. `t` is normalized first, so
/// `Optional[int]` and `int | None` behave (and are named) identically.
pub fn of_complex_type(t: Repr) -> Predicate<Value> {
    let t = t.normalize();
    Predicate::new(bind_name("of_complex_type", &[&t]), move |v: &Value| {
        t.matches(v)
    })
}
