//! Numeric predicates.
//!
//! Comparisons work over any `PartialOrd` type, including [`Value`], whose
//! numbers compare across `bool`, `int` and `float`. Incomparable
//! arguments (e.g. a string against an int) fail every comparison.

use std::cmp::Ordering;
use std::fmt;

use crate::value::Value;

use super::generic::equal;
use super::{bind_name, Predicate};

fn compare<T>(ctor: &'static str, n: T, accept: fn(Ordering) -> bool) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    Predicate::new(bind_name(ctor, &[&n]), move |v: &T| {
        v.partial_cmp(&n).map(accept).unwrap_or(false)
    })
}

/// Succeeds when the argument is greater than `n`.
pub fn greater<T>(n: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    compare("greater", n, Ordering::is_gt)
}

/// Succeeds when the argument is greater than or equal to `n`.
pub fn ge<T>(n: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    compare("ge", n, Ordering::is_ge)
}

/// Succeeds when the argument is less than `n`.
pub fn less<T>(n: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    compare("less", n, Ordering::is_lt)
}

/// Succeeds when the argument is less than or equal to `n`.
pub fn le<T>(n: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    compare("le", n, Ordering::is_le)
}

pub fn positive() -> Predicate<Value> {
    greater(Value::Int(0))
}

pub fn non_positive() -> Predicate<Value> {
    le(Value::Int(0))
}

pub fn negative() -> Predicate<Value> {
    less(Value::Int(0))
}

pub fn non_negative() -> Predicate<Value> {
    ge(Value::Int(0))
}

/// Applies `p` to the argument modulo `n`. The remainder takes the sign of
/// `n`, as in floored division. Non-numbers and `n == 0` fail.
pub fn modulo(n: i64, p: Predicate<Value>) -> Predicate<Value> {
    Predicate::new(bind_name("modulo", &[&n, &p]), move |v: &Value| {
        floored_rem(v, n).map(|r| p.test(&r)).unwrap_or(false)
    })
}

pub fn even() -> Predicate<Value> {
    modulo(2, equal(Value::Int(0)))
}

pub fn odd() -> Predicate<Value> {
    modulo(2, equal(Value::Int(1)))
}

fn floored_rem(v: &Value, n: i64) -> Option<Value> {
    if n == 0 {
        return None;
    }
    match v {
        Value::Bool(b) => floored_rem(&Value::Int(i64::from(*b)), n),
        Value::Int(a) => {
            let r = a.checked_rem(n)?;
            Some(Value::Int(if r != 0 && (r < 0) != (n < 0) { r + n } else { r }))
        }
        Value::Float(a) => {
            let n = n as f64;
            Some(Value::Float(a - n * (a / n).floor()))
        }
        _ => None,
    }
}
