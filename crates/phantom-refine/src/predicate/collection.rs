//! Collection predicates — membership, size and quantifiers.

use crate::value::Value;

use super::{bind_name, Predicate};

/// Succeeds when the argument contains `item`.
pub fn contains(item: Value) -> Predicate<Value> {
    Predicate::new(bind_name("contains", &[&item]), move |v: &Value| {
        v.contains(&item)
    })
}

/// Succeeds when the argument is contained in `container`.
pub fn contained(container: Value) -> Predicate<Value> {
    Predicate::new(bind_name("contained", &[&container]), move |v: &Value| {
        container.contains(v)
    })
}

/// Applies `p` to the size of the argument, as an int value. Unsized
/// arguments fail.
pub fn count(p: Predicate<Value>) -> Predicate<Value> {
    Predicate::new(bind_name("count", &[&p]), move |v: &Value| {
        v.len().map(|n| p.test(&Value::from(n))).unwrap_or(false)
    })
}

/// Succeeds when `p` holds for at least one item.
pub fn exists(p: Predicate<Value>) -> Predicate<Value> {
    Predicate::new(bind_name("exists", &[&p]), move |v: &Value| {
        v.elements()
            .map(|items| items.iter().any(|item| p.test(item)))
            .unwrap_or(false)
    })
}

/// Succeeds when `p` holds for every item. Empty collections succeed;
/// non-iterable arguments fail.
pub fn every(p: Predicate<Value>) -> Predicate<Value> {
    Predicate::new(bind_name("every", &[&p]), move |v: &Value| {
        v.elements()
            .map(|items| items.iter().all(|item| p.test(item)))
            .unwrap_or(false)
    })
}
