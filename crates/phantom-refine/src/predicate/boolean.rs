//! Boolean composition of predicates.
//!
//! Conjunctions and disjunctions evaluate left to right and stop at the
//! first operand that decides the result.

use crate::value::Value;

use super::Predicate;

fn join_names<T: ?Sized>(predicates: &[Predicate<T>]) -> String {
    predicates
        .iter()
        .map(|p| p.name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Always succeeds.
pub fn always<T: ?Sized + 'static>() -> Predicate<T> {
    Predicate::new("always", |_: &T| true)
}

/// Never succeeds.
pub fn never<T: ?Sized + 'static>() -> Predicate<T> {
    Predicate::new("never", |_: &T| false)
}

/// Succeeds for truthy values.
pub fn truthy() -> Predicate<Value> {
    Predicate::new("truthy", Value::is_truthy)
}

/// Succeeds for falsy values.
pub fn falsy() -> Predicate<Value> {
    Predicate::new("falsy", |v: &Value| !v.is_truthy())
}

/// Inverts `p`.
pub fn negate<T: ?Sized + 'static>(p: Predicate<T>) -> Predicate<T> {
    Predicate::new(format!("negate({p})"), move |v: &T| !p.test(v))
}

/// Succeeds when both `p` and `q` succeed. `q` is not evaluated when `p`
/// fails.
pub fn both<T: ?Sized + 'static>(p: Predicate<T>, q: Predicate<T>) -> Predicate<T> {
    Predicate::new(format!("both({p}, {q})"), move |v: &T| p.test(v) && q.test(v))
}

/// Succeeds when `p` or `q` succeeds. `q` is not evaluated when `p`
/// succeeds.
pub fn either<T: ?Sized + 'static>(p: Predicate<T>, q: Predicate<T>) -> Predicate<T> {
    Predicate::new(format!("either({p}, {q})"), move |v: &T| p.test(v) || q.test(v))
}

/// Succeeds when exactly one of `p` and `q` succeeds.
pub fn xor<T: ?Sized + 'static>(p: Predicate<T>, q: Predicate<T>) -> Predicate<T> {
    Predicate::new(format!("xor({p}, {q})"), move |v: &T| p.test(v) != q.test(v))
}

/// Succeeds when every predicate succeeds. An empty conjunction always
/// succeeds.
pub fn all_of<T: ?Sized + 'static>(predicates: impl IntoIterator<Item = Predicate<T>>) -> Predicate<T> {
    let predicates: Vec<Predicate<T>> = predicates.into_iter().collect();
    let name = format!("all_of({})", join_names(&predicates));
    Predicate::new(name, move |v: &T| predicates.iter().all(|p| p.test(v)))
}

/// Succeeds when any predicate succeeds. An empty disjunction never
/// succeeds.
pub fn any_of<T: ?Sized + 'static>(predicates: impl IntoIterator<Item = Predicate<T>>) -> Predicate<T> {
    let predicates: Vec<Predicate<T>> = predicates.into_iter().collect();
    let name = format!("any_of({})", join_names(&predicates));
    Predicate::new(name, move |v: &T| predicates.iter().any(|p| p.test(v)))
}

/// Succeeds when exactly one predicate succeeds. Stops as soon as a second
/// success is seen.
pub fn one_of<T: ?Sized + 'static>(predicates: impl IntoIterator<Item = Predicate<T>>) -> Predicate<T> {
    let predicates: Vec<Predicate<T>> = predicates.into_iter().collect();
    let name = format!("one_of({})", join_names(&predicates));
    Predicate::new(name, move |v: &T| {
        let mut seen = false;
        for p in &predicates {
            if p.test(v) {
                if seen {
                    return false;
                }
                seen = true;
            }
        }
        seen
    })
}
