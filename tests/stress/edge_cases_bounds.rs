//! Edge cases: bound resolution, intersections, unions and the mutability
//! guard.

use phantom_refine::predicate::boolean::always;
use phantom_refine::predicate::collection::count;
use phantom_refine::predicate::numeric::less;
use phantom_refine::predicate::{all_of, Predicate};
use phantom_refine::{
    Bound, BoundSource, MutabilityGuard, Refinement, RefineError, RefinementBuilder, Repr, Value,
};

#[test]
fn edge_multiple_representation_bases_form_intersection() {
    let t = RefinementBuilder::new("edge::Both")
        .base(Repr::Sized)
        .base(Repr::Iterable)
        .predicate(count(less(Value::Int(3))))
        .define()
        .expect("definition should succeed");

    assert_eq!(
        t.bound(),
        Some(&Bound::Intersection(vec![Repr::Sized, Repr::Iterable]))
    );
    assert!(t.conforms(&Value::str("ab")).expect("check"));
    assert!(t.conforms(&Value::frozenset([Value::Int(1)])).expect("check"));
    assert!(!t.conforms(&Value::Int(1)).expect("check"));
    assert!(!t.conforms(&Value::str("abc")).expect("check"));
}

#[test]
fn edge_intersection_bound_is_not_mutability_exempt() {
    let err = RefinementBuilder::new("edge::MutableBoth")
        .base(Repr::Sized)
        .base(Repr::Dict)
        .predicate(always())
        .define()
        .unwrap_err();
    assert!(matches!(err, RefineError::MutableBound { .. }));
}

#[test]
fn edge_optional_bound() {
    let t = RefinementBuilder::new("edge::MaybeSmall")
        .bound("int | None".parse::<Repr>().expect("valid expression"))
        .predicate(Predicate::new("small_or_none", |v: &Value| match v {
            Value::None => true,
            other => less(Value::Int(5)).test(other),
        }))
        .define()
        .expect("definition should succeed");

    assert_eq!(t.bound(), Some(&Bound::Single(Repr::optional(Repr::Int))));
    assert!(t.conforms(&Value::None).expect("check"));
    assert!(t.conforms(&Value::Int(4)).expect("check"));
    assert!(!t.conforms(&Value::Int(5)).expect("check"));
    assert!(!t.conforms(&Value::str("4")).expect("check"));
}

#[test]
fn edge_union_bound_with_mutable_member_rejected() {
    let err = RefinementBuilder::new("edge::TupleOrList")
        .bound(Repr::union([Repr::Tuple, Repr::List]))
        .predicate(always())
        .define()
        .unwrap_err();
    assert!(matches!(err, RefineError::MutableBound { .. }));
}

#[test]
fn edge_custom_guard_allows_list() {
    let t = RefinementBuilder::new("edge::ListOfInts")
        .bound(Repr::ListOf(Box::new(Repr::Int)))
        .predicate(always())
        .mutability_guard(MutabilityGuard::permissive())
        .define()
        .expect("permissive guard allows lists");

    assert!(t.conforms(&Value::list([Value::Int(1)])).expect("check"));
    assert!(!t.conforms(&Value::list([Value::Bool(true), Value::str("x")])).expect("check"));
    assert!(!t.conforms(&Value::tuple([Value::Int(1)])).expect("check"));
}

#[test]
fn edge_covariant_tuple_bound() {
    let numbers = RefinementBuilder::new("edge::Numbers")
        .bound(Repr::TupleOf(Box::new(Repr::Number)))
        .predicate(always())
        .define()
        .expect("numbers");
    let ints = RefinementBuilder::new("edge::Ints")
        .bound(Repr::TupleOf(Box::new(Repr::Int)))
        .extends(&numbers)
        .define()
        .expect("tuple bounds are covariant");

    assert_eq!(ints.bound_source(), Some(BoundSource::Explicit));
    assert!(ints.conforms(&Value::tuple([Value::Int(1), Value::Bool(false)])).expect("check"));
    assert!(!ints.conforms(&Value::tuple([Value::Float(1.5)])).expect("check"));
    assert!(numbers.conforms(&Value::tuple([Value::Float(1.5)])).expect("check"));
}

#[test]
fn edge_empty_all_of_accepts_everything_within_bound() {
    let t = RefinementBuilder::new("edge::AnyStr")
        .base(Repr::Str)
        .predicate(all_of(Vec::<Predicate<Value>>::new()))
        .define()
        .expect("definition should succeed");
    assert!(t.conforms(&Value::str("")).expect("check"));
    assert!(!t.conforms(&Value::bytes(b"".to_vec())).expect("check"));
}

#[test]
fn edge_abstract_without_anything() {
    let t = RefinementBuilder::new("edge::Marker")
        .abstract_type()
        .define()
        .expect("abstract types may defer everything");
    assert_eq!(t.bound(), None);
    assert_eq!(t.bound_source(), None);
    assert!(matches!(
        t.parse(Value::None),
        Err(RefineError::AbstractInstanceCheck(name)) if name == "edge::Marker"
    ));
}
