//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Define an abstract root and concrete descendants
//! 2. Check bounds are resolved and frozen at definition time
//! 3. Reject hierarchies that widen or omit their bound
//! 4. Check and parse values, preserving identity
//! 5. Export schemas and use the validator hook

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use phantom_refine::predicate::collection::count;
use phantom_refine::predicate::numeric::{greater, less};
use phantom_refine::predicate::{all_of, equal, Predicate};
use phantom_refine::{
    is_not_mutable_instance, Bound, BoundSource, Refinement, RefineError, RefinementBuilder, Repr,
    SizedFamily, Value,
};

#[test]
fn full_workflow_define_check_parse() {
    // ── Step 1: Define the hierarchy ────────────────────────────────────
    let number = RefinementBuilder::new("workflow::Measured")
        .bound(Repr::Number)
        .abstract_type()
        .define()
        .expect("abstract root should define");
    let percent = RefinementBuilder::new("workflow::Percent")
        .base(Repr::Int)
        .extends(&number)
        .predicate(all_of([greater(Value::Int(-1)), less(Value::Int(101))]))
        .define()
        .expect("Percent should define");
    let small = RefinementBuilder::new("workflow::SmallPercent")
        .extends(&percent)
        .predicate(less(Value::Int(10)))
        .define()
        .expect("SmallPercent should define");

    // ── Step 2: Resolved fields ─────────────────────────────────────────
    assert!(number.bound().is_some());
    assert!(number.predicate().is_none());
    assert_eq!(percent.bound(), Some(&Bound::Single(Repr::Int)));
    assert_eq!(percent.bound_source(), Some(BoundSource::Implicit));
    assert_eq!(small.bound(), Some(&Bound::Single(Repr::Int)));
    assert_eq!(small.bound_source(), Some(BoundSource::Inherited));
    for concrete in [&percent, &small] {
        assert!(concrete.bound().is_some());
        assert!(concrete.predicate().is_some());
    }

    // ── Step 3: Checks ──────────────────────────────────────────────────
    assert!(matches!(
        number.conforms(&Value::Int(1)),
        Err(RefineError::AbstractInstanceCheck(_))
    ));
    assert!(percent.conforms(&Value::Int(55)).expect("check"));
    assert!(!percent.conforms(&Value::Int(101)).expect("check"));
    assert!(!percent.conforms(&Value::Float(5.0)).expect("check"));
    assert!(small.conforms(&Value::Int(9)).expect("check"));
    assert!(!small.conforms(&Value::Int(55)).expect("check"));

    // ── Step 4: Parse ───────────────────────────────────────────────────
    assert_eq!(small.parse(Value::Int(3)).expect("parse"), Value::Int(3));
    let err = small.parse(Value::Int(55)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not parse workflow::SmallPercent from 55"
    );
    assert!(!err.is_definition_error());
}

#[test]
fn workflow_example_non_empty_sequence() {
    let non_empty = RefinementBuilder::new("workflow::NonEmptySeq")
        .bound(Repr::Sequence)
        .predicate(count(greater(Value::Int(0))))
        .define()
        .expect("definition should succeed");

    assert!(!non_empty.conforms(&Value::tuple([])).expect("check"));
    assert!(non_empty.conforms(&Value::tuple([Value::Int(1)])).expect("check"));
}

#[test]
fn workflow_example_empty_rejects_mutable() {
    let empty = RefinementBuilder::new("workflow::EmptySeq")
        .bound(Repr::Sequence)
        .predicate(all_of([is_not_mutable_instance(), count(equal(Value::Int(0)))]))
        .define()
        .expect("definition should succeed");

    assert!(empty.conforms(&Value::tuple([])).expect("check"));
    assert!(!empty.conforms(&Value::list([])).expect("check"));
}

#[test]
fn workflow_example_narrowing_only() {
    let always = || Predicate::new("always", |_: &Value| true);

    let wide = RefinementBuilder::new("workflow::Wide")
        .bound(Repr::Number)
        .predicate(always())
        .define()
        .expect("Wide should define");
    let narrow = RefinementBuilder::new("workflow::Narrow")
        .bound(Repr::Int)
        .extends(&wide)
        .define();
    assert!(narrow.is_ok());

    let int_root = RefinementBuilder::new("workflow::IntRoot")
        .bound(Repr::Int)
        .predicate(always())
        .define()
        .expect("IntRoot should define");
    let err = RefinementBuilder::new("workflow::Widened")
        .bound(Repr::Number)
        .extends(&int_root)
        .define()
        .unwrap_err();
    assert!(matches!(err, RefineError::BoundIncompatible { .. }));
    assert!(err.is_definition_error());
}

#[test]
fn workflow_unresolved_bound() {
    let err = RefinementBuilder::new("workflow::Unbounded")
        .predicate(Predicate::new("always", |_: &Value| true))
        .define()
        .unwrap_err();
    assert!(matches!(err, RefineError::UnresolvedBound(name) if name == "workflow::Unbounded"));
}

#[test]
fn workflow_bound_failure_skips_predicate() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let counted = RefinementBuilder::new("workflow::Counted")
        .base(Repr::Str)
        .predicate(Predicate::new("counted", move |_: &Value| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }))
        .define()
        .expect("definition should succeed");

    assert!(!counted.conforms(&Value::Int(1)).expect("check"));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(counted.conforms(&Value::str("a")).expect("check"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn workflow_predicate_receives_original_value() {
    let original = Value::tuple([Value::str("a")]);
    let expected = original.clone();
    let seen = RefinementBuilder::new("workflow::Seen")
        .bound(Repr::Tuple)
        .predicate(Predicate::new("is_original", move |v: &Value| v.is_same(&expected)))
        .define()
        .expect("definition should succeed");

    assert!(seen.conforms(&original).expect("check"));
    assert!(!seen.conforms(&Value::tuple([Value::str("a")])).expect("check"));
    let parsed = seen.parse(original.clone()).expect("parse");
    assert!(parsed.is_same(&original));
}

#[test]
fn workflow_schema_and_validators() {
    let family = SizedFamily::new().expect("sized family");
    let schema = family.non_empty.schema();
    assert_eq!(schema.get("type"), Some(&serde_json::json!("array")));
    assert_eq!(schema.get("minItems"), Some(&serde_json::json!(1)));

    let validators = family.empty.validators();
    assert_eq!(validators.len(), 1);
    let value = Value::tuple([]);
    let parsed = validators[0](value.clone()).expect("empty tuple is valid");
    assert!(parsed.is_same(&value));
    assert!(validators[0](Value::tuple([Value::None])).is_err());
}
