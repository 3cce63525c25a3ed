//! Stress test: many threads check and parse against shared types.

use std::sync::Arc;
use std::thread;

use phantom_refine::predicate::numeric::even;
use phantom_refine::{Refinement, RefinementBuilder, Repr, TypeRegistry, Value};

#[test]
fn stress_concurrent_checks_shared_type() {
    let even_int = RefinementBuilder::new("concurrent::Even")
        .base(Repr::Int)
        .predicate(even())
        .define()
        .expect("definition should succeed");

    let mut handles = Vec::new();
    for t in 0..8 {
        let even_int = Arc::clone(&even_int);
        handles.push(thread::spawn(move || {
            let mut accepted = 0;
            for i in 0..1_000i64 {
                let n = t * 1_000 + i;
                if even_int.conforms(&Value::Int(n)).expect("check") {
                    accepted += 1;
                }
            }
            accepted
        }));
    }

    let accepted: i64 = handles
        .into_iter()
        .map(|h| h.join().expect("thread should not panic"))
        .sum();
    assert_eq!(accepted, 4_000);
}

#[test]
fn stress_concurrent_parse_preserves_identity() {
    let registry = Arc::new(TypeRegistry::with_builtins().expect("builtins"));
    let shared = Value::tuple((0..64).map(Value::Int));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..500 {
                    let parsed = registry
                        .parse("NonEmpty", shared.clone())
                        .expect("parse should succeed");
                    assert!(parsed.is_same(&shared));
                    assert!(registry.parse("Empty", shared.clone()).is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("thread should not panic");
    }
}
