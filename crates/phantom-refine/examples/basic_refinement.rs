//! Basic Refinement — define a small hierarchy, check and parse values.
//!
//! Run with:
//!   cargo run --example basic_refinement -p phantom-refine

use phantom_refine::predicate::equal;
use phantom_refine::predicate::numeric::{greater, less};
use phantom_refine::{define_sized, Refinement, RefinementBuilder, Repr, SizedFamily, Value};

fn main() {
    // ── 1. Define a concrete type ───────────────────────────────────────────
    //
    // The bound comes from the representation base, `int`; the predicate
    // requires a positive value.
    let positive = RefinementBuilder::new("demo::Positive")
        .base(Repr::Int)
        .predicate(greater(Value::Int(0)))
        .define()
        .expect("Positive should define");
    println!("Defined {}", positive.name());
    println!("  Bound:     {:?}", positive.bound().map(ToString::to_string));
    println!("  Source:    {:?}", positive.bound_source().map(|s| s.as_tag()));
    println!();

    // ── 2. Narrow it further ────────────────────────────────────────────────
    //
    // `Digit` inherits `int` as its bound. Only the predicate changes.
    let digit = RefinementBuilder::new("demo::Digit")
        .extends(&positive)
        .predicate(less(Value::Int(10)))
        .define()
        .expect("Digit should define");
    for candidate in [Value::Int(7), Value::Int(12), Value::str("7")] {
        println!(
            "  {}({candidate}) = {}",
            digit.short_name(),
            digit.conforms(&candidate).expect("Digit is concrete")
        );
    }
    println!();

    // ── 3. Widening the bound is rejected ───────────────────────────────────
    let widened = RefinementBuilder::new("demo::Wide")
        .bound(Repr::Number)
        .extends(&positive)
        .define();
    if let Err(err) = widened {
        println!("Rejected: {err}");
    }
    println!();

    // ── 4. Parse returns the very same value ────────────────────────────────
    let family = SizedFamily::new().expect("sized family should define");
    let items = Value::tuple([Value::Int(1), Value::Int(2)]);
    let parsed = family
        .non_empty
        .parse(items.clone())
        .expect("a non-empty tuple should parse");
    println!("Parsed {parsed} (same value: {})", parsed.is_same(&items));
    match family.non_empty.parse(Value::list([Value::Int(1)])) {
        Ok(_) => println!("unexpected: a list parsed"),
        Err(err) => println!("Rejected: {err}"),
    }

    // ── 5. Sized types compose a size predicate ─────────────────────────────
    let pair = define_sized("demo::Pair", equal(Value::Int(2)), &family.base)
        .expect("Pair should define");
    println!();
    for candidate in [Value::str("ab"), Value::str("abc")] {
        println!(
            "  {}({candidate}) = {}",
            pair.short_name(),
            pair.conforms(&candidate).expect("Pair is concrete")
        );
    }
}
