//! Interval predicates.
//!
//! `open` excludes both endpoints, `closed` includes both; the mixed forms
//! name the low endpoint first.

use std::fmt;

use super::{bind_name, Predicate};

fn interval<T>(
    ctor: &'static str,
    low: T,
    high: T,
    low_inclusive: bool,
    high_inclusive: bool,
) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    Predicate::new(bind_name(ctor, &[&low, &high]), move |v: &T| {
        let above = if low_inclusive { *v >= low } else { *v > low };
        let below = if high_inclusive { *v <= high } else { *v < high };
        above && below
    })
}

/// `low < v < high`
pub fn open<T>(low: T, high: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    interval("open", low, high, false, false)
}

/// `low <= v <= high`
pub fn closed<T>(low: T, high: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    interval("closed", low, high, true, true)
}

/// `low < v <= high`
pub fn open_closed<T>(low: T, high: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    interval("open_closed", low, high, false, true)
}

/// `low <= v < high`
pub fn closed_open<T>(low: T, high: T) -> Predicate<T>
where
    T: PartialOrd + fmt::Display + Send + Sync + 'static,
{
    interval("closed_open", low, high, true, false)
}
