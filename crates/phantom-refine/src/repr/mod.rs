//! Representation types — the structural layer under every refinement.
//!
//! The module provides:
//! - A small nominal lattice of built-in representations
//! - Parametrized shapes (`tuple[T, ...]`, `list[T]`) and unions
//! - Subtype and instance checks over [`Value`]s
//! - Canonical union normalization and a type-expression parser

pub mod parse;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::Value;

/// A representation type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Repr {
    /// Top of the lattice; every value is an object.
    Object,
    NoneType,
    Bool,
    Int,
    Float,
    /// Abstract numeric tower root (`bool`, `int`, `float`).
    Number,
    Str,
    Bytes,
    Tuple,
    List,
    Set,
    FrozenSet,
    Dict,
    /// Anything with a size.
    Sized,
    /// Anything that can be iterated.
    Iterable,
    /// Intersection of `Sized` and `Iterable`.
    SizedIterable,
    Sequence,
    Mapping,
    /// Homogeneous tuple, `tuple[T, ...]`.
    TupleOf(Box<Repr>),
    /// Homogeneous list, `list[T]`.
    ListOf(Box<Repr>),
    /// Union of alternatives; see [`Repr::normalize`].
    Union(Vec<Repr>),
}

impl Repr {
    /// Build a normalized union of the given members.
    pub fn union(members: impl IntoIterator<Item = Repr>) -> Self {
        Repr::Union(members.into_iter().collect()).normalize()
    }

    /// `Optional[T]`, i.e. `Union[T, NoneType]`.
    pub fn optional(inner: Repr) -> Self {
        Repr::union([inner, Repr::NoneType])
    }

    /// Canonical form: nested unions flattened, duplicate members dropped
    /// (first occurrence wins), one-member unions collapsed. Parameters are
    /// normalized recursively.
    pub fn normalize(self) -> Self {
        match self {
            Repr::Union(members) => {
                let mut flat: Vec<Repr> = Vec::new();
                for member in members {
                    match member.normalize() {
                        Repr::Union(inner) => {
                            for m in inner {
                                if !flat.contains(&m) {
                                    flat.push(m);
                                }
                            }
                        }
                        m => {
                            if !flat.contains(&m) {
                                flat.push(m);
                            }
                        }
                    }
                }
                if flat.len() == 1 {
                    flat.remove(0)
                } else {
                    Repr::Union(flat)
                }
            }
            Repr::TupleOf(item) => Repr::TupleOf(Box::new(item.normalize())),
            Repr::ListOf(item) => Repr::ListOf(Box::new(item.normalize())),
            other => other,
        }
    }

    /// The same representation with type parameters erased.
    pub fn erased(&self) -> Repr {
        match self {
            Repr::TupleOf(_) => Repr::Tuple,
            Repr::ListOf(_) => Repr::List,
            Repr::Union(members) => Repr::Union(members.iter().map(Repr::erased).collect()),
            other => other.clone(),
        }
    }

    fn direct_supertypes(&self) -> Vec<Repr> {
        match self {
            Repr::Bool => vec![Repr::Int],
            Repr::Int | Repr::Float => vec![Repr::Number],
            Repr::Str | Repr::Bytes | Repr::Tuple | Repr::List => vec![Repr::Sequence],
            Repr::Dict => vec![Repr::Mapping],
            Repr::Sequence | Repr::Mapping | Repr::Set | Repr::FrozenSet => {
                vec![Repr::SizedIterable]
            }
            Repr::SizedIterable => vec![Repr::Sized, Repr::Iterable],
            Repr::TupleOf(_) => vec![Repr::Tuple],
            Repr::ListOf(_) => vec![Repr::List],
            _ => Vec::new(),
        }
    }

    /// Whether every value of `self` is also a value of `other`.
    ///
    /// `tuple[T, ...]` is covariant in `T`; `list[T]` is invariant.
    pub fn is_subtype_of(&self, other: &Repr) -> bool {
        if self == other || *other == Repr::Object {
            return true;
        }
        if let Repr::Union(members) = self {
            return members.iter().all(|m| m.is_subtype_of(other));
        }
        if let Repr::Union(members) = other {
            return members.iter().any(|m| self.is_subtype_of(m));
        }
        match (self, other) {
            (Repr::TupleOf(a), Repr::TupleOf(b)) => a.is_subtype_of(b),
            (Repr::ListOf(a), Repr::ListOf(b)) => a == b,
            _ => self
                .direct_supertypes()
                .iter()
                .any(|parent| parent.is_subtype_of(other)),
        }
    }

    /// Nominal instance check with type parameters erased.
    pub fn is_instance(&self, value: &Value) -> bool {
        value.runtime_type().is_subtype_of(&self.erased())
    }

    /// Structural instance check: unions match when any member matches,
    /// parametrized shapes check every item.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (Repr::Union(members), _) => members.iter().any(|m| m.matches(value)),
            (Repr::TupleOf(item), Value::Tuple(items)) => items.iter().all(|v| item.matches(v)),
            (Repr::ListOf(item), Value::List(items)) => items.iter().all(|v| item.matches(v)),
            (Repr::TupleOf(_) | Repr::ListOf(_), _) => false,
            _ => value.runtime_type().is_subtype_of(self),
        }
    }

    /// Name of a parameterless representation as written in type
    /// expressions.
    fn simple_name(&self) -> Option<&'static str> {
        Some(match self {
            Repr::Object => "object",
            Repr::NoneType => "NoneType",
            Repr::Bool => "bool",
            Repr::Int => "int",
            Repr::Float => "float",
            Repr::Number => "Number",
            Repr::Str => "str",
            Repr::Bytes => "bytes",
            Repr::Tuple => "tuple",
            Repr::List => "list",
            Repr::Set => "set",
            Repr::FrozenSet => "frozenset",
            Repr::Dict => "dict",
            Repr::Sized => "Sized",
            Repr::Iterable => "Iterable",
            Repr::SizedIterable => "SizedIterable",
            Repr::Sequence => "Sequence",
            Repr::Mapping => "Mapping",
            _ => return None,
        })
    }
}

impl fmt::Display for Repr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Repr::TupleOf(item) => write!(f, "tuple[{item}, ...]"),
            Repr::ListOf(item) => write!(f, "list[{item}]"),
            Repr::Union(members) => {
                write!(f, "Union[")?;
                for (i, m) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{m}")?;
                }
                write!(f, "]")
            }
            simple => write!(f, "{}", simple.simple_name().unwrap_or("?")),
        }
    }
}

impl Serialize for Repr {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Repr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
