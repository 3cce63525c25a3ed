//! Runtime values checked by refinement types.
//!
//! A [`Value`] is a dynamically typed datum whose concrete representation
//! is reported by [`Value::runtime_type`]. Compound values share their
//! payload through `Arc`, so clones are cheap and two clones of the same
//! value are identical in the sense of [`Value::is_same`].

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::repr::Repr;

/// How JSON arrays are mapped onto values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayMode {
    /// Arrays become immutable tuples.
    #[default]
    Tuple,
    /// Arrays become (known-mutable) lists.
    List,
}

/// A dynamically typed value.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    Bytes(Arc<[u8]>),
    Tuple(Arc<[Value]>),
    List(Arc<[Value]>),
    Set(Arc<[Value]>),
    FrozenSet(Arc<[Value]>),
    Dict(Arc<[(Value, Value)]>),
}

impl Value {
    /// Create a string value.
    pub fn str(s: impl Into<Arc<str>>) -> Self {
        Self::Str(s.into())
    }

    /// Create a bytes value.
    pub fn bytes(b: impl Into<Arc<[u8]>>) -> Self {
        Self::Bytes(b.into())
    }

    /// Create a tuple from items.
    pub fn tuple(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// Create a list from items.
    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Create a set from items, dropping duplicates.
    pub fn set(items: impl IntoIterator<Item = Value>) -> Self {
        Self::Set(dedup(items).into())
    }

    /// Create a frozen set from items, dropping duplicates.
    pub fn frozenset(items: impl IntoIterator<Item = Value>) -> Self {
        Self::FrozenSet(dedup(items).into())
    }

    /// Create a dict from entries. Later entries replace earlier ones with
    /// an equal key.
    pub fn dict(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Self::Dict(out.into())
    }

    /// The concrete representation type of this value.
    pub fn runtime_type(&self) -> Repr {
        match self {
            Self::None => Repr::NoneType,
            Self::Bool(_) => Repr::Bool,
            Self::Int(_) => Repr::Int,
            Self::Float(_) => Repr::Float,
            Self::Str(_) => Repr::Str,
            Self::Bytes(_) => Repr::Bytes,
            Self::Tuple(_) => Repr::Tuple,
            Self::List(_) => Repr::List,
            Self::Set(_) => Repr::Set,
            Self::FrozenSet(_) => Repr::FrozenSet,
            Self::Dict(_) => Repr::Dict,
        }
    }

    /// Reported size, for sized values.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Str(s) => Some(s.chars().count()),
            Self::Bytes(b) => Some(b.len()),
            Self::Tuple(items) | Self::List(items) | Self::Set(items) | Self::FrozenSet(items) => {
                Some(items.len())
            }
            Self::Dict(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Whether this is a sized value with no items.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// The items produced by iterating the value, if it is iterable.
    ///
    /// Strings yield one-character strings, bytes yield ints and dicts
    /// yield their keys.
    pub fn elements(&self) -> Option<Vec<Value>> {
        match self {
            Self::Str(s) => Some(s.chars().map(|c| Value::str(c.to_string())).collect()),
            Self::Bytes(b) => Some(b.iter().map(|byte| Value::Int(i64::from(*byte))).collect()),
            Self::Tuple(items) | Self::List(items) | Self::Set(items) | Self::FrozenSet(items) => {
                Some(items.to_vec())
            }
            Self::Dict(entries) => Some(entries.iter().map(|(k, _)| k.clone()).collect()),
            _ => None,
        }
    }

    /// Membership test: substring for strings, key lookup for dicts.
    pub fn contains(&self, item: &Value) -> bool {
        match (self, item) {
            (Self::Str(s), Self::Str(needle)) => s.contains(&**needle),
            (Self::Bytes(b), Self::Int(n)) => b.iter().any(|byte| i64::from(*byte) == *n),
            (Self::Bytes(b), Self::Bytes(needle)) => {
                needle.is_empty() || b.windows(needle.len()).any(|w| w == &needle[..])
            }
            (Self::Tuple(items) | Self::List(items) | Self::Set(items) | Self::FrozenSet(items), _) => {
                items.iter().any(|v| v == item)
            }
            (Self::Dict(entries), _) => entries.iter().any(|(k, _)| k == item),
            _ => false,
        }
    }

    /// Truthiness: `None`, `False`, zero and empty collections are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            _ => !self.is_empty(),
        }
    }

    /// Identity comparison.
    ///
    /// Compound values are identical when they share the same allocation.
    /// Scalars have no allocation, so they are identical when they have the
    /// same variant and bit-identical payload.
    pub fn is_same(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Str(a), Self::Str(b)) => Arc::ptr_eq(a, b),
            (Self::Bytes(a), Self::Bytes(b)) => Arc::ptr_eq(a, b),
            (Self::Tuple(a), Self::Tuple(b))
            | (Self::List(a), Self::List(b))
            | (Self::Set(a), Self::Set(b))
            | (Self::FrozenSet(a), Self::FrozenSet(b)) => Arc::ptr_eq(a, b),
            (Self::Dict(a), Self::Dict(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Convert a JSON document into a value.
    pub fn from_json(json: &serde_json::Value, arrays: ArrayMode) -> Self {
        match json {
            serde_json::Value::Null => Self::None,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Self::str(s.as_str()),
            serde_json::Value::Array(items) => {
                let items = items.iter().map(|item| Self::from_json(item, arrays));
                match arrays {
                    ArrayMode::Tuple => Self::tuple(items),
                    ArrayMode::List => Self::list(items),
                }
            }
            serde_json::Value::Object(map) => Self::dict(
                map.iter()
                    .map(|(k, v)| (Self::str(k.as_str()), Self::from_json(v, arrays))),
            ),
        }
    }

    /// Convert this value into JSON. Non-string dict keys are rendered
    /// with their repr; non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::None => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Int(n) => serde_json::Value::from(*n),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Self::Str(s) => serde_json::Value::String(s.to_string()),
            Self::Bytes(b) => serde_json::Value::Array(
                b.iter().map(|byte| serde_json::Value::from(*byte)).collect(),
            ),
            Self::Tuple(items) | Self::List(items) | Self::Set(items) | Self::FrozenSet(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Self::Dict(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| {
                        let key = match k {
                            Self::Str(s) => s.to_string(),
                            other => other.to_string(),
                        };
                        (key, v.to_json())
                    })
                    .collect(),
            ),
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            Self::Bool(b) => Some(Number::Int(i64::from(*b))),
            Self::Int(n) => Some(Number::Int(*n)),
            Self::Float(f) => Some(Number::Float(*f)),
            _ => None,
        }
    }
}

fn dedup(items: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
            (Number::Float(a), Number::Float(b)) => a.partial_cmp(&b),
            (Number::Int(a), Number::Float(b)) => compare_int_float(a, b),
            (Number::Float(a), Number::Int(b)) => compare_int_float(b, a).map(Ordering::reverse),
        }
    }
}

/// Exact ordering of an integer against a float, without rounding the
/// integer to the nearest float.
fn compare_int_float(n: i64, f: f64) -> Option<Ordering> {
    // 2^63; every float in [-LIMIT, LIMIT) with no fraction fits an i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_nan() {
        return None;
    }
    if f >= LIMIT {
        return Some(Ordering::Less);
    }
    if f < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc() as i64;
    Some(n.cmp(&whole).then_with(|| {
        let fract = f.fract();
        if fract > 0.0 {
            Ordering::Less
        } else if fract < 0.0 {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }))
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) => true,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) | (Self::List(a), Self::List(b)) => a == b,
            (Self::Set(a) | Self::FrozenSet(a), Self::Set(b) | Self::FrozenSet(b)) => {
                a.len() == b.len() && a.iter().all(|item| b.contains(item))
            }
            (Self::Dict(a), Self::Dict(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .all(|(k, v)| b.iter().any(|(k2, v2)| k == k2 && v == v2))
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.compare(b) == Some(Ordering::Equal),
                _ => false,
            },
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Str(a), Self::Str(b)) => a.partial_cmp(b),
            (Self::Bytes(a), Self::Bytes(b)) => a.partial_cmp(b),
            (Self::Tuple(a), Self::Tuple(b)) | (Self::List(a), Self::List(b)) => a.partial_cmp(b),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.compare(b),
                _ => None,
            },
        }
    }
}

/// Renders the value the way it appears in diagnostics.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(true) => write!(f, "True"),
            Self::Bool(false) => write!(f, "False"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) if x.is_nan() => write!(f, "nan"),
            Self::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "inf" } else { "-inf" })
            }
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Str(s) => {
                write!(f, "'")?;
                for c in s.chars() {
                    match c {
                        '\'' => write!(f, "\\'")?,
                        '\\' => write!(f, "\\\\")?,
                        '\n' => write!(f, "\\n")?,
                        '\r' => write!(f, "\\r")?,
                        '\t' => write!(f, "\\t")?,
                        c => write!(f, "{c}")?,
                    }
                }
                write!(f, "'")
            }
            Self::Bytes(b) => {
                write!(f, "b'")?;
                for byte in b.iter() {
                    match byte {
                        b'\'' => write!(f, "\\'")?,
                        b'\\' => write!(f, "\\\\")?,
                        0x20..=0x7e => write!(f, "{}", *byte as char)?,
                        _ => write!(f, "\\x{byte:02x}")?,
                    }
                }
                write!(f, "'")
            }
            Self::Tuple(items) if items.len() == 1 => write!(f, "({},)", items[0]),
            Self::Tuple(items) => write_items(f, "(", items, ")"),
            Self::List(items) => write_items(f, "[", items, "]"),
            Self::Set(items) if items.is_empty() => write!(f, "set()"),
            Self::Set(items) => write_items(f, "{", items, "}"),
            Self::FrozenSet(items) if items.is_empty() => write!(f, "frozenset()"),
            Self::FrozenSet(items) => write_items(f, "frozenset({", items, "})"),
            Self::Dict(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Value], close: &str) -> fmt::Result {
    write!(f, "{open}")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    write!(f, "{close}")
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::str(s)
    }
}
