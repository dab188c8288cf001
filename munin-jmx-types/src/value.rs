//! Values returned by a JMX gateway for a single attribute read.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`.
    Unsigned(u64),
    Float(f64),
    Text(String),
    Null,
}

impl Scalar {
    /// Check if this is the null scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }
}

/// Munin value formatting. Booleans become `1`/`0`. Null has no value to
/// report and writes nothing; extraction drops it before rendering.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => f.write_str(if *b { "1" } else { "0" }),
            Scalar::Integer(i) => write!(f, "{}", i),
            Scalar::Unsigned(u) => write!(f, "{}", u),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
            Scalar::Null => Ok(()),
        }
    }
}

/// An attribute value as fetched: a scalar, an ordered sequence, or a
/// string-keyed mapping, nested arbitrarily.
///
/// Composite MBean attributes such as `HeapMemoryUsage` arrive as mappings;
/// tabular and array attributes arrive as sequences.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FetchedValue {
    Scalar(Scalar),
    Sequence(Vec<FetchedValue>),
    Mapping(BTreeMap<String, FetchedValue>),
}

impl FetchedValue {
    /// Returns the scalar if this value is a leaf.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            FetchedValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// Descend one level.
    ///
    /// Sequences are indexed by `segment` read as a non-negative integer,
    /// mappings by `segment` as a key. Scalars have no children.
    pub fn child(&self, segment: &str) -> Option<&FetchedValue> {
        match self {
            FetchedValue::Sequence(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            FetchedValue::Mapping(entries) => entries.get(segment),
            FetchedValue::Scalar(_) => None,
        }
    }

    /// Walk a dot-separated path such as `"used"` or `"a.b.1"`.
    ///
    /// Returns `None` as soon as a segment cannot be resolved.
    ///
    /// # Example
    ///
    /// ```rust
    /// use munin_jmx_types::{FetchedValue, Scalar};
    /// use std::collections::BTreeMap;
    ///
    /// let list = FetchedValue::Sequence(vec![10_i64.into(), 20_i64.into(), 30_i64.into()]);
    /// let mut inner = BTreeMap::new();
    /// inner.insert("b".to_string(), list);
    /// let mut outer = BTreeMap::new();
    /// outer.insert("a".to_string(), FetchedValue::Mapping(inner));
    /// let value = FetchedValue::Mapping(outer);
    ///
    /// assert_eq!(value.walk("a.b.1"), Some(&FetchedValue::Scalar(Scalar::Integer(20))));
    /// assert_eq!(value.walk("a.b.5"), None);
    /// assert_eq!(value.walk("a.c"), None);
    /// ```
    pub fn walk(&self, path: &str) -> Option<&FetchedValue> {
        match path.split_once('.') {
            Some((head, rest)) => self.child(head)?.walk(rest),
            None => self.child(path),
        }
    }
}

impl From<Scalar> for FetchedValue {
    fn from(s: Scalar) -> Self {
        FetchedValue::Scalar(s)
    }
}

impl From<i64> for FetchedValue {
    fn from(i: i64) -> Self {
        FetchedValue::Scalar(Scalar::Integer(i))
    }
}

impl From<u64> for FetchedValue {
    fn from(u: u64) -> Self {
        match i64::try_from(u) {
            Ok(i) => FetchedValue::Scalar(Scalar::Integer(i)),
            Err(_) => FetchedValue::Scalar(Scalar::Unsigned(u)),
        }
    }
}

impl From<f64> for FetchedValue {
    fn from(x: f64) -> Self {
        FetchedValue::Scalar(Scalar::Float(x))
    }
}

impl From<bool> for FetchedValue {
    fn from(b: bool) -> Self {
        FetchedValue::Scalar(Scalar::Bool(b))
    }
}

impl From<&str> for FetchedValue {
    fn from(s: &str) -> Self {
        FetchedValue::Scalar(Scalar::Text(s.to_string()))
    }
}

impl From<String> for FetchedValue {
    fn from(s: String) -> Self {
        FetchedValue::Scalar(Scalar::Text(s))
    }
}
