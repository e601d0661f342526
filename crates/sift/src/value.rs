//! Runtime value types for field comparison.
//!
//! [`Value`] is what a record hands back for a field at evaluation time,
//! borrowed from the record itself. [`Operand`] is the owned counterpart
//! stored inside a search condition.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::traits::Seekable;

/// Runtime value for comparison, borrowed from the source record.
///
/// # Example
///
/// ```
/// use sift::{Value, Number};
///
/// let name = String::from("Apple");
/// let v = Value::String(&name);
/// assert_eq!(v.as_str(), Some("Apple"));
/// assert!(Value::Number(Number::I64(3)).is_number());
/// ```
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// Field not present, or a dotted path that did not resolve.
    Missing,
    /// Explicit null.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value (borrowed).
    String(&'a str),
    /// Set of strings.
    Set(&'a BTreeSet<String>),
    /// Nested mapping or list that can be walked further.
    Node(&'a dyn Seekable),
}

impl<'a> Value<'a> {
    /// Returns `true` for `Missing` and `Null`.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Missing | Value::Null)
    }

    /// Returns `true` if this is a `Missing` value.
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `Number` value.
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if this is a `Bool` value.
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the set, if present.
    pub fn as_set(&self) -> Option<&'a BTreeSet<String>> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the nested node, if present.
    pub fn as_node(&self) -> Option<&'a dyn Seekable> {
        match self {
            Value::Node(n) => Some(*n),
            _ => None,
        }
    }

    /// Short type name used in anomaly reports.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Missing => "missing",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Set(_) => "set",
            Value::Node(_) => "node",
        }
    }

    /// Borrows a JSON value as a runtime value.
    ///
    /// Arrays and objects become [`Value::Node`].
    pub fn from_json(value: &'a serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => Value::Number(Number::from_json(n)),
            Json::String(s) => Value::String(s),
            Json::Array(_) | Json::Object(_) => Value::Node(value),
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, "Missing"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Set(s) => f.debug_tuple("Set").field(s).finish(),
            Value::Node(n) => f
                .debug_tuple("Node")
                .field(&n.seeker_text().unwrap_or_default())
                .finish(),
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Missing, Value::Missing) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.compare(*b) == Some(Ordering::Equal),
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            // Nodes compare structurally; unserializable nodes never compare equal.
            (Value::Node(a), Value::Node(b)) => match (a.seeker_text(), b.seeker_text()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
            _ => false,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision.
/// Comparisons between different variants go through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` if the number is an integer or a finite float.
    pub fn is_finite(self) -> bool {
        match self {
            Number::F64(n) => n.is_finite(),
            _ => true,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    fn from_json(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::I64(i)
        } else if let Some(u) = n.as_u64() {
            Number::U64(u)
        } else {
            Number::F64(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

/// Renders without a trailing `.0`, with `NaN` and `Infinity` spelled out.
/// Very large and very small floats print positionally, never in exponent
/// form.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::I64(n) => write!(f, "{n}"),
            Number::U64(n) => write!(f, "{n}"),
            Number::F64(n) if n.is_nan() => write!(f, "NaN"),
            Number::F64(n) if n.is_infinite() => {
                if n.is_sign_negative() {
                    write!(f, "-Infinity")
                } else {
                    write!(f, "Infinity")
                }
            }
            Number::F64(n) => write!(f, "{n}"),
        }
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Owned operand stored in a search condition.
///
/// Which shape a condition expects depends on its kind: text for keyword
/// and exact conditions, anything boolean-like for boolean conditions, and
/// a set for `notInSet`. A JSON array deserializes as a set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Boolean operand.
    Bool(bool),
    /// Numeric operand.
    Number(Number),
    /// Text operand.
    Text(String),
    /// Set of strings.
    Set(BTreeSet<String>),
}

impl Operand {
    /// Borrows the operand as a runtime value so it goes through the same
    /// coercions as record values.
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Operand::Bool(b) => Value::Bool(*b),
            Operand::Number(n) => Value::Number(*n),
            Operand::Text(s) => Value::String(s),
            Operand::Set(s) => Value::Set(s),
        }
    }

    /// Builds a set operand from any iterator of strings.
    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Operand::Set(items.into_iter().map(Into::into).collect())
    }
}

impl Default for Operand {
    fn default() -> Self {
        Operand::Text(String::new())
    }
}

impl From<&str> for Operand {
    fn from(s: &str) -> Self {
        Operand::Text(s.to_string())
    }
}

impl From<String> for Operand {
    fn from(s: String) -> Self {
        Operand::Text(s)
    }
}

impl From<bool> for Operand {
    fn from(b: bool) -> Self {
        Operand::Bool(b)
    }
}

impl From<Number> for Operand {
    fn from(n: Number) -> Self {
        Operand::Number(n)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(Number::I64(n))
    }
}

impl From<i32> for Operand {
    fn from(n: i32) -> Self {
        Operand::Number(Number::from(n))
    }
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(Number::F64(n))
    }
}

impl From<BTreeSet<String>> for Operand {
    fn from(s: BTreeSet<String>) -> Self {
        Operand::Set(s)
    }
}
