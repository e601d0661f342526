//! Owned schema-less records.
//!
//! [`Record`] is a field-name → [`Field`] mapping for callers that do not
//! have their own struct. Unlike JSON it can hold sets of strings.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::traits::Seekable;
use crate::value::{Number, Value};

/// A single field value inside a [`Record`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Serialized as a sorted array. Deserializing an array yields a
    /// [`Field::List`], never a set.
    #[serde(skip_deserializing)]
    Set(BTreeSet<String>),
    List(Vec<Field>),
    Map(Record),
}

impl Field {
    /// Borrows the field as a runtime value.
    pub fn as_value(&self) -> Value<'_> {
        match self {
            Field::Null => Value::Null,
            Field::Bool(b) => Value::Bool(*b),
            Field::Number(n) => Value::Number(*n),
            Field::String(s) => Value::String(s),
            Field::Set(s) => Value::Set(s),
            Field::List(items) => Value::Node(items),
            Field::Map(record) => Value::Node(record),
        }
    }

    /// Builds a set field.
    pub fn set<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Field::Set(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::String(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::String(s)
    }
}

impl From<bool> for Field {
    fn from(b: bool) -> Self {
        Field::Bool(b)
    }
}

impl From<i64> for Field {
    fn from(n: i64) -> Self {
        Field::Number(Number::I64(n))
    }
}

impl From<i32> for Field {
    fn from(n: i32) -> Self {
        Field::Number(Number::from(n))
    }
}

impl From<f64> for Field {
    fn from(n: f64) -> Self {
        Field::Number(Number::F64(n))
    }
}

impl From<Record> for Field {
    fn from(r: Record) -> Self {
        Field::Map(r)
    }
}

impl From<BTreeSet<String>> for Field {
    fn from(s: BTreeSet<String>) -> Self {
        Field::Set(s)
    }
}

/// An owned record: an ordered mapping of field names to values.
///
/// # Example
///
/// ```
/// use sift::{Record, Seekable, Value};
///
/// let record = Record::new()
///     .with("name", "Apple")
///     .with("user", Record::new().with("role", "admin"));
///
/// assert_eq!(sift::get_by_path(&record, "user.role"), Value::String("admin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Field>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record::default()
    }

    /// Sets a field, returning the record for chaining.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Field>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field in place, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Field>) -> Option<Field> {
        self.fields.insert(name.into(), value.into())
    }

    /// Returns a field by its (undotted) name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Number of top-level fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Seekable for Record {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        self.fields.get(field).map_or(Value::Missing, Field::as_value)
    }

    fn seeker_text(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

/// Lists never resolve a field, numeric or not.
impl Seekable for Vec<Field> {
    fn seeker_field_value(&self, _field: &str) -> Value<'_> {
        Value::Missing
    }

    fn seeker_text(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}
