//! Dotted-path field access.

use crate::traits::Seekable;
use crate::value::Value;

/// Resolves a dotted path such as `"user.address.city"` against a record.
///
/// Each segment is looked up on the current nested node. The walk stops
/// with [`Value::Missing`] as soon as an intermediate value is not a node.
/// Segments are never interpreted as list indices, so `"items.0"` does not
/// resolve.
///
/// ```
/// use serde_json::json;
/// use sift::{get_by_path, Value};
///
/// let doc = json!({"user": {"name": "Ada"}, "tags": ["a"]});
/// assert_eq!(get_by_path(&doc, "user.name"), Value::String("Ada"));
/// assert_eq!(get_by_path(&doc, "user.name.first"), Value::Missing);
/// assert_eq!(get_by_path(&doc, "tags.0"), Value::Missing);
/// ```
pub fn get_by_path<'a, T>(record: &'a T, path: &str) -> Value<'a>
where
    T: Seekable + ?Sized,
{
    let mut segments = path.split('.');
    let first = match segments.next() {
        Some(segment) => record.seeker_field_value(segment),
        None => return Value::Missing,
    };

    segments
        .try_fold(first, |current, segment| {
            current.as_node().map(|node| node.seeker_field_value(segment))
        })
        .unwrap_or(Value::Missing)
}
