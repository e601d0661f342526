//! The record access trait.
//!
//! Any type that can hand out named fields as [`Value`]s can be filtered and
//! sorted. The crate implements [`Seekable`] for `serde_json::Value` and for
//! its own [`Record`](crate::Record); application structs implement it by
//! hand.

use crate::value::Value;

/// Trait for records that can be searched by the engine.
///
/// # Manual Implementation
///
/// ```
/// use sift::{Seekable, Value, Number};
///
/// struct Product {
///     name: String,
///     stock: u32,
/// }
///
/// impl Seekable for Product {
///     fn seeker_field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "stock" => Value::Number(Number::from(self.stock)),
///             _ => Value::Missing,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Returns the value of a single (undotted) field.
    ///
    /// Unknown fields return [`Value::Missing`]. Nested mappings are
    /// returned as [`Value::Node`] so dotted paths can walk into them.
    fn seeker_field_value(&self, field: &str) -> Value<'_>;

    /// Structural text rendering of the whole record, used when a nested
    /// node has to be compared as text.
    ///
    /// The default has no structural form.
    fn seeker_text(&self) -> Option<String> {
        None
    }
}

impl<T: Seekable + ?Sized> Seekable for &T {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        (**self).seeker_field_value(field)
    }

    fn seeker_text(&self) -> Option<String> {
        (**self).seeker_text()
    }
}

/// JSON objects expose their keys; every other JSON shape has no fields.
///
/// Arrays deliberately do not resolve numeric segments.
impl Seekable for serde_json::Value {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.get(field).map_or(Value::Missing, Value::from_json),
            _ => Value::Missing,
        }
    }

    fn seeker_text(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Number;
    use serde_json::json;

    struct TestItem {
        name: String,
        count: i32,
    }

    impl Seekable for TestItem {
        fn seeker_field_value(&self, field: &str) -> Value<'_> {
            match field {
                "name" => Value::String(&self.name),
                "count" => Value::Number(Number::from(self.count)),
                _ => Value::Missing,
            }
        }
    }

    #[test]
    fn seekable_manual_impl() {
        let item = TestItem {
            name: "test".to_string(),
            count: 42,
        };

        assert_eq!(item.seeker_field_value("name"), Value::String("test"));
        assert_eq!(
            item.seeker_field_value("count"),
            Value::Number(Number::I64(42))
        );
        assert_eq!(item.seeker_field_value("unknown"), Value::Missing);
        assert_eq!(item.seeker_text(), None);
    }

    #[test]
    fn json_object_fields() {
        let doc = json!({"name": "Apple", "meta": {"tag": "fruit"}});
        assert_eq!(doc.seeker_field_value("name"), Value::String("Apple"));
        assert!(doc.seeker_field_value("meta").as_node().is_some());
        assert_eq!(doc.seeker_field_value("nope"), Value::Missing);
    }

    #[test]
    fn json_non_objects_have_no_fields() {
        assert_eq!(json!(["a", "b"]).seeker_field_value("0"), Value::Missing);
        assert_eq!(json!("text").seeker_field_value("len"), Value::Missing);
        assert_eq!(json!(null).seeker_field_value("x"), Value::Missing);
    }

    #[test]
    fn json_text_is_compact() {
        let doc = json!({"a": [1, 2]});
        assert_eq!(doc.seeker_text().as_deref(), Some(r#"{"a":[1,2]}"#));
    }
}
