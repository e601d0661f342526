//! Id → display text lookups over a keyed map of records.
//!
//! Pickers and autocomplete inputs usually store an id and show something
//! readable. These helpers resolve that text from a map of records.

use std::collections::HashMap;

use crate::coerce::display_text;
use crate::path::get_by_path;
use crate::signal::Source;
use crate::traits::Seekable;

/// Display text of field `key` of the record stored under `id`.
///
/// Returns an empty string when the id is unknown or the field is missing.
///
/// ```
/// use std::collections::HashMap;
/// use serde_json::json;
/// use sift::display_field;
///
/// let users = HashMap::from([("u1".to_string(), json!({"name": "Ada"}))]);
/// assert_eq!(display_field(&users, "u1", "name"), "Ada");
/// assert_eq!(display_field(&users, "u9", "name"), "");
/// ```
pub fn display_field<T: Seekable>(map: &HashMap<String, T>, id: &str, key: &str) -> String {
    match map.get(id) {
        Some(record) => display_text(&get_by_path(record, key)),
        None => String::new(),
    }
}

/// Labelled display text built from several fields.
///
/// Each key yields `"{label} {value}"`, using the label at the same position
/// (empty if there are fewer labels than keys). Segments are joined with a
/// single space.
///
/// ```
/// use std::collections::HashMap;
/// use serde_json::json;
/// use sift::flexible_display;
///
/// let users = HashMap::from([("u1".to_string(), json!({"name": "Ada", "team": "R&D"}))]);
/// assert_eq!(
///     flexible_display(&users, "u1", &["Name:", "Team:"], &["name", "team"]),
///     "Name: Ada Team: R&D"
/// );
/// ```
pub fn flexible_display<T, L, K>(map: &HashMap<String, T>, id: &str, labels: &[L], keys: &[K]) -> String
where
    T: Seekable,
    L: AsRef<str>,
    K: AsRef<str>,
{
    let Some(record) = map.get(id) else {
        return String::new();
    };

    keys.iter()
        .enumerate()
        .map(|(i, key)| {
            let label = labels.get(i).map(|l| l.as_ref()).unwrap_or("");
            format!("{} {}", label, display_text(&get_by_path(record, key.as_ref())))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns a lookup bound to `key` that always reads the current map.
pub fn base_display_signal<T>(map: &Source<HashMap<String, T>>, key: impl Into<String>) -> impl Fn(&str) -> String
where
    T: Seekable,
{
    let map = map.clone();
    let key = key.into();
    move |id: &str| display_field(map.get().as_ref(), id, &key)
}

/// Returns a labelled lookup that always reads the current map.
pub fn flexible_display_signal<T>(
    map: &Source<HashMap<String, T>>,
    labels: Vec<String>,
    keys: Vec<String>,
) -> impl Fn(&str) -> String
where
    T: Seekable,
{
    let map = map.clone();
    move |id: &str| flexible_display(map.get().as_ref(), id, &labels, &keys)
}
