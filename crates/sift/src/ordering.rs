//! Sort direction and key-based ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coerce::compare_values;
use crate::error::SiftError;
use crate::path::get_by_path;
use crate::traits::Seekable;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Ascending order (missing values first).
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    /// Descending order (missing values last). Newest first for timestamps.
    #[default]
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortDirection {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, SortDirection::Asc)
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Returns the configuration name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(SiftError::UnknownDirection(s.to_string())),
        }
    }
}

/// Compares two records by the value at a dotted path.
pub fn compare_by_key<T>(a: &T, b: &T, key: &str, direction: SortDirection) -> Ordering
where
    T: Seekable + ?Sized,
{
    let ordering = compare_values(&get_by_path(a, key), &get_by_path(b, key));
    direction.apply(ordering)
}

/// Stable bottom-up merge sort.
///
/// Unlike `slice::sort_by`, this never panics when `compare` is not a total
/// order. Mixed-type sort keys produce such comparators. The result is then
/// some permutation of the input, and two neighbours that compare `Equal`
/// always keep their input order.
pub(crate) fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let len = items.len();
    if len < 2 {
        return;
    }

    let mut buf = items.to_vec();
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            merge(&items[start..mid], &items[mid..end], &mut buf[start..end], &mut compare);
            start = end;
        }
        items.copy_from_slice(&buf);
        width *= 2;
    }
}

// Takes from `right` only when it is strictly less than the head of `left`.
fn merge<T, F>(left: &[T], right: &[T], out: &mut [T], compare: &mut F)
where
    T: Copy,
    F: FnMut(&T, &T) -> Ordering,
{
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        let take_right = j < right.len()
            && (i >= left.len() || compare(&right[j], &left[i]) == Ordering::Less);
        if take_right {
            *slot = right[j];
            j += 1;
        } else {
            *slot = left[i];
            i += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn direction_apply() {
        assert_eq!(SortDirection::Asc.apply(Ordering::Less), Ordering::Less);
        assert_eq!(SortDirection::Asc.apply(Ordering::Equal), Ordering::Equal);
        assert_eq!(SortDirection::Desc.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Desc.apply(Ordering::Equal), Ordering::Equal);
    }

    #[test]
    fn direction_default_is_desc() {
        assert_eq!(SortDirection::default(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.reversed(), SortDirection::Asc);
    }

    #[test]
    fn direction_names() {
        assert_eq!(SortDirection::Asc.to_string(), "ASC");
        assert_eq!("desc".parse::<SortDirection>().unwrap(), SortDirection::Desc);
        assert!("sideways".parse::<SortDirection>().is_err());

        let dir: SortDirection = serde_json::from_value(json!("asc")).unwrap();
        assert_eq!(dir, SortDirection::Asc);
        assert!(serde_json::from_value::<SortDirection>(json!("UP")).is_err());
    }

    #[test]
    fn compare_records_by_key() {
        let a = json!({"meta": {"ts": 1}});
        let b = json!({"meta": {"ts": 5}});
        let none = json!({});

        assert_eq!(compare_by_key(&a, &b, "meta.ts", SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_by_key(&a, &b, "meta.ts", SortDirection::Desc), Ordering::Greater);
        // Missing sorts first ascending, last descending
        assert_eq!(compare_by_key(&none, &a, "meta.ts", SortDirection::Asc), Ordering::Less);
        assert_eq!(compare_by_key(&none, &a, "meta.ts", SortDirection::Desc), Ordering::Greater);
    }

    #[test]
    fn merge_sort_is_stable() {
        let mut pairs = vec![(3, 'a'), (1, 'b'), (3, 'c'), (2, 'd'), (1, 'e')];
        stable_sort_by(&mut pairs, |x, y| x.0.cmp(&y.0));
        assert_eq!(pairs, vec![(1, 'b'), (1, 'e'), (2, 'd'), (3, 'a'), (3, 'c')]);

        let mut empty: Vec<u8> = Vec::new();
        stable_sort_by(&mut empty, |x, y| x.cmp(y));
        assert!(empty.is_empty());
    }

    #[test]
    fn merge_sort_survives_inconsistent_comparators() {
        let mut items: Vec<u32> = (0..500).collect();
        // Not a total order: answers depend only on parity.
        stable_sort_by(&mut items, |a, b| {
            if (a + b) % 2 == 0 {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        });
        let mut seen = items.clone();
        seen.sort_unstable();
        assert_eq!(seen, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn mixed_type_keys_sort_without_panicking() {
        let records: Vec<_> = (0..300i64)
            .map(|i| match i % 6 {
                0 => json!({"ts": i as f64 + 0.5}),
                1 => json!({"ts": i.to_string()}),
                2 => json!({"ts": format!("-{i}")}),
                3 => json!({"ts": null}),
                4 => json!({"ts": format!("w{i}")}),
                _ => json!({"ts": i}),
            })
            .collect();
        let mut refs: Vec<&serde_json::Value> = records.iter().collect();

        stable_sort_by(&mut refs, |a, b| compare_by_key(*a, *b, "ts", SortDirection::Desc));
        assert_eq!(refs.len(), records.len());
    }
}
