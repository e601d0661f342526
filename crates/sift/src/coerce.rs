//! Safe conversions between runtime values.
//!
//! None of these functions fail. Values that cannot be converted fall back
//! to a neutral result and, where the fallback loses information, an
//! [`Anomaly`] goes to the reporter.

use std::cmp::Ordering;

use crate::report::{Anomaly, Reporter};
use crate::value::{Number, Value};

/// Lower-cased, trimmed text used for keyword matching.
///
/// - `Missing`/`Null` → `""` (reported)
/// - nodes and sets → compact JSON (reported); `""` if they cannot be
///   serialized
/// - everything else → its display text
pub fn to_comparable_text(value: &Value<'_>, reporter: &dyn Reporter) -> String {
    match value {
        Value::Missing | Value::Null => {
            reporter.report(Anomaly::MissingText);
            String::new()
        }
        Value::Node(_) | Value::Set(_) => {
            let text = structural_text(value).unwrap_or_default();
            reporter.report(Anomaly::StructuredText {
                value: text.clone(),
            });
            text.trim().to_lowercase()
        }
        other => display_text(other).trim().to_lowercase(),
    }
}

/// Reads a value as a boolean.
///
/// Accepts booleans, the numbers `1`/`0`, and the strings `"true"`, `"1"`,
/// `"false"`, `"0"` in any case with surrounding whitespace. Returns `None`
/// (reported) for anything else, including numeric input other than 1/0.
pub fn to_tri_state_bool(value: &Value<'_>, reporter: &dyn Reporter) -> Option<bool> {
    let parsed = match value {
        Value::Bool(b) => return Some(*b),
        Value::Number(n) => match n.to_f64() {
            x if x == 1.0 => Some(true),
            x if x == 0.0 => Some(false),
            _ => None,
        },
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };

    // Numbers are reported even when they parse.
    if parsed.is_none() || value.is_number() {
        reporter.report(Anomaly::NotBoolean {
            value: format!("{value:?}"),
        });
    }
    parsed
}

/// Case-preserving text form of a value.
///
/// Missing and null render as the empty string; nodes and sets as compact
/// JSON.
pub fn display_text(value: &Value<'_>) -> String {
    match value {
        Value::Missing | Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => (*s).to_string(),
        Value::Node(_) | Value::Set(_) => structural_text(value).unwrap_or_default(),
    }
}

fn structural_text(value: &Value<'_>) -> Option<String> {
    match value {
        Value::Node(node) => node.seeker_text(),
        Value::Set(set) => serde_json::to_string(set).ok(),
        _ => None,
    }
}

/// Canonical ordering used for sorting.
///
/// 1. If either side is a number, both sides are read as numbers. Anything
///    that does not produce a finite number counts as missing; missing sorts
///    before present.
/// 2. Two strings compare lexicographically.
/// 3. Otherwise missing/null sorts first, then display texts are compared.
///
/// ```
/// use std::cmp::Ordering;
/// use sift::{compare_values, Number, Value};
///
/// let five = Value::Number(Number::I64(5));
/// assert_eq!(compare_values(&Value::String("10"), &five), Ordering::Greater);
/// assert_eq!(compare_values(&Value::Missing, &five), Ordering::Less);
/// ```
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    if a.is_number() || b.is_number() {
        return match (to_finite(a), to_finite(b)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        };
    }

    if let (Value::String(x), Value::String(y)) = (a, b) {
        return x.cmp(y);
    }

    match (a.is_absent(), b.is_absent()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => display_text(a).cmp(&display_text(b)),
    }
}

/// Numeric reading of a value, `None` when it is not a finite number.
fn to_finite(value: &Value<'_>) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.to_f64(),
        Value::String(s) => parse_number(s),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Missing | Value::Set(_) | Value::Node(_) => f64::NAN,
    };
    n.is_finite().then_some(n)
}

/// Blank strings read as zero; otherwise the trimmed text must be a
/// complete decimal number.
fn parse_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}
