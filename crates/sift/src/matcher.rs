//! The matcher registry.
//!
//! [`ConditionKind`] names every supported condition type and
//! [`ConditionKind::matches`] dispatches to the matching predicate. Each
//! predicate takes the record's value and the condition's operand and never
//! fails: malformed input falls back to a fixed default.
//!
//! | Kind | Type mismatch |
//! |------|---------------|
//! | `keyword` | coerced to text |
//! | `boolean` | no match |
//! | `exactMatch` | no match |
//! | `exactNotMatch` | match |
//! | `notInSet` | match |
//! | unsupported | no match |
//!
//! Inclusion filters fail closed; exclusion filters fail open.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::coerce::{to_comparable_text, to_tri_state_bool};
use crate::error::SiftError;
use crate::report::{Anomaly, Reporter};
use crate::value::{Operand, Value};

/// Condition type, selecting the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConditionKind {
    /// Case-insensitive substring match.
    Keyword,
    /// Boolean equality over boolean-like values.
    Boolean,
    /// Exact, case- and whitespace-sensitive string equality.
    #[serde(alias = "exactMatchString")]
    ExactMatch,
    /// Exact string inequality.
    #[serde(alias = "exactNotMatchString")]
    ExactNotMatch,
    /// Record value is not a member of the operand set.
    NotInSet,
    /// Unknown type tag read from configuration. Never matches.
    #[serde(other)]
    Unsupported,
}

impl ConditionKind {
    /// All kinds with a real matcher.
    pub const SUPPORTED: [ConditionKind; 5] = [
        ConditionKind::Keyword,
        ConditionKind::Boolean,
        ConditionKind::ExactMatch,
        ConditionKind::ExactNotMatch,
        ConditionKind::NotInSet,
    ];

    /// Evaluates this kind's matcher.
    pub fn matches(self, record: &Value<'_>, operand: &Operand, reporter: &dyn Reporter) -> bool {
        match self {
            ConditionKind::Keyword => keyword(record, operand, reporter),
            ConditionKind::Boolean => boolean(record, operand, reporter),
            ConditionKind::ExactMatch => exact_match(record, operand, reporter),
            ConditionKind::ExactNotMatch => exact_not_match(record, operand, reporter),
            ConditionKind::NotInSet => not_in_set(record, operand, reporter),
            ConditionKind::Unsupported => {
                reporter.report(Anomaly::Unsupported { key: None });
                false
            }
        }
    }

    /// Returns the configuration name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionKind::Keyword => "keyword",
            ConditionKind::Boolean => "boolean",
            ConditionKind::ExactMatch => "exactMatch",
            ConditionKind::ExactNotMatch => "exactNotMatch",
            ConditionKind::NotInSet => "notInSet",
            ConditionKind::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConditionKind {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyword" => Ok(ConditionKind::Keyword),
            "boolean" => Ok(ConditionKind::Boolean),
            "exactmatch" | "exactmatchstring" => Ok(ConditionKind::ExactMatch),
            "exactnotmatch" | "exactnotmatchstring" => Ok(ConditionKind::ExactNotMatch),
            "notinset" => Ok(ConditionKind::NotInSet),
            _ => Err(SiftError::UnknownKind(s.to_string())),
        }
    }
}

/// Empty query text matches everything.
fn keyword(record: &Value<'_>, operand: &Operand, reporter: &dyn Reporter) -> bool {
    let query = to_comparable_text(&operand.as_value(), reporter);
    if query.is_empty() {
        return true;
    }
    to_comparable_text(record, reporter).contains(&query)
}

fn boolean(record: &Value<'_>, operand: &Operand, reporter: &dyn Reporter) -> bool {
    let left = to_tri_state_bool(record, reporter);
    let right = to_tri_state_bool(&operand.as_value(), reporter);
    matches!((left, right), (Some(l), Some(r)) if l == r)
}

fn exact_match(record: &Value<'_>, operand: &Operand, reporter: &dyn Reporter) -> bool {
    match (record, operand) {
        (Value::String(r), Operand::Text(q)) => *r == q.as_str(),
        _ => {
            reporter.report(Anomaly::not_string(
                ConditionKind::ExactMatch,
                record,
                &operand.as_value(),
            ));
            false
        }
    }
}

fn exact_not_match(record: &Value<'_>, operand: &Operand, reporter: &dyn Reporter) -> bool {
    match (record, operand) {
        (Value::String(r), Operand::Text(q)) => *r != q.as_str(),
        _ => {
            reporter.report(Anomaly::not_string(
                ConditionKind::ExactNotMatch,
                record,
                &operand.as_value(),
            ));
            true
        }
    }
}

fn not_in_set(record: &Value<'_>, operand: &Operand, reporter: &dyn Reporter) -> bool {
    let Operand::Set(set) = operand else {
        reporter.report(Anomaly::NotASet {
            operand: format!("{:?}", operand.as_value()),
        });
        return true;
    };
    let Value::String(member) = record else {
        reporter.report(Anomaly::NotAStringMember {
            record: format!("{record:?}"),
        });
        return true;
    };
    !set.contains(*member)
}
