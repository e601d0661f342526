//! Search conditions.
//!
//! A [`SearchCondition`] is one filter rule: which field to look at (a
//! dotted path), which matcher to apply, the operand, whether the rule is
//! active, and which group (AND/OR) it votes in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SiftError;
use crate::matcher::ConditionKind;
use crate::path::get_by_path;
use crate::report::{Anomaly, Reporter};
use crate::traits::Seekable;
use crate::value::Operand;

/// The group a condition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Group {
    /// Every AND condition must match.
    #[default]
    #[serde(rename = "AND", alias = "and")]
    And,
    /// At least one OR condition must match, if there are any.
    #[serde(rename = "OR", alias = "or")]
    Or,
}

impl Group {
    pub fn as_str(self) -> &'static str {
        match self {
            Group::And => "AND",
            Group::Or => "OR",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Group {
    type Err = SiftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AND" => Ok(Group::And),
            "OR" => Ok(Group::Or),
            _ => Err(SiftError::UnknownGroup(s.to_string())),
        }
    }
}

/// A single filter rule.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sift::{SearchCondition, SilentReporter};
///
/// let cond = SearchCondition::keyword("name", "apple");
/// assert!(cond.matches(&json!({"name": "Apple Pie"}), &SilentReporter));
///
/// let cond = SearchCondition::not_in_set("id", ["b"]).or();
/// assert!(!cond.matches(&json!({"id": "b"}), &SilentReporter));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCondition {
    /// Disabled conditions are ignored entirely.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Which matcher to apply.
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    /// Dotted field path into the record.
    pub key: String,
    /// The comparison operand.
    #[serde(default)]
    pub value: Operand,
    /// AND or OR group.
    #[serde(default, alias = "mold")]
    pub group: Group,
}

fn enabled_by_default() -> bool {
    true
}

impl SearchCondition {
    /// Creates an enabled AND condition.
    pub fn new(kind: ConditionKind, key: impl Into<String>, value: impl Into<Operand>) -> Self {
        SearchCondition {
            enabled: true,
            kind,
            key: key.into(),
            value: value.into(),
            group: Group::And,
        }
    }

    // ========================================================================
    // Per-kind constructors
    // ========================================================================

    /// Case-insensitive substring condition.
    pub fn keyword(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ConditionKind::Keyword, key, Operand::Text(text.into()))
    }

    /// Boolean equality condition. The operand may be a bool, `1`/`0`, or
    /// one of the strings `"true"`, `"false"`, `"1"`, `"0"`.
    pub fn boolean(key: impl Into<String>, value: impl Into<Operand>) -> Self {
        Self::new(ConditionKind::Boolean, key, value)
    }

    /// Exact string equality condition.
    pub fn exact_match(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ConditionKind::ExactMatch, key, Operand::Text(text.into()))
    }

    /// Exact string inequality condition.
    pub fn exact_not_match(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(ConditionKind::ExactNotMatch, key, Operand::Text(text.into()))
    }

    /// Set-exclusion condition.
    pub fn not_in_set<I, S>(key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ConditionKind::NotInSet, key, Operand::set(items))
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Moves the condition to the OR group.
    pub fn or(self) -> Self {
        self.in_group(Group::Or)
    }

    /// Moves the condition to the AND group.
    pub fn and(self) -> Self {
        self.in_group(Group::And)
    }

    pub fn in_group(mut self, group: Group) -> Self {
        self.group = group;
        self
    }

    /// Marks the condition inactive.
    pub fn disabled(self) -> Self {
        self.enabled(false)
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    // ========================================================================
    // Evaluation
    // ========================================================================

    /// Tests this condition against a record, ignoring `enabled`.
    ///
    /// The field at `key` is resolved first; an unresolvable path is a
    /// missing value, which each matcher handles in its own way.
    pub fn matches<T>(&self, record: &T, reporter: &dyn Reporter) -> bool
    where
        T: Seekable + ?Sized,
    {
        if self.kind == ConditionKind::Unsupported {
            reporter.report(Anomaly::Unsupported {
                key: Some(self.key.clone()),
            });
            return false;
        }
        self.kind.matches(&get_by_path(record, &self.key), &self.value, reporter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MemoryReporter;
    use serde_json::json;

    #[test]
    fn constructors_set_kind_and_group() {
        let c = SearchCondition::keyword("name", "a");
        assert_eq!(c.kind, ConditionKind::Keyword);
        assert_eq!(c.group, Group::And);
        assert!(c.enabled);

        let c = SearchCondition::exact_match("id", "x").or().disabled();
        assert_eq!(c.kind, ConditionKind::ExactMatch);
        assert_eq!(c.group, Group::Or);
        assert!(!c.enabled);
    }

    #[test]
    fn matches_resolves_dotted_paths() {
        let r = MemoryReporter::new();
        let record = json!({"user": {"name": "Ada Lovelace"}});
        assert!(SearchCondition::keyword("user.name", "love").matches(&record, &r));
        assert!(!SearchCondition::keyword("user.email", "love").matches(&record, &r));
    }

    #[test]
    fn unsupported_kind_reports_and_fails() {
        let r = MemoryReporter::new();
        let cond = SearchCondition::new(ConditionKind::Unsupported, "name", "x");
        assert!(!cond.matches(&json!({"name": "x"}), &r));
        assert_eq!(
            r.take(),
            vec![Anomaly::Unsupported {
                key: Some("name".into())
            }]
        );
    }

    #[test]
    fn deserialize_with_defaults() {
        let cond: SearchCondition =
            serde_json::from_value(json!({"type": "keyword", "key": "name", "value": "apple"}))
                .unwrap();
        assert!(cond.enabled);
        assert_eq!(cond.group, Group::And);
        assert_eq!(cond.value, Operand::Text("apple".into()));
    }

    #[test]
    fn deserialize_legacy_names() {
        let cond: SearchCondition = serde_json::from_value(json!({
            "enabled": false,
            "type": "exactNotMatchString",
            "key": "status",
            "value": "done",
            "mold": "OR"
        }))
        .unwrap();
        assert_eq!(cond.kind, ConditionKind::ExactNotMatch);
        assert_eq!(cond.group, Group::Or);
        assert!(!cond.enabled);
    }

    #[test]
    fn deserialize_array_operand_as_set() {
        let cond: SearchCondition = serde_json::from_value(json!({
            "type": "notInSet", "key": "id", "value": ["a", "b"]
        }))
        .unwrap();
        assert_eq!(cond.value, Operand::set(["a", "b"]));
    }

    #[test]
    fn group_rejects_unknown_names() {
        assert!(serde_json::from_value::<Group>(json!("XOR")).is_err());
        assert!("xor".parse::<Group>().is_err());
        assert_eq!("or".parse::<Group>().unwrap(), Group::Or);
        assert_eq!(Group::And.to_string(), "AND");
    }
}
