//! Search query configuration.
//!
//! A [`SearchQuery`] holds everything the engine needs besides the records:
//! the state switch, the conditions, and the sort settings. It can be built
//! fluently or loaded from a JSON document.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::condition::{Group, SearchCondition};
use crate::error::{Result, SiftError};
use crate::ordering::SortDirection;

/// Sort key used when a query does not name one.
pub const DEFAULT_SORT_KEY: &str = "timestamps";

/// Whether the engine should filter at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchState {
    /// Pass the list through untouched.
    #[default]
    #[serde(alias = "INIT")]
    Init,
    /// Filter and sort.
    #[serde(alias = "SEARCH")]
    Search,
}

impl SearchState {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchState::Init => "init",
            SearchState::Search => "search",
        }
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchState {
    type Err = SiftError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "init" => Ok(SearchState::Init),
            "search" => Ok(SearchState::Search),
            _ => Err(SiftError::UnknownState(s.to_string())),
        }
    }
}

/// A complete search configuration.
///
/// A record passes when
/// ```text
/// (all enabled AND conditions match)
///   ∧ (at least one enabled OR condition matches, OR no enabled OR conditions exist)
/// ```
/// and the result is sorted by `sort_key` in `sort_direction`. When the
/// state is `Init` or no condition is enabled, the list is returned as is.
///
/// # Example
///
/// ```
/// use sift::{SearchCondition, SearchQuery};
///
/// let query = SearchQuery::search()
///     .condition(SearchCondition::keyword("name", "apple"))
///     .or(SearchCondition::boolean("active", true))
///     .or(SearchCondition::exact_match("tier", "gold"))
///     .sort_asc("name")
///     .build();
///
/// assert_eq!(query.and_conditions().count(), 1);
/// assert_eq!(query.or_conditions().count(), 2);
///
/// let loaded = SearchQuery::from_json(
///     r#"{"state": "search", "conditions": [{"type": "keyword", "key": "name", "value": "apple"}]}"#,
/// ).unwrap();
/// assert_eq!(loaded.sort_key, "timestamps");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// `Search` to filter; anything else passes the list through.
    #[serde(default)]
    pub state: SearchState,
    /// Conditions in no particular order.
    #[serde(default, alias = "optionList")]
    pub conditions: Vec<SearchCondition>,
    /// Dotted path of the sort field.
    #[serde(default = "default_sort_key")]
    pub sort_key: String,
    #[serde(default, alias = "sortOrder")]
    pub sort_direction: SortDirection,
}

fn default_sort_key() -> String {
    DEFAULT_SORT_KEY.to_string()
}

impl Default for SearchQuery {
    fn default() -> Self {
        SearchQuery {
            state: SearchState::Init,
            conditions: Vec::new(),
            sort_key: default_sort_key(),
            sort_direction: SortDirection::Desc,
        }
    }
}

/// Enabled conditions split by group, borrowed from a query.
#[derive(Debug)]
pub(crate) struct Plan<'q> {
    pub(crate) and: Vec<&'q SearchCondition>,
    pub(crate) or: Vec<&'q SearchCondition>,
}

impl SearchQuery {
    /// Creates an idle query (state `Init`), which passes lists through.
    pub fn new() -> Self {
        SearchQuery::default()
    }

    /// Creates an empty query in the `Search` state.
    pub fn search() -> Self {
        SearchQuery::default().with_state(SearchState::Search)
    }

    // ========================================================================
    // Configuration loading
    // ========================================================================

    /// Reads a query from a JSON document.
    ///
    /// Unknown condition types load as
    /// [`ConditionKind::Unsupported`](crate::ConditionKind::Unsupported);
    /// unknown states, groups, or directions are rejected.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads a query from an already parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the query to a JSON document.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn with_state(mut self, state: SearchState) -> Self {
        self.state = state;
        self
    }

    /// Adds a condition, keeping its group.
    pub fn condition(mut self, condition: SearchCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds a condition to the AND group.
    pub fn and(self, condition: SearchCondition) -> Self {
        self.condition(condition.in_group(Group::And))
    }

    /// Adds a condition to the OR group.
    pub fn or(self, condition: SearchCondition) -> Self {
        self.condition(condition.in_group(Group::Or))
    }

    /// Sets the sort key and direction.
    pub fn sort_by(mut self, key: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_key = key.into();
        self.sort_direction = direction;
        self
    }

    pub fn sort_asc(self, key: impl Into<String>) -> Self {
        self.sort_by(key, SortDirection::Asc)
    }

    pub fn sort_desc(self, key: impl Into<String>) -> Self {
        self.sort_by(key, SortDirection::Desc)
    }

    /// Finalizes the query.
    pub fn build(self) -> Self {
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Conditions that take part in filtering.
    pub fn enabled_conditions(&self) -> impl Iterator<Item = &SearchCondition> {
        self.conditions.iter().filter(|c| c.enabled)
    }

    /// Enabled conditions in the AND group.
    pub fn and_conditions(&self) -> impl Iterator<Item = &SearchCondition> {
        self.enabled_conditions().filter(|c| c.group == Group::And)
    }

    /// Enabled conditions in the OR group.
    pub fn or_conditions(&self) -> impl Iterator<Item = &SearchCondition> {
        self.enabled_conditions().filter(|c| c.group == Group::Or)
    }

    /// Returns `true` when evaluation returns the input untouched.
    pub fn is_bypass(&self) -> bool {
        self.state != SearchState::Search || self.enabled_conditions().next().is_none()
    }

    /// Splits enabled conditions by group, or `None` on the bypass path.
    pub(crate) fn plan(&self) -> Option<Plan<'_>> {
        if self.is_bypass() {
            return None;
        }
        let (and, or) = self
            .enabled_conditions()
            .partition(|c| c.group == Group::And);
        Some(Plan { and, or })
    }
}
