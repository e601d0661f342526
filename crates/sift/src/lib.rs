//! Sift - Declarative filtering and sorting for in-memory record lists.
//!
//! Sift takes a list of loosely typed records and a declarative query (a set
//! of conditions plus sort settings) and produces the filtered, sorted view.
//! It supports:
//!
//! - Any record shape through the [`Seekable`] trait (`serde_json::Value`
//!   and the built-in [`Record`] work out of the box)
//! - Dotted field paths into nested records
//! - Five condition kinds: keyword, boolean, exact match, exact not-match,
//!   and set exclusion
//! - AND/OR condition groups with fixed combination semantics
//! - Stable single-key sorting with a type-aware comparator
//! - A memoized reactive output that recomputes only when its inputs change
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sift::{flexible_search, SearchCondition, SearchQuery, Source};
//!
//! let list = Source::new(vec![
//!     json!({"id": "x", "name": "Write docs", "timestamps": 1}),
//!     json!({"id": "y", "name": "Fix docs bug", "timestamps": 3}),
//!     json!({"id": "z", "name": "Release", "timestamps": 2}),
//! ]);
//! let query = Source::new(SearchQuery::new());
//! let results = flexible_search(&list, &query);
//!
//! // Idle queries pass the list through
//! assert_eq!(results.get().len(), 3);
//!
//! query.set(
//!     SearchQuery::search()
//!         .and(SearchCondition::keyword("name", "DOCS"))
//!         .build(),
//! );
//!
//! let ids: Vec<_> = results.get().iter().map(|r| r["id"].clone()).collect();
//! assert_eq!(ids, vec![json!("y"), json!("x")]);
//! ```
//!
//! # Query Semantics
//!
//! Only enabled conditions take part. They combine with fixed logic:
//!
//! ```text
//! match = (all AND conditions match)
//!       ∧ (at least one OR condition matches, OR no OR conditions exist)
//! ```
//!
//! When the query state is not `Search`, or no condition is enabled, the
//! list is returned unchanged and unsorted.
//!
//! # Condition Kinds
//!
//! | Kind | Matches when | On a type mismatch |
//! |------|--------------|--------------------|
//! | `keyword` | record text contains query text, case-insensitively | compares text forms |
//! | `boolean` | both sides read as the same boolean | no match |
//! | `exactMatch` | both strings are identical | no match |
//! | `exactNotMatch` | both strings differ | match |
//! | `notInSet` | record string is absent from the set | match |
//!
//! Type mismatches never fail evaluation. They are sent to a [`Reporter`];
//! the default one logs them through `tracing`.

mod coerce;
mod condition;
mod display;
mod engine;
mod error;
mod matcher;
mod ordering;
mod path;
mod query;
mod record;
mod report;
mod signal;
mod traits;
mod value;

// Re-export public API
pub use coerce::{compare_values, display_text, to_comparable_text, to_tri_state_bool};
pub use condition::{Group, SearchCondition};
pub use display::{base_display_signal, display_field, flexible_display, flexible_display_signal};
pub use engine::{evaluate, Sifter};
pub use error::{Result, SiftError};
pub use matcher::ConditionKind;
pub use ordering::{compare_by_key, SortDirection};
pub use path::get_by_path;
pub use query::{SearchQuery, SearchState, DEFAULT_SORT_KEY};
pub use record::{Field, Record};
pub use report::{Anomaly, MemoryReporter, Reporter, SilentReporter, TracingReporter};
pub use signal::{flexible_search, SearchSignal, Source};
pub use traits::Seekable;
pub use value::{Number, Operand, Value};
