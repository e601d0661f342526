//! Property-based tests for sift using proptest.

use std::cmp::Ordering;

use proptest::prelude::*;
use serde_json::{json, Value as Json};
use sift::{
    compare_values, get_by_path, Group, Number, SearchCondition, SearchQuery, SearchState,
    Seekable, Sifter, SilentReporter, SortDirection, Value,
};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct TestItem {
    id: usize,
    value: i64,
    name: String,
    active: bool,
}

impl Seekable for TestItem {
    fn seeker_field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::from(self.id)),
            "value" => Value::Number(Number::I64(self.value)),
            "name" => Value::String(&self.name),
            "active" => Value::Bool(self.active),
            _ => Value::Missing,
        }
    }
}

// Items get their position as id so stability can be checked.
fn items_strategy(max: usize) -> impl Strategy<Value = Vec<TestItem>> {
    prop::collection::vec((-50i64..50, "[a-c]{1,4}", any::<bool>()), 0..max).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (value, name, active))| TestItem {
                id,
                value,
                name,
                active,
            })
            .collect()
    })
}

fn condition_strategy() -> impl Strategy<Value = SearchCondition> {
    let kinds = prop_oneof![
        "[a-c]{0,2}".prop_map(|q| SearchCondition::keyword("name", q)),
        any::<bool>().prop_map(|b| SearchCondition::boolean("active", b)),
        "[a-c]{1,4}".prop_map(|q| SearchCondition::exact_match("name", q)),
        "[a-c]{1,4}".prop_map(|q| SearchCondition::exact_not_match("name", q)),
        prop::collection::vec("[a-c]{1,4}", 0..4).prop_map(|s| SearchCondition::not_in_set("name", s)),
    ];
    (kinds, any::<bool>(), any::<bool>()).prop_map(|(c, or, enabled)| {
        c.in_group(if or { Group::Or } else { Group::And }).enabled(enabled)
    })
}

// Sort keys of every shape a JSON record can carry; `None` leaves the field out.
fn sort_key_strategy() -> impl Strategy<Value = Option<Json>> {
    prop_oneof![
        (-20i64..20).prop_map(|n| Some(json!(n))),
        (-20.0f64..20.0).prop_map(|f| Some(json!(f))),
        (-20i64..20).prop_map(|n| Some(json!(n.to_string()))),
        "[a-c ]{0,2}".prop_map(|s| Some(json!(s))),
        any::<bool>().prop_map(|b| Some(json!(b))),
        Just(Some(Json::Null)),
        Just(None),
    ]
}

fn sifter() -> Sifter<SilentReporter> {
    Sifter::with_reporter(SilentReporter)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Filtering never returns more items than the input.
    #[test]
    fn filter_never_grows_collection(
        items in items_strategy(60),
        conditions in prop::collection::vec(condition_strategy(), 0..5),
    ) {
        let query = SearchQuery::search().sort_asc("value");
        let query = conditions.into_iter().fold(query, |q, c| q.condition(c));

        let results = sifter().evaluate(&items, &query);
        prop_assert!(results.len() <= items.len());
        prop_assert_eq!(results.len(), sifter().count(&items, &query));
    }

    /// Idle queries and queries without enabled conditions return the input
    /// unchanged, whatever the sort settings.
    #[test]
    fn bypass_is_identity(
        items in items_strategy(40),
        conditions in prop::collection::vec(condition_strategy(), 0..5),
        state in prop_oneof![Just(SearchState::Init), Just(SearchState::Search)],
    ) {
        let mut query = SearchQuery::new().with_state(state).sort_asc("value");
        for c in conditions {
            query = query.condition(if state == SearchState::Search { c.disabled() } else { c });
        }

        let results = sifter().evaluate_cloned(&items, &query);
        prop_assert_eq!(results, items);
    }

    /// An AND-only query keeps exactly the items every condition accepts.
    #[test]
    fn and_group_is_conjunction(
        items in items_strategy(40),
        conditions in prop::collection::vec(condition_strategy(), 1..4),
    ) {
        let conditions: Vec<_> = conditions.into_iter().map(|c| c.and().enabled(true)).collect();
        let query = conditions
            .iter()
            .cloned()
            .fold(SearchQuery::search().sort_asc("id"), |q, c| q.condition(c));

        let expected: Vec<&TestItem> = items
            .iter()
            .filter(|item| conditions.iter().all(|c| c.matches(*item, &SilentReporter)))
            .collect();
        prop_assert_eq!(sifter().evaluate(&items, &query), expected);
    }

    /// OR alternatives only narrow the AND result when at least one is enabled.
    #[test]
    fn or_group_is_disjunction(
        items in items_strategy(40),
        and in condition_strategy(),
        alternatives in prop::collection::vec(condition_strategy(), 1..4),
    ) {
        let and = and.and().enabled(true);
        let query = alternatives
            .iter()
            .cloned()
            .fold(SearchQuery::search().condition(and.clone()).sort_asc("id"), |q, c| q.condition(c.or()));

        let enabled: Vec<_> = alternatives.iter().filter(|c| c.enabled).collect();
        for item in &items {
            let expected = and.matches(item, &SilentReporter)
                && (enabled.is_empty() || enabled.iter().any(|c| c.matches(item, &SilentReporter)));
            prop_assert_eq!(sifter().matches(item, &query), expected);
        }
    }

    /// Sorting is stable: equal keys keep their input order.
    #[test]
    fn sort_is_stable(
        items in items_strategy(60),
        desc in any::<bool>(),
    ) {
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        let query = SearchQuery::search()
            .and(SearchCondition::keyword("name", ""))
            .sort_by("value", direction);

        let results = sifter().evaluate(&items, &query);
        prop_assert_eq!(results.len(), items.len());
        for pair in results.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if desc {
                prop_assert!(a.value >= b.value);
            } else {
                prop_assert!(a.value <= b.value);
            }
            if a.value == b.value {
                prop_assert!(a.id < b.id);
            }
        }
    }

    /// With distinct keys, flipping the direction reverses the result.
    #[test]
    fn direction_inverts_distinct_keys(
        values in prop::collection::hash_set(any::<i64>(), 0..40),
    ) {
        let items: Vec<TestItem> = values
            .into_iter()
            .enumerate()
            .map(|(id, value)| TestItem { id, value, name: "a".into(), active: true })
            .collect();
        let asc = SearchQuery::search()
            .and(SearchCondition::boolean("active", true))
            .sort_asc("value");
        let desc = asc.clone().sort_desc("value");

        let mut forward = sifter().evaluate(&items, &asc);
        forward.reverse();
        prop_assert_eq!(forward, sifter().evaluate(&items, &desc));
    }

    /// Empty keyword text matches every record.
    #[test]
    fn empty_keyword_matches_all(items in items_strategy(40)) {
        let query = SearchQuery::search().and(SearchCondition::keyword("missing.path", ""));
        prop_assert_eq!(sifter().count(&items, &query), items.len());
    }

    /// Queries survive a JSON round trip unchanged.
    #[test]
    fn query_json_round_trip(
        conditions in prop::collection::vec(condition_strategy(), 0..5),
        key in "[a-z]{1,6}(\\.[a-z]{1,6}){0,2}",
        desc in any::<bool>(),
    ) {
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        let query = conditions
            .into_iter()
            .fold(SearchQuery::search().sort_by(key, direction), |q, c| q.condition(c));

        let back = SearchQuery::from_json(&query.to_json().unwrap()).unwrap();
        prop_assert_eq!(back, query);
    }

    /// Mixed-type sort keys still yield every kept record exactly once, and
    /// neighbours with equal keys keep their input order.
    #[test]
    fn mixed_sort_keys_yield_a_valid_sequence(
        rows in prop::collection::vec((sort_key_strategy(), any::<bool>()), 0..200),
        desc in any::<bool>(),
    ) {
        let items: Vec<Json> = rows
            .into_iter()
            .enumerate()
            .map(|(id, (ts, keep))| {
                let mut record = json!({"id": id, "keep": keep});
                if let Some(ts) = ts {
                    record["ts"] = ts;
                }
                record
            })
            .collect();
        let direction = if desc { SortDirection::Desc } else { SortDirection::Asc };
        let query = SearchQuery::search()
            .and(SearchCondition::boolean("keep", true))
            .sort_by("ts", direction);

        let results = sifter().evaluate(&items, &query);
        prop_assert_eq!(results.len(), sifter().count(&items, &query));

        for pair in results.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if compare_values(&get_by_path(a, "ts"), &get_by_path(b, "ts")) == Ordering::Equal {
                prop_assert!(a["id"].as_u64() < b["id"].as_u64());
            }
        }

        let kept: Vec<u64> = items
            .iter()
            .filter(|r| r["keep"] == true)
            .filter_map(|r| r["id"].as_u64())
            .collect();
        let mut ids: Vec<u64> = results.iter().filter_map(|r| r["id"].as_u64()).collect();
        ids.sort_unstable();
        prop_assert_eq!(ids, kept);
    }
}
