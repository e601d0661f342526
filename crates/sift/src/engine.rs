//! The filter/sort engine.
//!
//! [`Sifter`] evaluates a [`SearchQuery`] against a slice of records. It
//! holds nothing but the [`Reporter`] that anomalies go to, so one sifter
//! can serve any number of lists and queries.

use crate::condition::SearchCondition;
use crate::ordering::{compare_by_key, stable_sort_by};
use crate::query::{Plan, SearchQuery};
use crate::report::{Reporter, TracingReporter};
use crate::traits::Seekable;

/// Stateless query evaluator.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sift::{MemoryReporter, SearchCondition, SearchQuery, Sifter};
///
/// let items = vec![
///     json!({"name": "Apple", "active": true, "timestamps": 2}),
///     json!({"name": "apple pie", "active": false, "timestamps": 3}),
///     json!({"name": "Pear", "active": true, "timestamps": 1}),
/// ];
///
/// let query = SearchQuery::search()
///     .and(SearchCondition::keyword("name", "apple"))
///     .build();
///
/// let reporter = MemoryReporter::new();
/// let sifter = Sifter::with_reporter(&reporter);
/// let results = sifter.evaluate(&items, &query);
///
/// // Newest first by default
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0]["name"], "apple pie");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sifter<R = TracingReporter> {
    reporter: R,
}

impl Sifter {
    /// Creates a sifter that reports anomalies through `tracing`.
    pub fn new() -> Self {
        Sifter::default()
    }
}

impl<R: Reporter> Sifter<R> {
    /// Creates a sifter with a custom anomaly sink.
    pub fn with_reporter(reporter: R) -> Self {
        Sifter { reporter }
    }

    /// Returns the anomaly sink.
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Filters and sorts `items`, returning references in result order.
    ///
    /// On the bypass path (state is not `Search`, or no condition is
    /// enabled) every item is returned in its original order, unsorted.
    /// Otherwise matching items are sorted stably by the query's sort key;
    /// ties keep their input order.
    pub fn evaluate<'a, T>(&self, items: &'a [T], query: &SearchQuery) -> Vec<&'a T>
    where
        T: Seekable,
    {
        let Some(plan) = query.plan() else {
            return items.iter().collect();
        };

        let mut results: Vec<&'a T> = items
            .iter()
            .filter(|item| self.passes(*item, &plan))
            .collect();

        stable_sort_by(&mut results, |a, b| {
            compare_by_key(*a, *b, &query.sort_key, query.sort_direction)
        });
        results
    }

    /// Filters and sorts, cloning the results.
    pub fn evaluate_cloned<T>(&self, items: &[T], query: &SearchQuery) -> Vec<T>
    where
        T: Seekable + Clone,
    {
        self.evaluate(items, query).into_iter().cloned().collect()
    }

    /// Tests whether one record would be kept. Always `true` on the bypass
    /// path.
    pub fn matches<T>(&self, item: &T, query: &SearchQuery) -> bool
    where
        T: Seekable + ?Sized,
    {
        match query.plan() {
            Some(plan) => self.passes(item, &plan),
            None => true,
        }
    }

    /// Counts the records that would be kept.
    pub fn count<T>(&self, items: &[T], query: &SearchQuery) -> usize
    where
        T: Seekable,
    {
        match query.plan() {
            Some(plan) => items.iter().filter(|item| self.passes(*item, &plan)).count(),
            None => items.len(),
        }
    }

    fn passes<T>(&self, item: &T, plan: &Plan<'_>) -> bool
    where
        T: Seekable + ?Sized,
    {
        // All AND conditions must match
        let and_pass = plan.and.iter().all(|c| self.check(item, c));
        if !and_pass {
            return false;
        }

        // At least one OR condition must match (or none exist)
        plan.or.is_empty() || plan.or.iter().any(|c| self.check(item, c))
    }

    fn check<T>(&self, item: &T, condition: &SearchCondition) -> bool
    where
        T: Seekable + ?Sized,
    {
        condition.matches(item, &self.reporter)
    }
}

/// Evaluates a query with the default `tracing` reporter.
pub fn evaluate<'a, T>(items: &'a [T], query: &SearchQuery) -> Vec<&'a T>
where
    T: Seekable,
{
    Sifter::new().evaluate(items, query)
}
