//! Reactive inputs and the memoized search output.
//!
//! A [`Source`] is a shared input cell with a version counter. A
//! [`SearchSignal`] derives the filtered list from a source of records and a
//! source of queries, recomputing only when one of their versions moved.
//!
//! ```
//! use serde_json::json;
//! use sift::{flexible_search, SearchCondition, SearchQuery, Source};
//!
//! let list = Source::new(vec![json!({"id": "a"}), json!({"id": "b"})]);
//! let query = Source::new(SearchQuery::new());
//! let results = flexible_search(&list, &query);
//!
//! assert_eq!(results.get().len(), 2);
//!
//! query.set(SearchQuery::search().and(SearchCondition::not_in_set("id", ["b"])));
//! assert_eq!(results.get().len(), 1);
//! ```

use std::cell::{Cell, Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::engine::Sifter;
use crate::query::SearchQuery;
use crate::report::{Reporter, TracingReporter};
use crate::traits::Seekable;

struct Slot<T> {
    value: RefCell<Rc<T>>,
    version: Cell<u64>,
}

/// A shared, versioned input value.
///
/// Clones share the same slot: a `set` through one clone is visible through
/// all of them. Every write bumps the version.
pub struct Source<T> {
    slot: Rc<Slot<T>>,
}

impl<T> Source<T> {
    pub fn new(value: T) -> Self {
        Source {
            slot: Rc::new(Slot {
                value: RefCell::new(Rc::new(value)),
                version: Cell::new(0),
            }),
        }
    }

    /// Returns the current value.
    pub fn get(&self) -> Rc<T> {
        Rc::clone(&self.slot.value.borrow())
    }

    /// Borrows the current value without cloning the handle.
    pub fn borrow(&self) -> Ref<'_, Rc<T>> {
        self.slot.value.borrow()
    }

    /// Replaces the value.
    pub fn set(&self, value: T) {
        *self.slot.value.borrow_mut() = Rc::new(value);
        self.bump();
    }

    /// Mutates the value in place, copying it first if a reader still holds
    /// the previous value.
    pub fn update<F>(&self, f: F)
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        {
            let mut current = self.slot.value.borrow_mut();
            f(Rc::make_mut(&mut current));
        }
        self.bump();
    }

    /// Number of writes so far.
    pub fn version(&self) -> u64 {
        self.slot.version.get()
    }

    fn bump(&self) {
        self.slot.version.set(self.slot.version.get() + 1);
    }
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Source {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("value", &self.slot.value.borrow())
            .field("version", &self.version())
            .finish()
    }
}

struct Memo<T> {
    list_version: u64,
    query_version: u64,
    output: Rc<Vec<T>>,
}

/// The filtered, sorted view of a record source under a query source.
///
/// Reading with [`get`](SearchSignal::get) returns the memoized output as
/// long as neither input has been written since the last computation. On
/// the bypass path the output is the input list itself, shared.
pub struct SearchSignal<T, R = TracingReporter> {
    list: Source<Vec<T>>,
    query: Source<SearchQuery>,
    sifter: Sifter<R>,
    memo: RefCell<Option<Memo<T>>>,
    recomputations: Cell<u64>,
}

impl<T> SearchSignal<T>
where
    T: Seekable + Clone,
{
    /// Derives a signal that reports anomalies through `tracing`.
    pub fn new(list: &Source<Vec<T>>, query: &Source<SearchQuery>) -> Self {
        SearchSignal::with_sifter(list, query, Sifter::new())
    }
}

impl<T, R> SearchSignal<T, R>
where
    T: Seekable + Clone,
    R: Reporter,
{
    /// Derives a signal evaluated by the given sifter.
    pub fn with_sifter(list: &Source<Vec<T>>, query: &Source<SearchQuery>, sifter: Sifter<R>) -> Self {
        SearchSignal {
            list: list.clone(),
            query: query.clone(),
            sifter,
            memo: RefCell::new(None),
            recomputations: Cell::new(0),
        }
    }

    /// Returns the current result, recomputing it first if an input changed.
    pub fn get(&self) -> Rc<Vec<T>> {
        let list_version = self.list.version();
        let query_version = self.query.version();

        if let Some(memo) = self.memo.borrow().as_ref() {
            if memo.list_version == list_version && memo.query_version == query_version {
                return Rc::clone(&memo.output);
            }
        }

        let output = self.compute();
        *self.memo.borrow_mut() = Some(Memo {
            list_version,
            query_version,
            output: Rc::clone(&output),
        });
        output
    }

    /// Returns `true` if the next [`get`](SearchSignal::get) would recompute.
    pub fn is_stale(&self) -> bool {
        match self.memo.borrow().as_ref() {
            Some(memo) => {
                memo.list_version != self.list.version() || memo.query_version != self.query.version()
            }
            None => true,
        }
    }

    /// How many times the output has been computed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations.get()
    }

    /// The sifter evaluating this signal.
    pub fn sifter(&self) -> &Sifter<R> {
        &self.sifter
    }

    fn compute(&self) -> Rc<Vec<T>> {
        self.recomputations.set(self.recomputations.get() + 1);
        let list = self.list.get();
        let query = self.query.get();

        if query.is_bypass() {
            return list;
        }
        Rc::new(self.sifter.evaluate_cloned(&list, &query))
    }
}

/// Derives the filtered, sorted view of `list` under `query`.
pub fn flexible_search<T>(list: &Source<Vec<T>>, query: &Source<SearchQuery>) -> SearchSignal<T>
where
    T: Seekable + Clone,
{
    SearchSignal::new(list, query)
}
