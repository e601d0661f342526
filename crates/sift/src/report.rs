//! Anomaly reporting.
//!
//! Evaluation never fails on malformed data. Every coercion or matcher that
//! has to fall back to a default reports an [`Anomaly`] to the [`Reporter`]
//! injected into the [`Sifter`](crate::Sifter), so callers and tests can see
//! what was absorbed.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::matcher::ConditionKind;
use crate::value::Value;

/// Something the engine had to absorb while evaluating a query.
#[derive(Debug, Clone, PartialEq)]
pub enum Anomaly {
    /// A missing or null value was converted to empty text.
    MissingText,
    /// A nested mapping, list, or set was serialized to text.
    StructuredText { value: String },
    /// A value could not be read as a boolean.
    NotBoolean { value: String },
    /// An exact matcher received a non-string on either side.
    NotString {
        kind: ConditionKind,
        record: String,
        record_type: &'static str,
        operand: String,
        operand_type: &'static str,
    },
    /// A `notInSet` condition carried something other than a set.
    NotASet { operand: String },
    /// A `notInSet` condition met a record value that is not a string.
    NotAStringMember { record: String },
    /// A condition with an unrecognized type tag. The key is known when the
    /// report comes from a [`SearchCondition`](crate::SearchCondition).
    Unsupported { key: Option<String> },
}

impl Anomaly {
    pub(crate) fn not_string(kind: ConditionKind, record: &Value<'_>, operand: &Value<'_>) -> Self {
        Anomaly::NotString {
            kind,
            record: format!("{record:?}"),
            record_type: record.type_name(),
            operand: format!("{operand:?}"),
            operand_type: operand.type_name(),
        }
    }
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Anomaly::MissingText => write!(f, "value is missing or null"),
            Anomaly::StructuredText { value } => write!(f, "value is structured: {value}"),
            Anomaly::NotBoolean { value } => write!(f, "value is not boolean: {value}"),
            Anomaly::NotString {
                kind,
                record,
                record_type,
                operand,
                operand_type,
            } => write!(
                f,
                "[{kind}] value is not string: record {record} ({record_type}), operand {operand} ({operand_type})"
            ),
            Anomaly::NotASet { operand } => write!(f, "[notInSet] operand is not a set: {operand}"),
            Anomaly::NotAStringMember { record } => {
                write!(f, "[notInSet] record value is not a string: {record}")
            }
            Anomaly::Unsupported { key: Some(key) } => {
                write!(f, "unsupported condition type on key '{key}'")
            }
            Anomaly::Unsupported { key: None } => write!(f, "unsupported condition type"),
        }
    }
}

/// Sink for anomalies.
pub trait Reporter {
    /// Records one anomaly. Must not panic.
    fn report(&self, anomaly: Anomaly);
}

impl<R: Reporter + ?Sized> Reporter for &R {
    fn report(&self, anomaly: Anomaly) {
        (**self).report(anomaly)
    }
}

impl<R: Reporter + ?Sized> Reporter for Rc<R> {
    fn report(&self, anomaly: Anomaly) {
        (**self).report(anomaly)
    }
}

// === Real implementations ===

/// Emits every anomaly as a `tracing` warning under the `sift` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, anomaly: Anomaly) {
        tracing::warn!(target: "sift", anomaly = ?anomaly, "{anomaly}");
    }
}

/// Drops anomalies.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _anomaly: Anomaly) {}
}

// === Recording implementation for tests ===

/// Keeps every anomaly in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    anomalies: RefCell<Vec<Anomaly>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        MemoryReporter::default()
    }

    /// Snapshot of what has been reported so far.
    pub fn anomalies(&self) -> Vec<Anomaly> {
        self.anomalies.borrow().clone()
    }

    /// Drains the recorded anomalies.
    pub fn take(&self) -> Vec<Anomaly> {
        std::mem::take(&mut *self.anomalies.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.anomalies.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.anomalies.borrow().is_empty()
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, anomaly: Anomaly) {
        self.anomalies.borrow_mut().push(anomaly);
    }
}
