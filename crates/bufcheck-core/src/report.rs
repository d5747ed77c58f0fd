//! Failure reports with lazily computed extras.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use crate::buffer::BufferSnapshot;
use crate::element::{ElementKind, Number};

/// Named extra values attached to a report.
pub type Extras = BTreeMap<String, ExtraValue>;

type ExtrasThunk = Box<dyn Fn() -> Extras + Send + Sync>;

/// Per-index value function kept on a report for later inspection.
#[derive(Clone)]
pub struct GeneratorRef(Arc<dyn Fn(usize) -> Number + Send + Sync>);

impl GeneratorRef {
    pub fn new(f: impl Fn(usize) -> Number + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn eval(&self, index: usize) -> Number {
        (self.0)(index)
    }

    /// Values for `0..len`.
    pub fn materialize(&self, len: usize) -> Vec<Number> {
        (0..len).map(|i| self.eval(i)).collect()
    }
}

impl fmt::Debug for GeneratorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GeneratorRef(..)")
    }
}

#[derive(Debug, Clone)]
pub enum ExtraValue {
    Snapshot(BufferSnapshot),
    Generator(GeneratorRef),
    Generators(Vec<GeneratorRef>),
    Json(serde_json::Value),
}

impl ExtraValue {
    /// Serializable view. Generators are evaluated over `0..len` when a
    /// length is known.
    pub fn to_json(&self, len: Option<usize>) -> serde_json::Value {
        let generator = |g: &GeneratorRef| match len {
            Some(len) => g.materialize(len).into_iter().map(Number::to_json).collect(),
            None => serde_json::Value::String("<generator>".to_string()),
        };
        match self {
            ExtraValue::Snapshot(s) => s.to_json(),
            ExtraValue::Generator(g) => generator(g),
            ExtraValue::Generators(gs) => gs.iter().map(generator).collect(),
            ExtraValue::Json(v) => v.clone(),
        }
    }
}

/// Where a failed scan went wrong, as stated in the report message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FailureSummary {
    pub kind: ElementKind,
    pub len: usize,
    pub first_failure: usize,
    pub last_failure: usize,
    pub failure_count: usize,
    pub window_start: usize,
    pub window_end: usize,
}

/// A failed comparison: a rendered message plus extras computed on first
/// access.
///
/// Reports own all their data; nothing borrows the compared buffers.
#[must_use = "a failed comparison report should be surfaced or asserted on"]
pub struct DiagnosticReport {
    message: String,
    summary: Option<FailureSummary>,
    thunk: ExtrasThunk,
    extras: OnceLock<Extras>,
}

impl DiagnosticReport {
    pub fn new(
        message: impl Into<String>,
        extras: impl Fn() -> Extras + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            summary: None,
            thunk: Box::new(extras),
            extras: OnceLock::new(),
        }
    }

    pub(crate) fn with_summary(mut self, summary: FailureSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Set for reports built from a buffer scan.
    pub fn summary(&self) -> Option<&FailureSummary> {
        self.summary.as_ref()
    }

    /// Computes the extras on first call and caches them.
    pub fn extras(&self) -> &Extras {
        self.extras.get_or_init(|| (self.thunk)())
    }

    pub fn extra(&self, name: &str) -> Option<&ExtraValue> {
        self.extras().get(name)
    }

    /// Whether [`extras`](Self::extras) has run yet.
    pub fn extras_computed(&self) -> bool {
        self.extras.get().is_some()
    }

    /// Same message, with `more` merged over the existing extras. Nothing is
    /// evaluated until the wrapped report's extras are requested.
    pub fn wrap(self, more: impl Fn() -> Extras + Send + Sync + 'static) -> Self {
        let Self {
            message,
            summary,
            thunk,
            extras,
        } = self;
        let base = extras.into_inner();
        let mut wrapped = Self::new(message, move || {
            let mut merged = base.clone().unwrap_or_else(|| thunk());
            merged.extend(more());
            merged
        });
        wrapped.summary = summary;
        wrapped
    }

    /// Message plus extras as one JSON object, for logs and artifacts.
    pub fn to_json(&self) -> serde_json::Value {
        let len = match self.extra("actual") {
            Some(ExtraValue::Snapshot(s)) => Some(s.len()),
            _ => None,
        };
        let extras: serde_json::Map<String, serde_json::Value> = self
            .extras()
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json(len)))
            .collect();
        serde_json::json!({
            "message": self.message,
            "summary": self.summary,
            "extras": extras,
        })
    }
}

impl PartialEq for DiagnosticReport {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl fmt::Debug for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticReport")
            .field("message", &self.message)
            .field("summary", &self.summary)
            .field("extras_computed", &self.extras_computed())
            .finish()
    }
}

impl std::error::Error for DiagnosticReport {}

/// Build an [`Extras`] map from `(name, value)` pairs.
pub fn extras<I, K>(items: I) -> Extras
where
    I: IntoIterator<Item = (K, ExtraValue)>,
    K: Into<String>,
{
    items.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
