//! Turns a failed scan into a windowed, aligned report.
//!
//! The report shows the failing range plus a little context:
//!
//! ```text
//! Array had unexpected contents at indices 2 through 2.
//!  Starting at index 1:
//!  actual == 0x: 00000001 00000005 00000003
//!  failed ->                    xx
//!   expected     00000001 00000002 00000003
//! ```

use bufcheck_table::{Cell, PrettyTable, Row, TableOptions, TableRenderer};

use crate::buffer::TypedBuffer;
use crate::config::DiagnosticsConfig;
use crate::element::{Element, Number};
use crate::format::format_number_with;
use crate::predicate::FailureSet;
use crate::report::{extras, DiagnosticReport, ExtraValue, FailureSummary};

/// Half-open index range `[start, end)` rendered in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    pub start: usize,
    pub end: usize,
}

impl DisplayWindow {
    /// Failing range widened by the configured context, clamped to the
    /// buffer. `None` when nothing failed.
    pub fn around(failures: &FailureSet, config: &DiagnosticsConfig) -> Option<Self> {
        let first = failures.first()?;
        let last = failures.last()?;
        let start = first.saturating_sub(config.context_before);
        let end = last
            .saturating_add(config.context_after)
            .saturating_add(1)
            .min(failures.domain_len());
        Some(Self { start, end })
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// A diagnostic-only row shown under the actual values.
///
/// Never consulted for pass/fail.
pub struct SupplementalRow<'a> {
    label: String,
    cell: Box<dyn Fn(usize) -> Cell<Number> + 'a>,
}

impl<'a> SupplementalRow<'a> {
    /// Numeric cells, formatted like the actual row.
    pub fn numeric(label: impl Into<String>, f: impl Fn(usize) -> Number + 'a) -> Self {
        Self {
            label: label.into(),
            cell: Box::new(move |i| Cell::Value(f(i))),
        }
    }

    /// Typed values, formatted like the actual row.
    pub fn values<T: Element>(label: impl Into<String>, f: impl Fn(usize) -> T + 'a) -> Self {
        Self::numeric(label, move |i| f(i).to_number())
    }

    /// Text cells, printed as-is.
    pub fn text(label: impl Into<String>, f: impl Fn(usize) -> String + 'a) -> Self {
        Self {
            label: label.into(),
            cell: Box::new(move |i| Cell::Text(f(i))),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn cell(&self, index: usize) -> Cell<Number> {
        (self.cell)(index)
    }
}

impl std::fmt::Debug for SupplementalRow<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplementalRow")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

static PRETTY_TABLE: PrettyTable = PrettyTable;

/// Builds [`DiagnosticReport`]s from failed scans.
pub struct DiagnosticsBuilder<'r> {
    config: DiagnosticsConfig,
    renderer: &'r dyn TableRenderer<Number>,
}

impl Default for DiagnosticsBuilder<'static> {
    fn default() -> Self {
        Self::new(DiagnosticsConfig::default())
    }
}

impl DiagnosticsBuilder<'static> {
    pub fn new(config: DiagnosticsConfig) -> Self {
        Self {
            config,
            renderer: &PRETTY_TABLE,
        }
    }
}

impl<'r> DiagnosticsBuilder<'r> {
    pub fn with_renderer<'n>(
        self,
        renderer: &'n dyn TableRenderer<Number>,
    ) -> DiagnosticsBuilder<'n> {
        DiagnosticsBuilder {
            config: self.config,
            renderer,
        }
    }

    pub fn config(&self) -> &DiagnosticsConfig {
        &self.config
    }

    /// Render the report for a non-empty failure set.
    ///
    /// Panics if `failures` is empty or was produced from a different buffer
    /// length.
    pub fn build<T: Element>(
        &self,
        actual: &[T],
        failures: &FailureSet,
        supplemental: &[SupplementalRow<'_>],
    ) -> DiagnosticReport {
        assert_eq!(
            failures.domain_len(),
            actual.len(),
            "failure set does not belong to this buffer"
        );
        let (Some(first), Some(last), Some(window)) = (
            failures.first(),
            failures.last(),
            DisplayWindow::around(failures, &self.config),
        ) else {
            panic!("diagnostics requested for a scan with no failures");
        };
        let kind = T::KIND;

        let table = self.render_table(actual, failures, supplemental, window);
        let message = format!(
            "Array had unexpected contents at indices {} through {}.\n Starting at index {}:\n{}",
            first, last, window.start, table
        );

        tracing::debug!(
            %kind,
            first,
            last,
            failed = failures.count(),
            window_start = window.start,
            window_end = window.end,
            "buffer contents failed predicate"
        );

        // Copied now; the caller may mutate `actual` once we return.
        let snapshot = actual.snapshot();
        let summary = FailureSummary {
            kind,
            len: actual.len(),
            first_failure: first,
            last_failure: last,
            failure_count: failures.count(),
            window_start: window.start,
            window_end: window.end,
        };
        DiagnosticReport::new(message, move || {
            extras([("actual", ExtraValue::Snapshot(snapshot.clone()))])
        })
        .with_summary(summary)
    }

    fn render_table<T: Element>(
        &self,
        actual: &[T],
        failures: &FailureSet,
        supplemental: &[SupplementalRow<'_>],
        window: DisplayWindow,
    ) -> String {
        let kind = T::KIND;
        let number_prefix = if kind.is_float() { "" } else { "0x:" };

        let mut rows: Vec<Row<Number>> = Vec::with_capacity(2 + supplemental.len());
        rows.push(
            header("actual ==", number_prefix)
                .chain(actual[window.indices()].iter().map(|v| Cell::Value(v.to_number())))
                .collect(),
        );
        rows.push(
            header("failed ->", "")
                .chain(window.indices().map(|i| {
                    Cell::text(if failures.contains(i) { "xx" } else { "" })
                }))
                .collect(),
        );
        for row in supplemental {
            rows.push(
                header(row.label(), "")
                    .chain(window.indices().map(|i| row.cell(i)))
                    .collect(),
            );
        }

        let precision = self.config.effective_precision();
        let number_to_string = move |n: &Number| format_number_with(*n, kind, precision);
        let opts = TableOptions::new(self.config.fill_to_width, &number_to_string);
        self.renderer.render(&opts, &rows)
    }
}

fn header(label: &str, prefix: &str) -> impl Iterator<Item = Cell<Number>> {
    [Cell::text(label), Cell::text(prefix)].into_iter()
}
