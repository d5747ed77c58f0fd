//! Buffer comparators.
//!
//! Every comparator is a predicate over `(index, actual[index])` fed through
//! [`scan`], and every failure goes through the same [`DiagnosticsBuilder`], so
//! they all produce the same report layout and differ only in their
//! supplemental rows and attached extras.
//!
//! Supplemental rows and extras are only built once a scan has failed; a
//! passing comparison does not touch the heap.
//!
//! Mismatched element types or lengths are caller bugs and panic; a data
//! mismatch is returned as `Err(DiagnosticReport)`.

use crate::buffer::{with_any_buffer, AnyBuffer, TypedBuffer};
use crate::config::DiagnosticsConfig;
use crate::diagnostics::{DiagnosticsBuilder, SupplementalRow};
use crate::element::{Element, Number};
use crate::error::{ensure_same_kind, ensure_same_len, PreconditionViolation};
use crate::predicate::{scan, FailureSet};
use crate::report::{extras, DiagnosticReport, ExtraValue, GeneratorRef};

/// `Ok(())` when every element passed.
pub type CheckResult = Result<(), DiagnosticReport>;

/// Report for a failed scan. Callers check `failures.is_empty()` first.
fn diagnose<T: Element>(
    config: &DiagnosticsConfig,
    actual: &[T],
    failures: &FailureSet,
    supplemental: &[SupplementalRow<'_>],
) -> DiagnosticReport {
    DiagnosticsBuilder::new(config.clone()).build(actual, failures, supplemental)
}

/// Check `predicate(i, actual[i])` for every index.
///
/// `supplemental` is only rendered on failure, but it is built by the caller
/// up front; the typed comparators below defer it instead.
pub fn check_elements_pass_predicate<T, P>(
    actual: &[T],
    predicate: P,
    supplemental: &[SupplementalRow<'_>],
) -> CheckResult
where
    T: Element,
    P: FnMut(usize, T) -> bool,
{
    check_elements_pass_predicate_with(
        &DiagnosticsConfig::default(),
        actual,
        predicate,
        supplemental,
    )
}

pub fn check_elements_pass_predicate_with<T, P>(
    config: &DiagnosticsConfig,
    actual: &[T],
    predicate: P,
    supplemental: &[SupplementalRow<'_>],
) -> CheckResult
where
    T: Element,
    P: FnMut(usize, T) -> bool,
{
    let failures = scan(actual, predicate);
    if failures.is_empty() {
        return Ok(());
    }
    Err(diagnose(config, actual, &failures, supplemental))
}

/// `actual[i] == expected[i]` for every index.
pub fn check_elements_equal<T: Element>(actual: &[T], expected: &[T]) -> CheckResult {
    check_elements_equal_with(&DiagnosticsConfig::default(), actual, expected)
}

pub fn check_elements_equal_with<T: Element>(
    config: &DiagnosticsConfig,
    actual: &[T],
    expected: &[T],
) -> CheckResult {
    ensure_same_len(actual.len(), expected.len());
    let failures = scan(actual, |i, v| v == expected[i]);
    if failures.is_empty() {
        return Ok(());
    }
    let rows = [SupplementalRow::values("expected", |i| expected[i])];
    let snapshot = expected.snapshot();
    Err(diagnose(config, actual, &failures, &rows)
        .wrap(move || extras([("expected", ExtraValue::Snapshot(snapshot.clone()))])))
}

/// `actual[i]` within the unordered pair `bounds.0(i)`, `bounds.1(i)`,
/// inclusive. A `NaN` value or bound never passes.
///
/// The bounds are kept on a failed report, so they must own what they
/// capture (`move` a copy of any local data they read).
pub fn check_elements_between<T, A, B>(actual: &[T], bounds: (A, B)) -> CheckResult
where
    T: Element,
    A: Fn(usize) -> T + Send + Sync + 'static,
    B: Fn(usize) -> T + Send + Sync + 'static,
{
    check_elements_between_with(&DiagnosticsConfig::default(), actual, bounds)
}

pub fn check_elements_between_with<T, A, B>(
    config: &DiagnosticsConfig,
    actual: &[T],
    (a, b): (A, B),
) -> CheckResult
where
    T: Element,
    A: Fn(usize) -> T + Send + Sync + 'static,
    B: Fn(usize) -> T + Send + Sync + 'static,
{
    let failures = scan(actual, |i, v| within_unordered(v, a(i), b(i)));
    if failures.is_empty() {
        return Ok(());
    }
    let report = {
        let rows = [
            SupplementalRow::values("between", &a),
            SupplementalRow::values("and", &b),
        ];
        diagnose(config, actual, &failures, &rows)
    };
    let generators = vec![
        GeneratorRef::new(move |i| a(i).to_number()),
        GeneratorRef::new(move |i| b(i).to_number()),
    ];
    Err(report.wrap(move || extras([("expected", ExtraValue::Generators(generators.clone()))])))
}

/// `actual[i]` equals `either[0][i]` or `either[1][i]`.
pub fn check_elements_equal_either<T: Element>(actual: &[T], either: [&[T]; 2]) -> CheckResult {
    check_elements_equal_either_with(&DiagnosticsConfig::default(), actual, either)
}

pub fn check_elements_equal_either_with<T: Element>(
    config: &DiagnosticsConfig,
    actual: &[T],
    [x, y]: [&[T]; 2],
) -> CheckResult {
    ensure_same_len(actual.len(), x.len());
    ensure_same_len(actual.len(), y.len());
    let failures = scan(actual, |i, v| v == x[i] || v == y[i]);
    if failures.is_empty() {
        return Ok(());
    }
    let rows = [
        SupplementalRow::values("either", |i| x[i]),
        SupplementalRow::values("or", |i| y[i]),
    ];
    let expected = serde_json::json!([x.snapshot().to_json(), y.snapshot().to_json()]);
    Err(diagnose(config, actual, &failures, &rows)
        .wrap(move || extras([("expected", ExtraValue::Json(expected.clone()))])))
}

/// `actual[i] == generator(i)` for every index.
///
/// Like the bounds of [`check_elements_between`], the generator is kept on a
/// failed report and must own what it captures.
pub fn check_elements_equal_generated<T, G>(actual: &[T], generator: G) -> CheckResult
where
    T: Element,
    G: Fn(usize) -> T + Send + Sync + 'static,
{
    check_elements_equal_generated_with(&DiagnosticsConfig::default(), actual, generator)
}

pub fn check_elements_equal_generated_with<T, G>(
    config: &DiagnosticsConfig,
    actual: &[T],
    generator: G,
) -> CheckResult
where
    T: Element,
    G: Fn(usize) -> T + Send + Sync + 'static,
{
    let failures = scan(actual, |i, v| v == generator(i));
    if failures.is_empty() {
        return Ok(());
    }
    let report = {
        let rows = [SupplementalRow::values("expected", &generator)];
        diagnose(config, actual, &failures, &rows)
    };
    let generator = GeneratorRef::new(move |i| generator(i).to_number());
    Err(report.wrap(move || extras([("generator", ExtraValue::Generator(generator.clone()))])))
}

fn within_unordered<T: PartialOrd>(value: T, a: T, b: T) -> bool {
    (a <= value && value <= b) || (b <= value && value <= a)
}

/// Run `$body` with `$x`, `$y` bound to same-typed vectors of two
/// [`AnyBuffer`]s, or raise a type mismatch.
macro_rules! with_buffer_pair {
    ($a:expr, $b:expr, $x:ident, $y:ident => $body:expr) => {
        match ($a, $b) {
            (AnyBuffer::I8($x), AnyBuffer::I8($y)) => $body,
            (AnyBuffer::I16($x), AnyBuffer::I16($y)) => $body,
            (AnyBuffer::I32($x), AnyBuffer::I32($y)) => $body,
            (AnyBuffer::I64($x), AnyBuffer::I64($y)) => $body,
            (AnyBuffer::U8($x), AnyBuffer::U8($y)) => $body,
            (AnyBuffer::U16($x), AnyBuffer::U16($y)) => $body,
            (AnyBuffer::U32($x), AnyBuffer::U32($y)) => $body,
            (AnyBuffer::U64($x), AnyBuffer::U64($y)) => $body,
            (AnyBuffer::F16($x), AnyBuffer::F16($y)) => $body,
            (AnyBuffer::F32($x), AnyBuffer::F32($y)) => $body,
            (AnyBuffer::F64($x), AnyBuffer::F64($y)) => $body,
            (a, b) => PreconditionViolation::TypeMismatch {
                actual: a.kind(),
                expected: b.kind(),
            }
            .raise(),
        }
    };
}

macro_rules! with_buffer_triple {
    ($a:expr, $b:expr, $c:expr, $x:ident, $y:ident, $z:ident => $body:expr) => {
        match ($a, $b, $c) {
            (AnyBuffer::I8($x), AnyBuffer::I8($y), AnyBuffer::I8($z)) => $body,
            (AnyBuffer::I16($x), AnyBuffer::I16($y), AnyBuffer::I16($z)) => $body,
            (AnyBuffer::I32($x), AnyBuffer::I32($y), AnyBuffer::I32($z)) => $body,
            (AnyBuffer::I64($x), AnyBuffer::I64($y), AnyBuffer::I64($z)) => $body,
            (AnyBuffer::U8($x), AnyBuffer::U8($y), AnyBuffer::U8($z)) => $body,
            (AnyBuffer::U16($x), AnyBuffer::U16($y), AnyBuffer::U16($z)) => $body,
            (AnyBuffer::U32($x), AnyBuffer::U32($y), AnyBuffer::U32($z)) => $body,
            (AnyBuffer::U64($x), AnyBuffer::U64($y), AnyBuffer::U64($z)) => $body,
            (AnyBuffer::F16($x), AnyBuffer::F16($y), AnyBuffer::F16($z)) => $body,
            (AnyBuffer::F32($x), AnyBuffer::F32($y), AnyBuffer::F32($z)) => $body,
            (AnyBuffer::F64($x), AnyBuffer::F64($y), AnyBuffer::F64($z)) => $body,
            (a, b, _) => PreconditionViolation::TypeMismatch {
                actual: a.kind(),
                expected: b.kind(),
            }
            .raise(),
        }
    };
}

/// [`check_elements_equal`] for runtime-tagged buffers.
pub fn check_any_equal(actual: &AnyBuffer, expected: &AnyBuffer) -> CheckResult {
    check_any_equal_with(&DiagnosticsConfig::default(), actual, expected)
}

pub fn check_any_equal_with(
    config: &DiagnosticsConfig,
    actual: &AnyBuffer,
    expected: &AnyBuffer,
) -> CheckResult {
    with_buffer_pair!(actual, expected, a, e => {
        check_elements_equal_with(config, a.as_slice(), e.as_slice())
    })
}

/// [`check_elements_equal_either`] for runtime-tagged buffers.
pub fn check_any_equal_either(actual: &AnyBuffer, either: [&AnyBuffer; 2]) -> CheckResult {
    check_any_equal_either_with(&DiagnosticsConfig::default(), actual, either)
}

pub fn check_any_equal_either_with(
    config: &DiagnosticsConfig,
    actual: &AnyBuffer,
    [x, y]: [&AnyBuffer; 2],
) -> CheckResult {
    ensure_same_kind(actual.kind(), x.kind());
    ensure_same_kind(actual.kind(), y.kind());
    with_buffer_triple!(actual, x, y, a, x, y => {
        check_elements_equal_either_with(config, a.as_slice(), [x.as_slice(), y.as_slice()])
    })
}

/// [`check_elements_pass_predicate`] for a runtime-tagged buffer; the
/// predicate sees each element as a [`Number`].
pub fn check_any_pass_predicate<P>(
    actual: &AnyBuffer,
    predicate: P,
    supplemental: &[SupplementalRow<'_>],
) -> CheckResult
where
    P: FnMut(usize, Number) -> bool,
{
    check_any_pass_predicate_with(&DiagnosticsConfig::default(), actual, predicate, supplemental)
}

pub fn check_any_pass_predicate_with<P>(
    config: &DiagnosticsConfig,
    actual: &AnyBuffer,
    mut predicate: P,
    supplemental: &[SupplementalRow<'_>],
) -> CheckResult
where
    P: FnMut(usize, Number) -> bool,
{
    with_any_buffer!(actual, v => check_elements_pass_predicate_with(
        config,
        v.as_slice(),
        |i, e| predicate(i, e.to_number()),
        supplemental,
    ))
}
