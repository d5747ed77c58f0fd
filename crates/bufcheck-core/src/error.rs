//! Precondition violations.
//!
//! These are caller bugs, not data mismatches. The comparison entry points
//! panic with the `Display` text; they never become a pass or a report.

use crate::element::ElementKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PreconditionViolation {
    /// Two buffers compared element-wise hold different element types.
    #[error("TypedArray type mismatch: actual is {actual}, expected is {expected}")]
    TypeMismatch {
        actual: ElementKind,
        expected: ElementKind,
    },

    /// Two buffers compared element-wise have different lengths.
    #[error("size mismatch: actual has {actual} elements, expected has {expected}")]
    LengthMismatch { actual: usize, expected: usize },

    /// A fractional or non-finite value was handed to the hex formatter.
    #[error("number must be integer to format as hex, got {value}")]
    NonIntegerHex { value: f64 },

    /// Raw bytes do not split into whole elements.
    #[error("{len} bytes is not a whole number of {kind} elements")]
    ByteLength { kind: ElementKind, len: usize },

    /// No buffer variant exists for this kind and width.
    #[error("unsupported element kind {kind}")]
    UnsupportedKind { kind: ElementKind },
}

impl PreconditionViolation {
    /// Abort the current comparison.
    #[track_caller]
    pub(crate) fn raise(self) -> ! {
        panic!("{}", self)
    }
}

pub(crate) fn ensure_same_len(actual: usize, expected: usize) {
    if actual != expected {
        PreconditionViolation::LengthMismatch { actual, expected }.raise();
    }
}

pub(crate) fn ensure_same_kind(actual: ElementKind, expected: ElementKind) {
    if actual != expected {
        PreconditionViolation::TypeMismatch { actual, expected }.raise();
    }
}
