//! Typed-array comparison with windowed diff diagnostics.
//!
//! Compares a numeric buffer against an expectation and, on mismatch,
//! returns a [`DiagnosticReport`] showing the failing range:
//!
//! - Exact equality against another buffer
//! - Inclusive range between two per-index bounds, in either order
//! - Equality with one of two candidate buffers
//! - Equality with a per-index generator function
//! - Any custom per-element predicate
//!
//! # Quick Start
//!
//! ```
//! use bufcheck_core::check_elements_equal;
//!
//! let report = check_elements_equal(&[0u32, 1, 5, 3], &[0, 1, 2, 3]).unwrap_err();
//! assert_eq!(
//!     report.message(),
//!     "Array had unexpected contents at indices 2 through 2.\n Starting at index 1:\n \
//!      actual == 0x: 00000001 00000005 00000003\n \
//!      failed ->                    xx\n  \
//!      expected     00000001 00000002 00000003"
//! );
//! ```
//!
//! Integer cells print as zero-padded hex sized to the element width, float
//! cells with four significant digits. Extras such as a copy of the actual
//! buffer are attached to the report and only materialized on request.
//!
//! Element-type and length mismatches between the compared buffers are caller
//! errors and panic with a [`PreconditionViolation`] message.
//!
//! # Configuration
//!
//! | Environment Variable | Description |
//! |---------------------|-------------|
//! | `BUFCHECK_TABLE_WIDTH` | Table fill width before wrapping (default: 120) |
//! | `BUFCHECK_CONTEXT` | Elements shown around the failing range (default: 1) |
//! | `BUFCHECK_FLOAT_PRECISION` | Significant digits for float cells (default: 4) |
//!
//! Read with [`DiagnosticsConfig::from_env`] and passed to the `*_with`
//! variants of each check.

pub mod buffer;
pub mod compare;
pub mod config;
pub mod diagnostics;
pub mod element;
pub mod error;
pub mod format;
pub mod predicate;
pub mod report;

// Re-export main types
pub use buffer::{AnyBuffer, BufferSnapshot, TypedBuffer};
pub use compare::{
    check_any_equal, check_any_equal_either, check_any_equal_either_with, check_any_equal_with,
    check_any_pass_predicate, check_any_pass_predicate_with, check_elements_between,
    check_elements_between_with, check_elements_equal, check_elements_equal_either,
    check_elements_equal_either_with, check_elements_equal_generated,
    check_elements_equal_generated_with, check_elements_equal_with,
    check_elements_pass_predicate, check_elements_pass_predicate_with, CheckResult,
};
pub use config::{DiagnosticsConfig, MAX_FLOAT_PRECISION};
pub use diagnostics::{DiagnosticsBuilder, DisplayWindow, SupplementalRow};
pub use element::{Element, ElementKind, Number};
pub use error::PreconditionViolation;
pub use format::{
    float_to_precision, format_number, format_number_with, int_to_padded_hex,
    DEFAULT_FLOAT_PRECISION,
};
pub use predicate::{scan, FailureSet};
pub use report::{extras, DiagnosticReport, ExtraValue, Extras, FailureSummary, GeneratorRef};

// Table layer, for custom renderers
pub use bufcheck_table::{Cell, PrettyTable, Row, TableOptions, TableRenderer};
