use serde::{Deserialize, Serialize};

use crate::format::DEFAULT_FLOAT_PRECISION;

/// Highest precision the float formatter accepts.
pub const MAX_FLOAT_PRECISION: usize = 21;

/// How failure reports are laid out.
///
/// The defaults give one element of context on each side of the failing
/// range and 4 significant digits for floats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Target width handed to the table renderer before it wraps.
    #[serde(default = "default_fill_to_width")]
    pub fill_to_width: usize,

    /// Elements shown before the first failure.
    #[serde(default = "default_context")]
    pub context_before: usize,

    /// Elements shown after the last failure.
    #[serde(default = "default_context")]
    pub context_after: usize,

    /// Significant digits for float cells.
    #[serde(default = "default_float_precision")]
    pub float_precision: usize,
}

fn default_fill_to_width() -> usize {
    120
}

fn default_context() -> usize {
    1
}

fn default_float_precision() -> usize {
    DEFAULT_FLOAT_PRECISION
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            fill_to_width: default_fill_to_width(),
            context_before: default_context(),
            context_after: default_context(),
            float_precision: default_float_precision(),
        }
    }
}

impl DiagnosticsConfig {
    /// Defaults overridden from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `BUFCHECK_TABLE_WIDTH` | Table fill width (default: 120) |
    /// | `BUFCHECK_CONTEXT` | Context elements on each side (default: 1) |
    /// | `BUFCHECK_FLOAT_PRECISION` | Significant digits for floats (default: 4) |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| -> Option<usize> {
            let raw = lookup(key)?;
            match raw.trim().parse() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!(key, value = %raw, error = %e, "ignoring invalid diagnostics setting");
                    None
                }
            }
        };

        let mut cfg = Self::default();
        if let Some(width) = read("BUFCHECK_TABLE_WIDTH") {
            cfg.fill_to_width = width;
        }
        if let Some(context) = read("BUFCHECK_CONTEXT") {
            cfg.context_before = context;
            cfg.context_after = context;
        }
        if let Some(precision) = read("BUFCHECK_FLOAT_PRECISION") {
            cfg = cfg.with_float_precision(precision);
        }
        cfg
    }

    pub fn with_fill_to_width(mut self, width: usize) -> Self {
        self.fill_to_width = width;
        self
    }

    pub fn with_context(mut self, before: usize, after: usize) -> Self {
        self.context_before = before;
        self.context_after = after;
        self
    }

    /// Clamped to `1..=MAX_FLOAT_PRECISION`.
    pub fn with_float_precision(mut self, precision: usize) -> Self {
        self.float_precision = precision.clamp(1, MAX_FLOAT_PRECISION);
        self
    }

    pub(crate) fn effective_precision(&self) -> usize {
        self.float_precision.clamp(1, MAX_FLOAT_PRECISION)
    }
}
