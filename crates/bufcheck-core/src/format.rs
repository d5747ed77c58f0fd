//! Cell formatting for diagnostics tables.
//!
//! Integer buffers print as zero-padded hex sized to the element width,
//! float buffers print with a fixed number of significant digits.

use crate::element::{ElementKind, Number};
use crate::error::PreconditionViolation;

pub const DEFAULT_FLOAT_PRECISION: usize = 4;

/// Format one value for a buffer of `kind`.
pub fn format_number(value: Number, kind: ElementKind) -> String {
    format_number_with(value, kind, DEFAULT_FLOAT_PRECISION)
}

/// Like [`format_number`] with an explicit float precision.
pub fn format_number_with(value: Number, kind: ElementKind, precision: usize) -> String {
    if kind.is_float() {
        float_to_precision(value.as_f64(), precision)
    } else {
        int_to_padded_hex(value, kind.byte_width())
    }
}

/// Hex magnitude padded to `2 * byte_length` digits, `-` prefixed when
/// negative. Wider magnitudes are printed in full.
///
/// Panics if `value` is not a mathematical integer.
///
/// ```
/// use bufcheck_core::{int_to_padded_hex, Number};
/// assert_eq!(int_to_padded_hex(Number::Int(-5), 1), "-05");
/// assert_eq!(int_to_padded_hex(Number::Int(0xabc), 4), "00000abc");
/// ```
pub fn int_to_padded_hex(value: Number, byte_length: usize) -> String {
    let v = match value {
        Number::Int(v) => v,
        // `as` saturates beyond the i128 range; no supported element gets there.
        Number::Float(f) if f.is_finite() && f.fract() == 0.0 => f as i128,
        Number::Float(f) => PreconditionViolation::NonIntegerHex { value: f }.raise(),
    };
    let digits = format!("{:0width$x}", v.unsigned_abs(), width = byte_length * 2);
    if v < 0 {
        format!("-{}", digits)
    } else {
        digits
    }
}

/// `precision` significant digits, switching to exponent form when the
/// decimal exponent is below -6 or at least `precision`. Trailing zeros are
/// kept.
///
/// ```
/// use bufcheck_core::float_to_precision;
/// assert_eq!(float_to_precision(1.5, 4), "1.500");
/// assert_eq!(float_to_precision(1e100, 4), "1.000e+100");
/// assert_eq!(float_to_precision(0.000123456, 4), "0.0001235");
/// ```
pub fn float_to_precision(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if precision == 1 {
            "0".to_string()
        } else {
            format!("0.{}", "0".repeat(precision - 1))
        };
    }

    // Let the exponent formatter do the rounding so the exponent reflects
    // carries like 9.9995 -> 1.000e1.
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -6 || exp >= precision as i32 {
        let sign = if exp >= 0 { "+" } else { "-" };
        format!("{}e{}{}", mantissa, sign, exp.unsigned_abs())
    } else {
        let decimals = (precision as i32 - 1 - exp).max(0) as usize;
        format!("{:.*}", decimals, value)
    }
}
