use half::f16;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Representation of one buffer element.
///
/// Two buffers are type-compatible iff their kinds are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    Signed { width: usize },
    Unsigned { width: usize },
    Float { width: usize },
}

impl ElementKind {
    /// Size of one element in bytes.
    pub fn byte_width(self) -> usize {
        match self {
            Self::Signed { width } | Self::Unsigned { width } | Self::Float { width } => width,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float { .. })
    }

    pub fn is_integer(self) -> bool {
        !self.is_float()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self {
            Self::Signed { .. } => 'i',
            Self::Unsigned { .. } => 'u',
            Self::Float { .. } => 'f',
        };
        write!(f, "{}{}", prefix, self.byte_width() * 8)
    }
}

/// A numeric value on its way to the formatter.
///
/// `Int` is wide enough for every `i64` and `u64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    /// JSON view; non-finite floats become `null`, integers outside the
    /// 64-bit range become strings.
    pub fn to_json(self) -> serde_json::Value {
        match self {
            Number::Int(v) => {
                if let Ok(v) = i64::try_from(v) {
                    serde_json::Value::from(v)
                } else if let Ok(v) = u64::try_from(v) {
                    serde_json::Value::from(v)
                } else {
                    serde_json::Value::String(v.to_string())
                }
            }
            Number::Float(v) => serde_json::Number::from_f64(v)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Number::Int(i128::from(v))
    }
}

impl From<u64> for Number {
    fn from(v: u64) -> Self {
        Number::Int(i128::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// Element types a buffer can hold.
///
/// Comparisons go through the type's own `PartialEq`/`PartialOrd`, so float
/// buffers follow IEEE rules (`NaN` equals nothing).
pub trait Element:
    Copy + PartialEq + PartialOrd + fmt::Debug + Send + Sync + bytemuck::Pod + 'static
{
    const KIND: ElementKind;

    fn to_number(self) -> Number;
}

macro_rules! int_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Element for $ty {
                const KIND: ElementKind = ElementKind::$kind {
                    width: std::mem::size_of::<$ty>(),
                };

                fn to_number(self) -> Number {
                    Number::Int(i128::from(self))
                }
            }
        )*
    };
}

int_element! {
    i8 => Signed,
    i16 => Signed,
    i32 => Signed,
    i64 => Signed,
    u8 => Unsigned,
    u16 => Unsigned,
    u32 => Unsigned,
    u64 => Unsigned,
}

impl Element for f16 {
    const KIND: ElementKind = ElementKind::Float { width: 2 };

    fn to_number(self) -> Number {
        Number::Float(self.to_f64())
    }
}

impl Element for f32 {
    const KIND: ElementKind = ElementKind::Float { width: 4 };

    fn to_number(self) -> Number {
        Number::from(f64::from(self))
    }
}

impl Element for f64 {
    const KIND: ElementKind = ElementKind::Float { width: 8 };

    fn to_number(self) -> Number {
        Number::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(u32::KIND, ElementKind::Unsigned { width: 4 });
        assert_eq!(i8::KIND, ElementKind::Signed { width: 1 });
        assert_eq!(f16::KIND.byte_width(), 2);
        assert!(f64::KIND.is_float());
        assert!(u64::KIND.is_integer());
        assert_eq!(f16::KIND.to_string(), "f16");
        assert_eq!(i64::KIND.to_string(), "i64");
    }

    #[test]
    fn test_to_number_is_exact_for_wide_ints() {
        assert_eq!(u64::MAX.to_number(), Number::Int(u64::MAX as i128));
        assert_eq!(i64::MIN.to_number(), Number::Int(i64::MIN as i128));
        assert_eq!(f16::from_f32(1.5).to_number(), Number::Float(1.5));
    }

    #[test]
    fn test_number_from_primitives() {
        assert_eq!(Number::from(-7i64), Number::Int(-7));
        assert_eq!(Number::from(u64::MAX), Number::Int(i128::from(u64::MAX)));
        assert_eq!(Number::from(0.25f64), Number::Float(0.25));
        assert_eq!(Number::from(u64::MAX).as_f64(), u64::MAX as f64);
    }

    #[test]
    fn test_number_json() {
        assert_eq!(Number::Int(-3).to_json(), serde_json::json!(-3));
        assert_eq!(
            Number::Int(u64::MAX as i128).to_json(),
            serde_json::json!(u64::MAX)
        );
        assert_eq!(Number::Float(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_value(ElementKind::Float { width: 4 }).unwrap();
        assert_eq!(json, serde_json::json!({"type": "float", "width": 4}));
    }
}
