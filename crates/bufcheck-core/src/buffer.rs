//! Buffer access shared by the generic and the runtime-tagged paths.

use bytemuck::pod_collect_to_vec;
use half::f16;
use serde::Serialize;

use crate::element::{Element, ElementKind, Number};
use crate::error::PreconditionViolation;

/// Read-only view of a fixed-width numeric buffer.
pub trait TypedBuffer {
    fn kind(&self) -> ElementKind;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `None` past the end.
    fn get_number(&self, index: usize) -> Option<Number>;

    /// Owned copy of every element.
    fn snapshot(&self) -> BufferSnapshot {
        BufferSnapshot {
            kind: self.kind(),
            values: (0..self.len()).filter_map(|i| self.get_number(i)).collect(),
        }
    }
}

impl<T: Element> TypedBuffer for [T] {
    fn kind(&self) -> ElementKind {
        T::KIND
    }

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get_number(&self, index: usize) -> Option<Number> {
        self.get(index).map(|v| v.to_number())
    }
}

/// Copy of a buffer's contents, owned by whoever holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferSnapshot {
    pub kind: ElementKind,
    pub values: Vec<Number>,
}

impl BufferSnapshot {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> serde_json::Value {
        #[derive(Serialize)]
        struct View<'a> {
            kind: &'a ElementKind,
            values: Vec<serde_json::Value>,
        }
        let view = View {
            kind: &self.kind,
            values: self.values.iter().map(|v| v.to_json()).collect(),
        };
        serde_json::to_value(view).unwrap_or(serde_json::Value::Null)
    }
}

/// A buffer whose element type is only known at run time.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyBuffer {
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F16(Vec<f16>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

/// Run `$body` with `$v` bound to the typed `Vec` inside an [`AnyBuffer`].
macro_rules! with_any_buffer {
    ($buf:expr, $v:ident => $body:expr) => {
        match $buf {
            AnyBuffer::I8($v) => $body,
            AnyBuffer::I16($v) => $body,
            AnyBuffer::I32($v) => $body,
            AnyBuffer::I64($v) => $body,
            AnyBuffer::U8($v) => $body,
            AnyBuffer::U16($v) => $body,
            AnyBuffer::U32($v) => $body,
            AnyBuffer::U64($v) => $body,
            AnyBuffer::F16($v) => $body,
            AnyBuffer::F32($v) => $body,
            AnyBuffer::F64($v) => $body,
        }
    };
}
pub(crate) use with_any_buffer;

macro_rules! any_buffer_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for AnyBuffer {
                fn from(v: Vec<$ty>) -> Self {
                    AnyBuffer::$variant(v)
                }
            }
        )*
    };
}

any_buffer_from_vec! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f16 => F16,
    f32 => F32,
    f64 => F64,
}

impl AnyBuffer {
    /// Decode raw host-order bytes (e.g. a GPU read-back) as elements of
    /// `kind`. The bytes are copied, so `bytes` need not be aligned.
    pub fn from_bytes(kind: ElementKind, bytes: &[u8]) -> Result<Self, PreconditionViolation> {
        let width = kind.byte_width();
        if width == 0 || bytes.len() % width != 0 {
            return Err(PreconditionViolation::ByteLength {
                kind,
                len: bytes.len(),
            });
        }
        let buf = match kind {
            ElementKind::Signed { width: 1 } => AnyBuffer::I8(pod_collect_to_vec(bytes)),
            ElementKind::Signed { width: 2 } => AnyBuffer::I16(pod_collect_to_vec(bytes)),
            ElementKind::Signed { width: 4 } => AnyBuffer::I32(pod_collect_to_vec(bytes)),
            ElementKind::Signed { width: 8 } => AnyBuffer::I64(pod_collect_to_vec(bytes)),
            ElementKind::Unsigned { width: 1 } => AnyBuffer::U8(bytes.to_vec()),
            ElementKind::Unsigned { width: 2 } => AnyBuffer::U16(pod_collect_to_vec(bytes)),
            ElementKind::Unsigned { width: 4 } => AnyBuffer::U32(pod_collect_to_vec(bytes)),
            ElementKind::Unsigned { width: 8 } => AnyBuffer::U64(pod_collect_to_vec(bytes)),
            ElementKind::Float { width: 2 } => AnyBuffer::F16(pod_collect_to_vec(bytes)),
            ElementKind::Float { width: 4 } => AnyBuffer::F32(pod_collect_to_vec(bytes)),
            ElementKind::Float { width: 8 } => AnyBuffer::F64(pod_collect_to_vec(bytes)),
            _ => return Err(PreconditionViolation::UnsupportedKind { kind }),
        };
        Ok(buf)
    }
}

impl TypedBuffer for AnyBuffer {
    fn kind(&self) -> ElementKind {
        with_any_buffer!(self, v => v.as_slice().kind())
    }

    fn len(&self) -> usize {
        with_any_buffer!(self, v => v.len())
    }

    fn get_number(&self, index: usize) -> Option<Number> {
        with_any_buffer!(self, v => v.as_slice().get_number(index))
    }
}
