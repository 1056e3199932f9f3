use std::fmt;

use crate::wire_type::WireType;

/// A decoded scalar, tagged with the wire type it came from.
///
/// Produced by array and timestamp decoding, where the element type is
/// chosen at runtime. The typed decoder's scalar methods return plain
/// Rust integers and floats instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
}

impl Value {
    #[must_use]
    pub fn wire_type(self) -> WireType {
        match self {
            Self::I8(_) => WireType::Int8,
            Self::U8(_) => WireType::Uint8,
            Self::I16(_) => WireType::Int16,
            Self::U16(_) => WireType::Uint16,
            Self::I32(_) => WireType::Int32,
            Self::U32(_) => WireType::Uint32,
            Self::I64(_) => WireType::Int64,
            Self::U64(_) => WireType::Uint64,
            Self::F32(_) => WireType::Float32,
            Self::F64(_) => WireType::Float64,
        }
    }

    /// Widen an integer value to `i64`.
    ///
    /// Returns `None` for floats and for `U64` values above `i64::MAX`.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::I8(v) => Some(i64::from(v)),
            Self::U8(v) => Some(i64::from(v)),
            Self::I16(v) => Some(i64::from(v)),
            Self::U16(v) => Some(i64::from(v)),
            Self::I32(v) => Some(i64::from(v)),
            Self::U32(v) => Some(i64::from(v)),
            Self::I64(v) => Some(v),
            Self::U64(v) => i64::try_from(v).ok(),
            Self::F32(_) | Self::F64(_) => None,
        }
    }

    /// Widen a non-negative integer value to `u64`.
    ///
    /// Returns `None` for floats and negative integers.
    #[must_use]
    pub fn as_u64(self) -> Option<u64> {
        match self {
            Self::U8(v) => Some(u64::from(v)),
            Self::U16(v) => Some(u64::from(v)),
            Self::U32(v) => Some(u64::from(v)),
            Self::U64(v) => Some(v),
            Self::F32(_) | Self::F64(_) => None,
            signed => signed.as_i64().and_then(|v| u64::try_from(v).ok()),
        }
    }

    /// Numeric value as `f64`. 64-bit integers may lose precision.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::I8(v) => f64::from(v),
            Self::U8(v) => f64::from(v),
            Self::I16(v) => f64::from(v),
            Self::U16(v) => f64::from(v),
            Self::I32(v) => f64::from(v),
            Self::U32(v) => f64::from(v),
            Self::I64(v) => v as f64,
            Self::U64(v) => v as f64,
            Self::F32(v) => f64::from(v),
            Self::F64(v) => v,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening() {
        assert_eq!(Value::I8(-5).as_i64(), Some(-5));
        assert_eq!(Value::U32(7).as_u64(), Some(7));
        assert_eq!(Value::I16(-1).as_u64(), None);
        assert_eq!(Value::U64(u64::MAX).as_i64(), None);
        assert_eq!(Value::F32(1.0).as_i64(), None);
        assert!((Value::U16(3).as_f64() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn wire_type_tag() {
        assert_eq!(Value::U16(1).wire_type(), WireType::Uint16);
        assert_eq!(Value::F64(0.5).wire_type(), WireType::Float64);
    }

    #[test]
    fn display_is_plain_number() {
        assert_eq!(Value::I32(-42).to_string(), "-42");
        assert_eq!(Value::F64(2.5).to_string(), "2.5");
    }
}
