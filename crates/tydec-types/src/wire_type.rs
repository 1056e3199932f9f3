use std::fmt;
use std::str::FromStr;

use crate::endianness::Endianness;
use crate::error::TypeError;
use crate::value::Value;

/// The closed set of primitive wire types.
///
/// ```text
/// ┌─────────┬───────┬─────────────────────────────────────────┐
/// │ Type    │ Width │ decode_format(order)                    │
/// ├─────────┼───────┼─────────────────────────────────────────┤
/// │ Int8    │ 1     │ single byte, order irrelevant           │
/// │ Uint8   │ 1     │ single byte, order irrelevant           │
/// │ Int16   │ 2     │ host order (signed table)               │
/// │ Uint16  │ 2     │ requested order                         │
/// │ Int32   │ 4     │ host order (signed table)               │
/// │ Uint32  │ 4     │ requested order                         │
/// │ Int64   │ 8     │ host order (signed table)               │
/// │ Uint64  │ 8     │ requested order                         │
/// │ Float32 │ 4     │ requested order                         │
/// │ Float64 │ 8     │ requested order                         │
/// └─────────┴───────┴─────────────────────────────────────────┘
/// ```
///
/// The signed table has no byte-order-specific entries, so signed
/// multi-byte types always unpack in the host's order through
/// [`decode_format`](Self::decode_format). Callers that want signed
/// values in an explicit order build a [`Format`] directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WireType {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
    Float64,
}

impl WireType {
    /// Every wire type, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Int8,
        Self::Uint8,
        Self::Int16,
        Self::Uint16,
        Self::Int32,
        Self::Uint32,
        Self::Int64,
        Self::Uint64,
        Self::Float32,
        Self::Float64,
    ];

    /// Encoded size in bytes. Independent of byte order.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float32 => 4,
            Self::Int64 | Self::Uint64 | Self::Float64 => 8,
        }
    }

    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64)
    }

    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Select the unpack format for this type under `order`.
    #[must_use]
    pub fn decode_format(self, order: Endianness) -> Format {
        let order = if self.is_signed() {
            Endianness::native()
        } else {
            order
        };
        Format::new(self, order)
    }

    /// Short lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "i8",
            Self::Uint8 => "u8",
            Self::Int16 => "i16",
            Self::Uint16 => "u16",
            Self::Int32 => "i32",
            Self::Uint32 => "u32",
            Self::Int64 => "i64",
            Self::Uint64 => "u64",
            Self::Float32 => "f32",
            Self::Float64 => "f64",
        }
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WireType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ty = match s.to_ascii_lowercase().as_str() {
            "i8" | "int8" => Self::Int8,
            "u8" | "uint8" => Self::Uint8,
            "i16" | "int16" => Self::Int16,
            "u16" | "uint16" => Self::Uint16,
            "i32" | "int32" => Self::Int32,
            "u32" | "uint32" => Self::Uint32,
            "i64" | "int64" => Self::Int64,
            "u64" | "uint64" => Self::Uint64,
            "f32" | "float32" | "float" => Self::Float32,
            "f64" | "float64" | "double" => Self::Float64,
            _ => {
                return Err(TypeError::UnknownWireType {
                    name: s.to_string(),
                });
            }
        };
        Ok(ty)
    }
}

/// A concrete unpack recipe: which type, in which byte order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Format {
    pub ty: WireType,
    pub order: Endianness,
}

impl Format {
    #[must_use]
    pub const fn new(ty: WireType, order: Endianness) -> Self {
        Self { ty, order }
    }

    /// Number of bytes [`decode`](Self::decode) consumes.
    #[must_use]
    pub const fn width(self) -> usize {
        self.ty.width()
    }

    /// Interpret exactly `self.width()` bytes as a value.
    ///
    /// # Panics
    ///
    /// Panics if `bytes.len() != self.width()`. Callers slice their
    /// input into width-sized chunks before decoding.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn decode(self, bytes: &[u8]) -> Value {
        assert_eq!(
            bytes.len(),
            self.width(),
            "{} expects {} bytes",
            self.ty,
            self.width()
        );

        match self.ty {
            WireType::Int8 => Value::I8(sign_extend_8(bytes[0])),
            WireType::Uint8 => Value::U8(bytes[0]),
            WireType::Int16 => {
                let raw = self.assemble_u16(bytes);
                Value::I16(sign_extend_16(raw))
            }
            WireType::Uint16 => Value::U16(self.assemble_u16(bytes)),
            WireType::Int32 => Value::I32(self.assemble_u32(bytes) as i32),
            WireType::Uint32 => Value::U32(self.assemble_u32(bytes)),
            WireType::Int64 => Value::I64(self.assemble_u64(bytes) as i64),
            WireType::Uint64 => Value::U64(self.assemble_u64(bytes)),
            WireType::Float32 => Value::F32(f32::from_bits(self.assemble_u32(bytes))),
            WireType::Float64 => Value::F64(f64::from_bits(self.assemble_u64(bytes))),
        }
    }

    fn assemble_u16(self, bytes: &[u8]) -> u16 {
        let raw = [bytes[0], bytes[1]];
        match self.order {
            Endianness::Little => u16::from_le_bytes(raw),
            Endianness::Big => u16::from_be_bytes(raw),
        }
    }

    fn assemble_u32(self, bytes: &[u8]) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(bytes);
        match self.order {
            Endianness::Little => u32::from_le_bytes(raw),
            Endianness::Big => u32::from_be_bytes(raw),
        }
    }

    fn assemble_u64(self, bytes: &[u8]) -> u64 {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(bytes);
        match self.order {
            Endianness::Little => u64::from_le_bytes(raw),
            Endianness::Big => u64::from_be_bytes(raw),
        }
    }
}

/// Two's-complement value of an 8-bit pattern.
///
/// Done by arithmetic (`value - 0x100` when bit 7 is set) rather than a
/// signed reinterpretation.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sign_extend_8(byte: u8) -> i8 {
    let value = i16::from(byte);
    let signed = if value & 0x80 != 0 { value - 0x100 } else { value };
    // -128..=127 after the adjustment
    signed as i8
}

/// Two's-complement value of a 16-bit pattern (`value - 0x1_0000` when
/// bit 15 is set).
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn sign_extend_16(raw: u16) -> i16 {
    let value = i32::from(raw);
    let signed = if value & 0x8000 != 0 {
        value - 0x1_0000
    } else {
        value
    };
    signed as i16
}
