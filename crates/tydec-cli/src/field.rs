//! Field specs for `tydec read`: a tiny command-line language for naming
//! one decode operation each.
//!
//! ```text
//! ┌──────────────────┬───────────────────────────────────────────────┐
//! │ Spec             │ Operation                                     │
//! ├──────────────────┼───────────────────────────────────────────────┤
//! │ i8 u8 i16 ...    │ scalar of that wire type                      │
//! │ char             │ one raw byte as a character                   │
//! │ cstr             │ NUL-terminated string                         │
//! │ str:N            │ N-byte string, trailing NULs stripped         │
//! │ time[:TYPE]      │ Unix timestamp, u32 unless TYPE is given      │
//! │ bits:N           │ N bytes of MSB-first flags                    │
//! │ array:N:TYPE     │ N values of TYPE                              │
//! │ skip:N           │ move forward N bytes                          │
//! │ peek:SPEC        │ decode SPEC without consuming it              │
//! └──────────────────┴───────────────────────────────────────────────┘
//! ```
//!
//! Multi-byte unsigned and float scalars, `time` and `array` may end in
//! `@le` or `@be` to override the byte order for that field. Signed
//! scalars follow the decoder's signed byte order rule, and single-byte or
//! byte-string fields have no byte order; all of these reject an override.
use std::fmt;
use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tydec_decoder::{ByteStream, Endianness, TypedDecoder, Value, WireType};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(WireType),
    Char,
    CString,
    Str(usize),
    Time(WireType),
    Bits(usize),
    Array(usize, WireType),
    Skip(usize),
    Peek(Box<FieldSpec>),
}

impl FieldKind {
    /// Whether an `@le`/`@be` suffix changes how this field decodes.
    ///
    /// Signed scalars follow the decoder's signed byte order rule, and
    /// byte-oriented fields have no order at all.
    fn takes_byte_order(&self) -> bool {
        match self {
            Self::Scalar(ty) => !ty.is_signed() && ty.width() > 1,
            Self::Time(_) | Self::Array(..) => true,
            Self::Char
            | Self::CString
            | Self::Str(_)
            | Self::Bits(_)
            | Self::Skip(_)
            | Self::Peek(_) => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub kind: FieldKind,
    pub order: Option<Endianness>,
    /// The spec as the user wrote it, echoed in the output.
    pub label: String,
}

impl FromStr for FieldSpec {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.to_string();

        if let Some(inner) = s.strip_prefix("peek:") {
            let inner: FieldSpec = inner.parse()?;
            return Ok(Self {
                kind: FieldKind::Peek(Box::new(inner)),
                order: None,
                label,
            });
        }

        let (body, order) = match s.rsplit_once('@') {
            Some((body, suffix)) => (body, Some(suffix.parse::<Endianness>()?)),
            None => (s, None),
        };

        let mut parts = body.split(':');
        let head = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let kind = match (head, args.as_slice()) {
            ("char", []) => FieldKind::Char,
            ("cstr", []) => FieldKind::CString,
            ("str", [n]) => FieldKind::Str(parse_count(n)?),
            ("time", []) => FieldKind::Time(WireType::Uint32),
            ("time", [ty]) => FieldKind::Time(ty.parse()?),
            ("bits", [n]) => FieldKind::Bits(parse_count(n)?),
            ("array", [n, ty]) => FieldKind::Array(parse_count(n)?, ty.parse()?),
            ("skip", [n]) => FieldKind::Skip(parse_count(n)?),
            (ty, []) => FieldKind::Scalar(
                ty.parse()
                    .map_err(|_| anyhow!("unknown field spec {s:?}"))?,
            ),
            _ => bail!("malformed field spec {s:?}"),
        };

        if order.is_some() && !kind.takes_byte_order() {
            bail!("{s:?}: {head} takes no byte order override");
        }

        Ok(Self { kind, order, label })
    }
}

fn parse_count(raw: &str) -> Result<usize> {
    raw.parse()
        .map_err(|_| anyhow!("expected a byte or element count, got {raw:?}"))
}

/// One decoded field, shaped for both text and JSON output.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Decoded {
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Time(DateTime<Utc>),
    Flags(Vec<bool>),
    List(Vec<Decoded>),
    Skipped { skipped: usize },
}

impl From<Value> for Decoded {
    fn from(value: Value) -> Self {
        match value {
            Value::I8(v) => Self::Int(i64::from(v)),
            Value::I16(v) => Self::Int(i64::from(v)),
            Value::I32(v) => Self::Int(i64::from(v)),
            Value::I64(v) => Self::Int(v),
            Value::U8(v) => Self::UInt(u64::from(v)),
            Value::U16(v) => Self::UInt(u64::from(v)),
            Value::U32(v) => Self::UInt(u64::from(v)),
            Value::U64(v) => Self::UInt(v),
            Value::F32(v) => Self::Float(f64::from(v)),
            Value::F64(v) => Self::Float(v),
        }
    }
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Time(t) => write!(f, "{}", t.to_rfc3339()),
            Self::Flags(bits) => {
                for (i, bit) in bits.iter().enumerate() {
                    if i > 0 && i % 8 == 0 {
                        f.write_str(" ")?;
                    }
                    f.write_str(if *bit { "1" } else { "0" })?;
                }
                Ok(())
            }
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Skipped { skipped } => write!(f, "(skipped {skipped} bytes)"),
        }
    }
}

/// A decoded field and where it started.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub field: String,
    pub offset: u64,
    pub value: Decoded,
}

/// Decode every spec in order.
///
/// # Errors
///
/// Stops at the first failing field; the error names the field and its
/// offset.
pub fn decode_fields<S: ByteStream>(
    decoder: &mut TypedDecoder<S>,
    specs: &[FieldSpec],
) -> Result<Vec<Record>> {
    specs
        .iter()
        .map(|spec| {
            let offset = decoder.offset();
            let value = decode_field(decoder, spec)
                .map_err(|e| anyhow!("field {:?} at offset {offset}: {e:#}", spec.label))?;
            Ok(Record {
                field: spec.label.clone(),
                offset,
                value,
            })
        })
        .collect()
}

fn decode_field<S: ByteStream>(decoder: &mut TypedDecoder<S>, spec: &FieldSpec) -> Result<Decoded> {
    let order = spec.order;
    let decoded = match &spec.kind {
        FieldKind::Scalar(ty) => decode_scalar(decoder, *ty, order)?,
        FieldKind::Char => Decoded::Text(decoder.char()?.to_string()),
        FieldKind::CString => Decoded::Text(lossy(&decoder.raw_string(None)?)),
        FieldKind::Str(n) => Decoded::Text(lossy(&decoder.raw_string(Some(*n))?)),
        FieldKind::Time(ty) => Decoded::Time(decoder.timestamp(*ty, order)?),
        FieldKind::Bits(n) => Decoded::Flags(decoder.bitmask(*n)?),
        FieldKind::Array(n, ty) => Decoded::List(
            decoder
                .array(*n, *ty, order)?
                .into_iter()
                .map(Decoded::from)
                .collect(),
        ),
        FieldKind::Skip(n) => {
            decoder.skip(*n)?;
            Decoded::Skipped { skipped: *n }
        }
        FieldKind::Peek(inner) => {
            let mut outcome = None;
            decoder.lookahead(|d| {
                outcome = Some(decode_field(d, inner));
                Ok(())
            })?;
            outcome.ok_or_else(|| anyhow!("peek produced no value"))??
        }
    };
    Ok(decoded)
}

fn decode_scalar<S: ByteStream>(
    decoder: &mut TypedDecoder<S>,
    ty: WireType,
    order: Option<Endianness>,
) -> Result<Decoded> {
    let decoded = match ty {
        WireType::Int8 => Decoded::Int(i64::from(decoder.int8()?)),
        WireType::Uint8 => Decoded::UInt(u64::from(decoder.uint8()?)),
        WireType::Int16 => Decoded::Int(i64::from(decoder.int16()?)),
        WireType::Uint16 => Decoded::UInt(u64::from(decoder.uint16(order)?)),
        WireType::Int32 => Decoded::Int(i64::from(decoder.int32()?)),
        WireType::Uint32 => Decoded::UInt(u64::from(decoder.uint32(order)?)),
        WireType::Int64 => Decoded::Int(decoder.int64()?),
        WireType::Uint64 => Decoded::UInt(decoder.uint64(order)?),
        WireType::Float32 => Decoded::Float(f64::from(decoder.float32(order)?)),
        WireType::Float64 => Decoded::Float(decoder.float64(order)?),
    };
    Ok(decoded)
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
