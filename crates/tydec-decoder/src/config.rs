use tydec_types::EndianPolicy;

/// Configuration for a [`TypedDecoder`](crate::TypedDecoder).
///
/// ```text
/// ┌────────────────┬──────────────────────────────────────────────────┐
/// │ Field          │ Purpose                                          │
/// ├────────────────┼──────────────────────────────────────────────────┤
/// │ endianness     │ Default byte order for multi-byte decodes        │
/// │ signed_order   │ Byte order rule for int16/int32/int64            │
/// │ max_string_len │ Cap on NUL-terminated string reads               │
/// └────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// `endianness` is resolved once when the decoder is built. An `Auto`
/// policy becomes the host's byte order at that point and stays fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Default byte order. Per-call overrides take precedence.
    pub endianness: EndianPolicy,

    /// How signed multi-byte integers pick their byte order.
    pub signed_order: SignedByteOrder,

    /// Maximum number of bytes an unsized (NUL-terminated) string read
    /// may accumulate before failing, not counting the terminator. `None`
    /// reads until the terminator or end of data.
    pub max_string_len: Option<usize>,
}

impl DecoderConfig {
    /// Default configuration with a fixed byte order policy.
    #[must_use]
    pub fn with_endianness(endianness: impl Into<EndianPolicy>) -> Self {
        Self {
            endianness: endianness.into(),
            ..Self::default()
        }
    }
}

/// Byte order rule for the signed multi-byte decoders.
///
/// ```text
/// ┌──────────┬──────────────────────┬──────────────────────────────┐
/// │ Decoder  │ Legacy               │ Resolved                     │
/// ├──────────┼──────────────────────┼──────────────────────────────┤
/// │ int16    │ always little-endian │ decoder default              │
/// │ int32    │ host order           │ decoder default              │
/// │ int64    │ host order           │ decoder default              │
/// │ array /  │ host order for       │ resolved order for every     │
/// │ timestamp│ signed element types │ element type                 │
/// └──────────┴──────────────────────┴──────────────────────────────┘
/// ```
///
/// `Legacy` keeps byte-exact compatibility with existing consumers of
/// this layout. The unsigned and float decoders always honor the
/// resolved order regardless of this setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignedByteOrder {
    #[default]
    Legacy,
    Resolved,
}
