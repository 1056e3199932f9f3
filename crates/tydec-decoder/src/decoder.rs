use tydec_stream::ByteStream;
use tydec_types::{EndianPolicy, Endianness, Format, WireType};

use crate::config::{DecoderConfig, SignedByteOrder};
use crate::error::DecodeError;

/// Typed decoder over a [`ByteStream`].
///
/// Every decode method reads a fixed or computed number of bytes from the
/// current stream offset, advances the offset, and returns a typed value.
/// [`lookahead`](Self::lookahead) and [`slice`](Self::slice) are the only
/// operations that step outside this linear model.
///
/// The decoder borrows or owns its stream through the type parameter:
///
/// ```text
///   TypedDecoder<&mut S>         borrowed; dropping the decoder leaves S open
///   TypedDecoder<MemoryStream>   owned; what `slice` returns
/// ```
///
/// # Example
///
/// ```rust
/// use tydec_decoder::{Endianness, MemoryStream, TypedDecoder};
///
/// let mut stream = MemoryStream::from(vec![0x78, 0x56, 0x34, 0x12, b'h', b'i', 0]);
/// let mut decoder = TypedDecoder::new(&mut stream);
///
/// assert_eq!(decoder.uint32(Some(Endianness::Little)).unwrap(), 0x1234_5678);
/// assert_eq!(decoder.string(None).unwrap(), "hi");
/// assert!(decoder.is_completed());
/// ```
#[derive(Debug)]
pub struct TypedDecoder<S> {
    pub(crate) stream: S,
    pub(crate) endianness: Endianness,
    pub(crate) config: DecoderConfig,
}

impl<S: ByteStream> TypedDecoder<S> {
    /// Create a decoder that uses the host's byte order by default.
    pub fn new(stream: S) -> Self {
        Self::from_config(stream, DecoderConfig::default())
    }

    /// Create a decoder with the given default byte order policy.
    pub fn with_endian_policy(stream: S, policy: impl Into<EndianPolicy>) -> Self {
        Self::from_config(stream, DecoderConfig::with_endianness(policy))
    }

    /// Create a decoder from a full configuration.
    ///
    /// An `Auto` endianness policy is resolved here, once.
    pub fn from_config(stream: S, config: DecoderConfig) -> Self {
        Self {
            stream,
            endianness: config.endianness.resolve(),
            config,
        }
    }

    /// A decoder over the same stream with a little-endian default.
    ///
    /// `self` keeps its own default. Both share the stream cursor.
    pub fn with_little_endian(&mut self) -> TypedDecoder<&mut S> {
        self.with_endianness(Endianness::Little)
    }

    /// A decoder over the same stream with a big-endian default.
    pub fn with_big_endian(&mut self) -> TypedDecoder<&mut S> {
        self.with_endianness(Endianness::Big)
    }

    /// A decoder over the same stream with `order` as its default.
    pub fn with_endianness(&mut self, order: Endianness) -> TypedDecoder<&mut S> {
        TypedDecoder {
            stream: &mut self.stream,
            endianness: order,
            config: DecoderConfig {
                endianness: order.into(),
                ..self.config
            },
        }
    }

    /// Consume the decoder, replacing its default byte order.
    #[must_use]
    pub fn into_endianness(self, order: Endianness) -> Self {
        Self {
            endianness: order,
            config: DecoderConfig {
                endianness: order.into(),
                ..self.config
            },
            ..self
        }
    }

    /// The resolved default byte order.
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Pick the byte order for one call: the override if given, the
    /// decoder default otherwise.
    pub fn resolve(&self, explicit: Option<Endianness>) -> Endianness {
        explicit.unwrap_or(self.endianness)
    }

    /// The unpack format for `ty` under `order`, honoring the signed
    /// byte order rule.
    pub fn format_for(&self, ty: WireType, order: Endianness) -> Format {
        match self.config.signed_order {
            SignedByteOrder::Legacy => ty.decode_format(order),
            SignedByteOrder::Resolved => Format::new(ty, order),
        }
    }

    pub fn stream(&self) -> &S {
        &self.stream
    }

    /// Consume the decoder and hand back the stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    // ── Stream adapter ───────────────────────────────────────────────

    /// Read exactly `n` raw bytes.
    ///
    /// # Errors
    ///
    /// [`StreamError::ReadFailure`](tydec_stream::StreamError::ReadFailure)
    /// when fewer than `n` bytes remain.
    pub fn read(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        Ok(self.stream.read(n)?)
    }

    /// Move to the absolute `offset`.
    ///
    /// # Errors
    ///
    /// Propagates the stream's seek failure.
    pub fn seek(&mut self, offset: u64) -> Result<u64, DecodeError> {
        Ok(self.stream.seek(offset)?)
    }

    /// Move back to offset 0.
    ///
    /// # Errors
    ///
    /// Propagates the stream's seek failure.
    pub fn rewind(&mut self) -> Result<(), DecodeError> {
        Ok(self.stream.rewind()?)
    }

    /// Move `delta` bytes relative to the current offset.
    ///
    /// # Errors
    ///
    /// Propagates the stream's failure, e.g. moving before offset 0.
    pub fn move_by(&mut self, delta: i64) -> Result<u64, DecodeError> {
        Ok(self.stream.move_by(delta)?)
    }

    /// Skip `n` bytes forward without reading them.
    ///
    /// # Errors
    ///
    /// [`DecodeError::InvalidArgument`] if `n` does not fit in an `i64`,
    /// otherwise whatever the stream's relative move returns.
    pub fn skip(&mut self, n: usize) -> Result<u64, DecodeError> {
        let delta = i64::try_from(n)
            .map_err(|_| DecodeError::invalid_argument("skip", format!("{n} bytes is too far")))?;
        self.move_by(delta)
    }

    /// `true` when no further bytes are available.
    pub fn is_completed(&self) -> bool {
        self.stream.is_completed()
    }

    /// Current absolute offset in the stream.
    pub fn offset(&self) -> u64 {
        self.stream.offset()
    }

    /// Read exactly `N` bytes into a stack buffer.
    pub(crate) fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.stream.read_into(&mut buf)?;
        Ok(buf)
    }
}
