use tracing::{trace, warn};
use tydec_stream::{ByteStream, MemoryStream};

use crate::decoder::TypedDecoder;
use crate::error::DecodeError;

impl<S: ByteStream> TypedDecoder<S> {
    /// Run `op` against this decoder, then put the cursor back where it
    /// was.
    ///
    /// The offset is restored with an absolute seek on every exit path,
    /// whether `op` returned a value or an error, and however far it read
    /// (past end-of-data included). `op` may nest further lookaheads.
    ///
    /// ```rust
    /// use tydec_decoder::{Endianness, MemoryStream, TypedDecoder};
    ///
    /// let mut decoder = TypedDecoder::new(MemoryStream::from(vec![0x2A, 0, 0, 0]));
    /// let peeked = decoder.lookahead(|d| d.uint32(Some(Endianness::Little))).unwrap();
    /// assert_eq!(peeked, 42);
    /// assert_eq!(decoder.offset(), 0);
    /// ```
    ///
    /// # Errors
    ///
    /// Whatever `op` returns. If the restoring seek itself fails, that
    /// failure is returned instead.
    pub fn lookahead<T, F>(&mut self, op: F) -> Result<T, DecodeError>
    where
        F: FnOnce(&mut Self) -> Result<T, DecodeError>,
    {
        let origin = self.stream.offset();
        let result = op(self);
        let reached = self.stream.offset();

        match self.stream.seek(origin) {
            Ok(_) => {
                trace!(origin, reached, "lookahead restored offset");
                result
            }
            Err(restore) => {
                if let Err(inner) = &result {
                    warn!(
                        origin,
                        error = %inner,
                        "lookahead failed and offset could not be restored"
                    );
                }
                Err(restore.into())
            }
        }
    }

    /// Cut the next `bytes` bytes into an independent decoder.
    ///
    /// The bytes are read normally (this decoder advances by `bytes`) and
    /// copied into a fresh [`MemoryStream`]. The returned decoder starts at
    /// offset 0 with this decoder's configuration and default byte order.
    /// Nothing done to it affects this decoder.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than `bytes` bytes remain; this
    /// decoder does not advance in that case.
    pub fn slice(&mut self, bytes: usize) -> Result<TypedDecoder<MemoryStream>, DecodeError> {
        let start = self.stream.offset();
        let data = self.read(bytes)?;
        trace!(start, len = bytes, "sliced sub-stream");

        Ok(TypedDecoder {
            stream: MemoryStream::from(data),
            endianness: self.endianness,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use tydec_stream::StreamError;
    use tydec_types::{Endianness, WireType};

    use super::*;
    use crate::config::{DecoderConfig, SignedByteOrder};

    /// A stream that refuses every seek, for exercising restore failures.
    struct NoSeek(MemoryStream);

    impl ByteStream for NoSeek {
        fn read_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
            self.0.read_into(buf)
        }

        fn seek(&mut self, offset: u64) -> Result<u64, StreamError> {
            Err(StreamError::SeekOutOfRange {
                offset: self.0.offset(),
                delta: i128::from(offset) - i128::from(self.0.offset()),
            })
        }

        fn move_by(&mut self, delta: i64) -> Result<u64, StreamError> {
            self.0.move_by(delta)
        }

        fn is_completed(&self) -> bool {
            self.0.is_completed()
        }

        fn offset(&self) -> u64 {
            self.0.offset()
        }
    }

    fn decoder(bytes: &[u8]) -> TypedDecoder<MemoryStream> {
        TypedDecoder::new(MemoryStream::from(bytes))
    }

    #[test]
    fn lookahead_restores_offset() {
        let mut d = decoder(&[0x78, 0x56, 0x34, 0x12, 0xFF]);
        let value = d.lookahead(|d| d.uint32(Some(Endianness::Little))).unwrap();
        assert_eq!(value, 0x1234_5678);
        assert_eq!(d.offset(), 0);
        assert_eq!(d.uint8().unwrap(), 0x78);
    }

    #[test]
    fn lookahead_restores_after_error() {
        let mut d = decoder(&[1, 2]);
        d.skip(1).unwrap();
        let err = d.lookahead(|d| d.uint64(None)).unwrap_err();
        assert!(err.is_read_failure());
        assert_eq!(d.offset(), 1);
    }

    #[test]
    fn lookahead_restores_after_seeking_past_end() {
        let mut d = decoder(&[1, 2, 3]);
        d.skip(2).unwrap();
        let _ = d.lookahead(|d| {
            d.seek(100)?;
            d.uint8()
        });
        assert_eq!(d.offset(), 2);
        assert_eq!(d.uint8().unwrap(), 3);
    }

    #[test]
    fn nested_lookahead() {
        let mut d = decoder(&[1, 2, 3, 4]);
        let (outer, inner) = d
            .lookahead(|d| {
                let first = d.uint8()?;
                let peeked = d.lookahead(|d| d.array(2, WireType::Uint8, None))?;
                assert_eq!(d.offset(), 1);
                Ok((first, peeked))
            })
            .unwrap();
        assert_eq!(outer, 1);
        assert_eq!(inner.len(), 2);
        assert_eq!(d.offset(), 0);
    }

    #[test]
    fn lookahead_restore_failure_wins() {
        let mut d = TypedDecoder::new(NoSeek(MemoryStream::from(vec![1, 2, 3])));
        let err = d.lookahead(|d| d.uint8()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Stream(StreamError::SeekOutOfRange { .. })
        ));
    }

    #[test]
    fn slice_is_bounded_and_independent() {
        let mut parent = decoder(&[1, 2, 3, 4, 5, 6]);
        parent.skip(1).unwrap();

        let mut child = parent.slice(4).unwrap();
        assert_eq!(child.offset(), 0);
        assert_eq!(child.read(4).unwrap(), vec![2, 3, 4, 5]);
        assert!(child.uint8().unwrap_err().is_read_failure());

        assert_eq!(parent.offset(), 5);
        assert_eq!(parent.uint8().unwrap(), 6);

        child.rewind().unwrap();
        assert_eq!(child.uint8().unwrap(), 2);
        assert_eq!(parent.offset(), 6);
    }

    #[test]
    fn slice_inherits_configuration() {
        let config = DecoderConfig {
            signed_order: SignedByteOrder::Resolved,
            max_string_len: Some(16),
            ..DecoderConfig::with_endianness(Endianness::Big)
        };
        let mut parent = TypedDecoder::from_config(MemoryStream::from(vec![0x00, 0x2A]), config);
        let mut child = parent.slice(2).unwrap();
        assert_eq!(child.endianness(), Endianness::Big);
        assert_eq!(child.config(), &config);
        assert_eq!(child.uint16(None).unwrap(), 42);
    }

    #[test]
    fn slice_inherits_reborrowed_default() {
        let mut parent = decoder(&[0x00, 0x01]);
        let mut child = parent.with_big_endian().slice(2).unwrap();
        assert_eq!(child.uint16(None).unwrap(), 1);
    }

    #[test]
    fn slice_too_long_leaves_parent() {
        let mut parent = decoder(&[1, 2]);
        assert!(parent.slice(3).unwrap_err().is_read_failure());
        assert_eq!(parent.offset(), 0);
    }
}
