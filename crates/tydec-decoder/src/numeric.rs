use tydec_stream::ByteStream;
use tydec_types::wire_type::{sign_extend_8, sign_extend_16};
use tydec_types::{Endianness, Format, Value, WireType};

use crate::config::SignedByteOrder;
use crate::decoder::TypedDecoder;
use crate::error::DecodeError;

// Primitive numeric decoders.
//
// Each reads exactly `WireType::width` bytes. The unsigned and float
// decoders take an optional byte order override; the signed ones follow
// `SignedByteOrder` instead (see config.rs for the table).

impl<S: ByteStream> TypedDecoder<S> {
    /// Read one byte as a signed integer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if the stream is exhausted.
    pub fn int8(&mut self) -> Result<i8, DecodeError> {
        let [byte] = self.take::<1>()?;
        Ok(sign_extend_8(byte))
    }

    /// Read one byte as an unsigned integer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if the stream is exhausted.
    pub fn uint8(&mut self) -> Result<u8, DecodeError> {
        let [byte] = self.take::<1>()?;
        Ok(byte)
    }

    /// Read a signed 16-bit integer.
    ///
    /// Under [`SignedByteOrder::Legacy`] the two bytes are always assembled
    /// little-endian (`low | high << 8`), whatever the decoder default is.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 2 bytes remain.
    pub fn int16(&mut self) -> Result<i16, DecodeError> {
        let [first, second] = self.take::<2>()?;
        let raw = match self.int16_order() {
            Endianness::Little => u16::from(first) | (u16::from(second) << 8),
            Endianness::Big => (u16::from(first) << 8) | u16::from(second),
        };
        Ok(sign_extend_16(raw))
    }

    /// Read an unsigned 16-bit integer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 2 bytes remain.
    pub fn uint16(&mut self, order: Option<Endianness>) -> Result<u16, DecodeError> {
        let bytes = self.take::<2>()?;
        Ok(match self.resolve(order) {
            Endianness::Little => u16::from_le_bytes(bytes),
            Endianness::Big => u16::from_be_bytes(bytes),
        })
    }

    /// Read a signed 32-bit integer in the host's byte order
    /// ([`SignedByteOrder::Legacy`]) or the decoder default
    /// ([`SignedByteOrder::Resolved`]).
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 4 bytes remain.
    pub fn int32(&mut self) -> Result<i32, DecodeError> {
        let bytes = self.take::<4>()?;
        Ok(match self.config.signed_order {
            SignedByteOrder::Legacy => i32::from_ne_bytes(bytes),
            SignedByteOrder::Resolved => match self.endianness {
                Endianness::Little => i32::from_le_bytes(bytes),
                Endianness::Big => i32::from_be_bytes(bytes),
            },
        })
    }

    /// Read an unsigned 32-bit integer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 4 bytes remain.
    pub fn uint32(&mut self, order: Option<Endianness>) -> Result<u32, DecodeError> {
        let bytes = self.take::<4>()?;
        Ok(match self.resolve(order) {
            Endianness::Little => u32::from_le_bytes(bytes),
            Endianness::Big => u32::from_be_bytes(bytes),
        })
    }

    /// Read a signed 64-bit integer. Byte order follows the same rule as
    /// [`int32`](Self::int32).
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 8 bytes remain.
    pub fn int64(&mut self) -> Result<i64, DecodeError> {
        let bytes = self.take::<8>()?;
        Ok(match self.config.signed_order {
            SignedByteOrder::Legacy => i64::from_ne_bytes(bytes),
            SignedByteOrder::Resolved => match self.endianness {
                Endianness::Little => i64::from_le_bytes(bytes),
                Endianness::Big => i64::from_be_bytes(bytes),
            },
        })
    }

    /// Read an unsigned 64-bit integer.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 8 bytes remain.
    pub fn uint64(&mut self, order: Option<Endianness>) -> Result<u64, DecodeError> {
        let bytes = self.take::<8>()?;
        Ok(match self.resolve(order) {
            Endianness::Little => u64::from_le_bytes(bytes),
            Endianness::Big => u64::from_be_bytes(bytes),
        })
    }

    /// Read an IEEE-754 single precision float.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 4 bytes remain.
    pub fn float32(&mut self, order: Option<Endianness>) -> Result<f32, DecodeError> {
        let bytes = self.take::<4>()?;
        Ok(match self.resolve(order) {
            Endianness::Little => f32::from_le_bytes(bytes),
            Endianness::Big => f32::from_be_bytes(bytes),
        })
    }

    /// Read an IEEE-754 double precision float.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than 8 bytes remain.
    pub fn float64(&mut self, order: Option<Endianness>) -> Result<f64, DecodeError> {
        let bytes = self.take::<8>()?;
        Ok(match self.resolve(order) {
            Endianness::Little => f64::from_le_bytes(bytes),
            Endianness::Big => f64::from_be_bytes(bytes),
        })
    }

    /// Decode one value of a runtime-selected type.
    ///
    /// Uses the same format table as [`array`](Self::array), so signed
    /// types follow the signed byte order rule rather than `order`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than `ty.width()` bytes remain.
    pub fn value(&mut self, ty: WireType, order: Option<Endianness>) -> Result<Value, DecodeError> {
        let format = self.format_for(ty, self.resolve(order));
        self.decode_with(format)
    }

    pub(crate) fn decode_with(&mut self, format: Format) -> Result<Value, DecodeError> {
        let mut buf = [0u8; 8];
        let bytes = &mut buf[..format.width()];
        self.stream.read_into(bytes)?;
        Ok(format.decode(bytes))
    }

    fn int16_order(&self) -> Endianness {
        match self.config.signed_order {
            SignedByteOrder::Legacy => Endianness::Little,
            SignedByteOrder::Resolved => self.endianness,
        }
    }
}

#[cfg(test)]
mod tests {
    use tydec_stream::MemoryStream;

    use super::*;
    use crate::config::DecoderConfig;

    fn decoder(bytes: &[u8]) -> TypedDecoder<MemoryStream> {
        TypedDecoder::new(MemoryStream::from(bytes))
    }

    fn resolved(bytes: &[u8], order: Endianness) -> TypedDecoder<MemoryStream> {
        let config = DecoderConfig {
            signed_order: SignedByteOrder::Resolved,
            ..DecoderConfig::with_endianness(order)
        };
        TypedDecoder::from_config(MemoryStream::from(bytes), config)
    }

    #[test]
    fn uint8_and_int8_every_byte() {
        for b in 0u8..=255 {
            assert_eq!(decoder(&[b]).uint8().unwrap(), b);
            let expected = if b >= 0x80 {
                i16::from(b) - 256
            } else {
                i16::from(b)
            };
            assert_eq!(i16::from(decoder(&[b]).int8().unwrap()), expected);
        }
    }

    #[test]
    fn int16_ignores_configured_order() {
        for order in [Endianness::Little, Endianness::Big] {
            let mut d =
                TypedDecoder::with_endian_policy(MemoryStream::from(&[0x01u8, 0x80][..]), order);
            assert_eq!(d.int16().unwrap(), -32767);
        }
    }

    #[test]
    fn int16_positive() {
        assert_eq!(decoder(&[0xFF, 0x7F]).int16().unwrap(), 32767);
    }

    #[test]
    fn int16_resolved_uses_default() {
        assert_eq!(
            resolved(&[0x80, 0x01], Endianness::Big).int16().unwrap(),
            -32767
        );
    }

    #[test]
    fn uint16_both_orders() {
        assert_eq!(
            decoder(&[0x34, 0x12]).uint16(Some(Endianness::Little)).unwrap(),
            0x1234
        );
        assert_eq!(
            decoder(&[0x34, 0x12]).uint16(Some(Endianness::Big)).unwrap(),
            0x3412
        );
    }

    #[test]
    fn uint32_both_orders() {
        let bytes = [0x78, 0x56, 0x34, 0x12];
        assert_eq!(
            decoder(&bytes).uint32(Some(Endianness::Little)).unwrap(),
            0x1234_5678
        );
        assert_eq!(
            decoder(&bytes).uint32(Some(Endianness::Big)).unwrap(),
            0x7856_3412
        );
    }

    #[test]
    fn uint32_falls_back_to_default() {
        let bytes = [0x00, 0x00, 0x00, 0x2A];
        let mut d =
            TypedDecoder::with_endian_policy(MemoryStream::from(&bytes[..]), Endianness::Big);
        assert_eq!(d.uint32(None).unwrap(), 42);
    }

    #[test]
    fn int32_uses_host_order() {
        let bytes = (-123_456_i32).to_ne_bytes();
        let mut d =
            TypedDecoder::with_endian_policy(MemoryStream::from(&bytes[..]), Endianness::Big);
        assert_eq!(d.int32().unwrap(), -123_456);
    }

    #[test]
    fn int64_uses_host_order() {
        let bytes = i64::MIN.to_ne_bytes();
        assert_eq!(decoder(&bytes).int64().unwrap(), i64::MIN);
    }

    #[test]
    fn signed_resolved_follow_default() {
        let bytes = (-2_i32).to_be_bytes();
        assert_eq!(resolved(&bytes, Endianness::Big).int32().unwrap(), -2);
        let bytes = (-3_i64).to_le_bytes();
        assert_eq!(resolved(&bytes, Endianness::Little).int64().unwrap(), -3);
    }

    #[test]
    fn uint64_both_orders() {
        let bytes = 0x0102_0304_0506_0708_u64.to_be_bytes();
        let big = decoder(&bytes).uint64(Some(Endianness::Big)).unwrap();
        let little = decoder(&bytes).uint64(Some(Endianness::Little)).unwrap();
        assert_eq!(big, 0x0102_0304_0506_0708);
        assert_eq!(little, 0x0807_0605_0403_0201);
    }

    #[test]
    fn floats_honor_order() {
        let bytes = 3.25f32.to_be_bytes();
        let single = decoder(&bytes).float32(Some(Endianness::Big)).unwrap();
        assert!((single - 3.25).abs() < f32::EPSILON);

        let bytes = (-0.5f64).to_le_bytes();
        let double = decoder(&bytes).float64(Some(Endianness::Little)).unwrap();
        assert!((double + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn short_reads_fail() {
        assert!(decoder(&[]).uint8().unwrap_err().is_read_failure());
        assert!(decoder(&[1]).int16().unwrap_err().is_read_failure());
        let short = decoder(&[1, 2, 3]).uint32(None).unwrap_err();
        assert!(short.is_read_failure());
        let short = decoder(&[0; 7]).float64(None).unwrap_err();
        assert!(short.is_read_failure());
    }

    #[test]
    fn failed_read_does_not_advance() {
        let mut d = decoder(&[1, 2, 3]);
        assert!(d.uint32(None).is_err());
        assert_eq!(d.offset(), 0);
        assert_eq!(d.uint8().unwrap(), 1);
    }

    #[test]
    fn value_dispatches_on_type() {
        let mut d = decoder(&[0x01, 0x00, 0xFF]);
        assert_eq!(
            d.value(WireType::Uint16, Some(Endianness::Little)).unwrap(),
            Value::U16(1)
        );
        assert_eq!(d.value(WireType::Int8, None).unwrap(), Value::I8(-1));
    }
}
