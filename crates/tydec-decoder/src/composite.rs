use chrono::{DateTime, Utc};
use tracing::debug;
use tydec_stream::{ByteStream, StreamError};
use tydec_types::{Endianness, Value, WireType};

use crate::decoder::TypedDecoder;
use crate::error::DecodeError;

impl<S: ByteStream> TypedDecoder<S> {
    /// Decode a Unix timestamp (seconds since the epoch, UTC) stored as an
    /// unsigned 32-bit integer.
    ///
    /// # Errors
    ///
    /// Same as [`timestamp`](Self::timestamp).
    pub fn timestamp_default(
        &mut self,
        order: Option<Endianness>,
    ) -> Result<DateTime<Utc>, DecodeError> {
        self.timestamp(WireType::Uint32, order)
    }

    /// Decode one integer of type `ty` and interpret it as Unix seconds.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidArgument`] if `ty` is a float type.
    /// - [`DecodeError::Stream`] if the stream is exhausted.
    /// - [`DecodeError::TimestampOutOfRange`] if the value cannot be a
    ///   UTC date.
    pub fn timestamp(
        &mut self,
        ty: WireType,
        order: Option<Endianness>,
    ) -> Result<DateTime<Utc>, DecodeError> {
        if !ty.is_integer() {
            debug!(%ty, "rejecting float timestamp type");
            return Err(DecodeError::invalid_argument(
                "timestamp",
                format!("{ty} is not an integer type"),
            ));
        }

        let format = self.format_for(ty, self.resolve(order));
        let value = self.decode_with(format)?;
        let out_of_range = || DecodeError::TimestampOutOfRange {
            seconds: match value {
                Value::U64(v) => i128::from(v),
                other => other.as_i64().map_or(0, i128::from),
            },
        };

        let seconds = value.as_i64().ok_or_else(out_of_range)?;
        DateTime::from_timestamp(seconds, 0).ok_or_else(out_of_range)
    }

    /// Decode `size` consecutive values of type `ty`.
    ///
    /// All `size * ty.width()` bytes are read in one go, then split and
    /// interpreted with the format for `ty` under the resolved order.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidArgument`] if `size` is zero or the byte
    ///   count overflows. Nothing is read.
    /// - [`DecodeError::Stream`] if the stream is exhausted.
    pub fn array(
        &mut self,
        size: usize,
        ty: WireType,
        order: Option<Endianness>,
    ) -> Result<Vec<Value>, DecodeError> {
        if size == 0 {
            debug!(%ty, "rejecting empty array read");
            return Err(DecodeError::invalid_argument("array", "size must be positive"));
        }
        let total = size.checked_mul(ty.width()).ok_or_else(|| {
            DecodeError::invalid_argument("array", format!("{size} x {ty} overflows"))
        })?;

        let format = self.format_for(ty, self.resolve(order));
        let bytes = self.read(total)?;
        Ok(bytes
            .chunks_exact(format.width())
            .map(|chunk| format.decode(chunk))
            .collect())
    }

    /// Read one raw byte as a character (the byte value is the code
    /// point).
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if the stream is exhausted.
    pub fn char(&mut self) -> Result<char, DecodeError> {
        Ok(char::from(self.uint8()?))
    }

    /// Read a string as raw bytes.
    ///
    /// ```text
    ///   size = None      read until a single NUL, which is consumed and
    ///                    dropped
    ///   size = Some(n)   read exactly n bytes, then strip every trailing
    ///                    NUL
    /// ```
    ///
    /// # Errors
    ///
    /// - [`DecodeError::Stream`] if the stream ends before `n` bytes or
    ///   before a terminator.
    /// - [`DecodeError::StringTooLong`] if an unsized read passes
    ///   `max_string_len` without a terminator.
    pub fn raw_string(&mut self, size: Option<usize>) -> Result<Vec<u8>, DecodeError> {
        match size {
            Some(n) => {
                let mut bytes = self.read(n)?;
                let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
                bytes.truncate(end);
                Ok(bytes)
            }
            None => self.read_terminated(),
        }
    }

    /// Read a string and validate it as UTF-8.
    ///
    /// Same framing as [`raw_string`](Self::raw_string).
    ///
    /// # Errors
    ///
    /// Everything [`raw_string`](Self::raw_string) returns, plus
    /// [`DecodeError::InvalidUtf8`].
    pub fn string(&mut self, size: Option<usize>) -> Result<String, DecodeError> {
        let offset = self.offset();
        let bytes = self.raw_string(size)?;
        String::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { offset })
    }

    /// Read `bytes` bytes as `bytes * 8` flags, most significant bit first.
    ///
    /// ```text
    ///   0xB0 = 1011_0000  →  [true, false, true, true, false, false, false, false]
    /// ```
    ///
    /// # Errors
    ///
    /// [`DecodeError::Stream`] if fewer than `bytes` bytes remain.
    pub fn bitmask(&mut self, bytes: usize) -> Result<Vec<bool>, DecodeError> {
        let raw = self.read(bytes)?;
        Ok(raw
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |bit| byte & (1 << bit) != 0))
            .collect())
    }

    fn read_terminated(&mut self) -> Result<Vec<u8>, DecodeError> {
        let start = self.offset();
        let mut buf = Vec::new();

        loop {
            // Unterminated at end of data
            if self.is_completed() {
                return Err(StreamError::ReadFailure {
                    requested: 1,
                    available: 0,
                    offset: self.offset(),
                }
                .into());
            }

            let byte = self.uint8()?;
            if byte == 0 {
                return Ok(buf);
            }

            // The limit counts string bytes; the terminator is free
            if let Some(limit) = self.config.max_string_len
                && buf.len() >= limit
            {
                debug!(limit, offset = start, "rejecting unterminated string");
                return Err(DecodeError::StringTooLong {
                    limit,
                    offset: start,
                });
            }
            buf.push(byte);
        }
    }
}
