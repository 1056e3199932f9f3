use tydec_stream::StreamError;

/// Errors that can occur while decoding typed values.
///
/// Read failures from the stream pass through untouched; the remaining
/// variants are rejections the decoder makes itself, before or after
/// touching the stream.
///
/// ```text
///   DecodeError
///   ├── Stream(StreamError)     ← short read, unreadable source, bad seek
///   ├── InvalidArgument         ← e.g. zero-length array, float timestamp
///   ├── InvalidUtf8             ← string bytes are not UTF-8
///   ├── StringTooLong           ← unsized string ran past max_string_len
///   └── TimestampOutOfRange     ← seconds not representable as a UTC time
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The underlying stream could not satisfy the operation.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// The call itself was malformed. Nothing was read.
    #[error("invalid argument to {operation}: {reason}")]
    InvalidArgument {
        operation: &'static str,
        reason: String,
    },

    /// A string read produced bytes that are not valid UTF-8.
    ///
    /// The bytes have been consumed. Use `raw_string` to get at them.
    #[error("invalid UTF-8 in string starting at offset {offset}")]
    InvalidUtf8 { offset: u64 },

    /// A NUL-terminated string did not terminate within the configured
    /// limit.
    #[error("string starting at offset {offset} exceeds {limit} bytes without a terminator")]
    StringTooLong { limit: usize, offset: u64 },

    /// The decoded integer is outside the range of representable UTC
    /// timestamps.
    #[error("timestamp {seconds} is out of range")]
    TimestampOutOfRange { seconds: i128 },
}

impl DecodeError {
    /// `true` when the stream ran out of data (or was unreadable).
    #[must_use]
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Stream(inner) if inner.is_read_failure())
    }

    pub(crate) fn invalid_argument(operation: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            operation,
            reason: reason.into(),
        }
    }
}
