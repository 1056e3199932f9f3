/// Failures surfaced by a [`ByteStream`](crate::ByteStream).
///
/// Read and seek failures carry the stream offset at which the operation
/// was attempted, so a decode failure deep inside a payload can be traced
/// back to the exact byte position. `NotReadable` has no position: the
/// source refused the read before one was consulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamError {
    /// Fewer than `requested` bytes remained at `offset`.
    #[error("read failure: requested {requested} bytes at offset {offset}, {available} available")]
    ReadFailure {
        requested: usize,
        available: usize,
        offset: u64,
    },

    /// The source is not open for reading.
    #[error("stream is not open for reading")]
    NotReadable,

    /// A seek or relative move would land before offset 0 or overflow.
    #[error("seek out of range: {delta:+} from offset {offset}")]
    SeekOutOfRange { offset: u64, delta: i128 },
}

impl StreamError {
    /// True for the short-read family, the one failure every decode
    /// operation can produce.
    #[must_use]
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::ReadFailure { .. } | Self::NotReadable)
    }
}
