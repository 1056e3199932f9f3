use bytes::Bytes;

use crate::error::StreamError;
use crate::stream::{ByteStream, checked_target};

/// An in-memory [`ByteStream`] over an immutable byte buffer.
///
/// The buffer is a [`Bytes`] handle, so cloning a `MemoryStream` is cheap
/// and each clone keeps its own cursor. This is the backing store for
/// sub-streams produced by slicing a decoder.
///
/// ```text
///   data:   [ 0x01 0x02 0x03 0x04 0x05 ]
///   pos:                  ^ 2
///   remaining() == 3
/// ```
///
/// The cursor may be placed past the end of the data (seek or move);
/// reads from there fail with [`StreamError::ReadFailure`] reporting zero
/// bytes available.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStream {
    data: Bytes,
    pos: u64,
}

impl MemoryStream {
    /// Create a stream over `data`, positioned at offset 0.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Copy `data` into a freshly allocated buffer.
    ///
    /// The resulting stream shares nothing with the caller's slice.
    #[must_use]
    pub fn copy_from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Total number of bytes in the backing buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        usize::try_from(self.pos)
            .map_or(0, |pos| self.data.len().saturating_sub(pos))
    }

    /// Consume the stream and return its backing buffer.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}

impl From<Vec<u8>> for MemoryStream {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<&[u8]> for MemoryStream {
    fn from(data: &[u8]) -> Self {
        Self::copy_from_slice(data)
    }
}

impl From<Bytes> for MemoryStream {
    fn from(data: Bytes) -> Self {
        Self::new(data)
    }
}

impl ByteStream for MemoryStream {
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        let available = self.remaining();
        if available < buf.len() {
            return Err(StreamError::ReadFailure {
                requested: buf.len(),
                available,
                offset: self.pos,
            });
        }

        if buf.is_empty() {
            return Ok(());
        }

        // remaining() >= buf.len() > 0 implies pos fits in usize
        #[allow(clippy::cast_possible_truncation)]
        let start = self.pos as usize;
        buf.copy_from_slice(&self.data[start..start + buf.len()]);
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn seek(&mut self, offset: u64) -> Result<u64, StreamError> {
        self.pos = offset;
        Ok(self.pos)
    }

    fn move_by(&mut self, delta: i64) -> Result<u64, StreamError> {
        self.pos = checked_target(self.pos, delta)?;
        Ok(self.pos)
    }

    fn is_completed(&self) -> bool {
        self.remaining() == 0
    }

    fn offset(&self) -> u64 {
        self.pos
    }
}
