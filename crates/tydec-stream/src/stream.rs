use crate::error::StreamError;

/// A positioned source of raw bytes.
///
/// This is the whole contract the typed decoder consumes. Implementors
/// own the cursor; every successful read advances it by exactly the
/// number of bytes returned.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────┐
/// │ Operation    │ Contract                                      │
/// ├──────────────┼───────────────────────────────────────────────┤
/// │ read_into    │ fill the whole buffer or fail with ReadFailure│
/// │ seek         │ absolute positioning, returns new offset      │
/// │ rewind       │ seek(0)                                       │
/// │ move_by      │ relative positioning, returns new offset      │
/// │ is_completed │ true iff no bytes remain                      │
/// │ offset       │ current absolute position                     │
/// └──────────────┴───────────────────────────────────────────────┘
/// ```
///
/// Seeking past the end of the data is allowed. Reads from such a
/// position fail, and `is_completed` reports `true`.
pub trait ByteStream {
    /// Fill `buf` completely from the current offset.
    ///
    /// # Errors
    ///
    /// [`StreamError::ReadFailure`] when fewer than `buf.len()` bytes
    /// remain. The cursor does not move on failure.
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError>;

    /// Move the cursor to the absolute `offset`.
    ///
    /// # Errors
    ///
    /// Implementations that cannot address `offset` return
    /// [`StreamError::SeekOutOfRange`].
    fn seek(&mut self, offset: u64) -> Result<u64, StreamError>;

    /// Move the cursor by `delta` bytes relative to its current position.
    ///
    /// # Errors
    ///
    /// [`StreamError::SeekOutOfRange`] if the target would be negative.
    fn move_by(&mut self, delta: i64) -> Result<u64, StreamError>;

    /// `true` when no further bytes can be read.
    fn is_completed(&self) -> bool;

    /// Current absolute position.
    fn offset(&self) -> u64;

    /// Read exactly `n` bytes into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Same as [`read_into`](Self::read_into).
    fn read(&mut self, n: usize) -> Result<Vec<u8>, StreamError> {
        let mut buf = vec![0u8; n];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    /// Equivalent to `seek(0)`.
    ///
    /// # Errors
    ///
    /// Propagates the failure of the underlying seek.
    fn rewind(&mut self) -> Result<(), StreamError> {
        self.seek(0).map(|_| ())
    }
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        (**self).read_into(buf)
    }

    fn seek(&mut self, offset: u64) -> Result<u64, StreamError> {
        (**self).seek(offset)
    }

    fn move_by(&mut self, delta: i64) -> Result<u64, StreamError> {
        (**self).move_by(delta)
    }

    fn is_completed(&self) -> bool {
        (**self).is_completed()
    }

    fn offset(&self) -> u64 {
        (**self).offset()
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>, StreamError> {
        (**self).read(n)
    }

    fn rewind(&mut self) -> Result<(), StreamError> {
        (**self).rewind()
    }
}

impl<S: ByteStream + ?Sized> ByteStream for Box<S> {
    fn read_into(&mut self, buf: &mut [u8]) -> Result<(), StreamError> {
        (**self).read_into(buf)
    }

    fn seek(&mut self, offset: u64) -> Result<u64, StreamError> {
        (**self).seek(offset)
    }

    fn move_by(&mut self, delta: i64) -> Result<u64, StreamError> {
        (**self).move_by(delta)
    }

    fn is_completed(&self) -> bool {
        (**self).is_completed()
    }

    fn offset(&self) -> u64 {
        (**self).offset()
    }

    fn read(&mut self, n: usize) -> Result<Vec<u8>, StreamError> {
        (**self).read(n)
    }

    fn rewind(&mut self) -> Result<(), StreamError> {
        (**self).rewind()
    }
}

/// Compute `offset + delta`, rejecting results below zero.
///
/// Shared by implementors of [`ByteStream::move_by`].
///
/// # Errors
///
/// [`StreamError::SeekOutOfRange`] if the target is negative or does not
/// fit in a `u64`.
pub fn checked_target(offset: u64, delta: i64) -> Result<u64, StreamError> {
    let target = i128::from(offset) + i128::from(delta);
    u64::try_from(target).map_err(|_| StreamError::SeekOutOfRange {
        offset,
        delta: i128::from(delta),
    })
}
