//! Growable byte buffer backing a single file.
use crate::{Error, Result};

/// Largest length a buffer can be addressed up to.
pub(crate) const MAX_LEN: usize = isize::MAX as usize;

/// Owned byte buffer that zero fills when it grows.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ByteBuffer(Vec<u8>);

impl ByteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Default::default()
    }

    /// Length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Determine if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Buffer contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Consume the buffer and return the contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }

    /// Change the length of the buffer.
    ///
    /// Shrinking drops the tail, growing appends zero bytes and
    /// existing bytes keep their offsets.
    ///
    /// # Errors
    ///
    /// * `OutOfRange` if the new length cannot be allocated, the
    ///   buffer is unchanged.
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        if new_len > self.0.len() {
            self.0.try_reserve(new_len - self.0.len()).map_err(|_| {
                Error::OutOfRange(format!(
                    "length {} is not addressable",
                    new_len
                ))
            })?;
        }
        self.0.resize(new_len, 0);
        Ok(())
    }

    /// Copy bytes starting at `at` into `dst`.
    ///
    /// Returns the number of bytes copied which is zero when `at`
    /// is at or beyond the end of the buffer.
    pub fn read(&self, dst: &mut [u8], at: usize) -> usize {
        if at >= self.0.len() {
            return 0;
        }
        let amount = dst.len().min(self.0.len() - at);
        dst[..amount].copy_from_slice(&self.0[at..at + amount]);
        amount
    }

    /// Write `src` at offset `at`, growing the buffer when
    /// the write extends past the end.
    ///
    /// # Errors
    ///
    /// * `OutOfRange` if the end of the write is not addressable,
    ///   nothing is written.
    pub fn write_at(&mut self, src: &[u8], at: usize) -> Result<usize> {
        let end = at.checked_add(src.len()).ok_or_else(|| {
            Error::OutOfRange(format!(
                "write of {} bytes at {} overflows",
                src.len(),
                at
            ))
        })?;
        if end > self.0.len() {
            self.resize(end)?;
        }
        self.0[at..end].copy_from_slice(src);
        Ok(src.len())
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
