//! Exclusive synchronous access to the contents of a file.
use crate::{
    memory::{MemoryFile, MAX_LEN},
    Error, Result,
};
use std::{fmt, sync::Arc};

/// Options for reads and writes on an access handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadWriteOptions {
    /// Byte offset for the operation.
    pub at: u64,
}

impl ReadWriteOptions {
    /// Options for an operation at the given offset.
    pub fn at(at: u64) -> Self {
        Self { at }
    }
}

/// Handle that reads and writes the committed contents of
/// a file directly.
///
/// While a handle is open the file is locked and no other handle
/// can be created for it. The lock is released by [`close`] or when
/// the handle is dropped.
///
/// [`close`]: SyncAccessHandle::close
pub struct SyncAccessHandle {
    file: Arc<MemoryFile>,
    closed: bool,
}

impl SyncAccessHandle {
    pub(crate) fn new(file: Arc<MemoryFile>) -> Self {
        Self {
            file,
            closed: false,
        }
    }

    /// Size of the file in bytes.
    pub fn get_size(&self) -> Result<u64> {
        self.ensure_open()?;
        Ok(self.file.len() as u64)
    }

    /// Read into `dst` from the offset in `options`.
    ///
    /// Returns the number of bytes read which is zero when the
    /// offset is at or beyond the end of the file.
    pub fn read(
        &self,
        dst: &mut [u8],
        options: ReadWriteOptions,
    ) -> Result<usize> {
        self.ensure_open()?;
        let Ok(at) = usize::try_from(options.at) else {
            return Ok(0);
        };
        Ok(self.file.state().contents.read(dst, at))
    }

    /// Write `src` at the offset in `options`.
    pub fn write(
        &mut self,
        src: &[u8],
        options: ReadWriteOptions,
    ) -> Result<usize> {
        self.ensure_open()?;
        let at = to_offset(options.at)?;
        // End of the write must be addressable too
        to_offset(options.at.saturating_add(src.len() as u64))?;
        let mut state = self.file.state();
        let written = state.contents.write_at(src, at)?;
        state.touch();
        tracing::trace!(
            name = %self.file.name(),
            at = at,
            length = written,
            "access_handle::write",
        );
        Ok(written)
    }

    /// Resize the file.
    pub fn truncate(&mut self, size: u64) -> Result<()> {
        self.ensure_open()?;
        let size = to_offset(size)?;
        let mut state = self.file.state();
        state.contents.resize(size)?;
        state.touch();
        Ok(())
    }

    /// Writes are immediate so this only checks the handle is open.
    pub fn flush(&self) -> Result<()> {
        self.ensure_open()
    }

    /// Close the handle and release the lock on the file.
    pub fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.file.release_access();
            tracing::debug!(name = %self.file.name(), "access_handle::close");
        }
    }

    /// Determine if the handle has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::Closed)
        } else {
            Ok(())
        }
    }
}

impl Drop for SyncAccessHandle {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for SyncAccessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncAccessHandle")
            .field("name", &self.file.name())
            .field("closed", &self.closed)
            .finish()
    }
}

fn to_offset(value: u64) -> Result<usize> {
    usize::try_from(value)
        .ok()
        .filter(|offset| *offset <= MAX_LEN)
        .ok_or_else(|| {
            Error::OutOfRange(format!("offset {} is not addressable", value))
        })
}
