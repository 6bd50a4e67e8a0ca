//! File handles and immutable file snapshots.
use crate::{
    memory::MemoryFile, CreateWritableOptions, EntryId, Error,
    FileSystemHandle, HandleKind, Result, SyncAccessHandle,
    WritableFileStream,
};
use bytes::Bytes;
use std::{fmt, sync::Arc};
use time::OffsetDateTime;

/// Immutable sequence of bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Blob {
    contents: Bytes,
    mime_type: String,
}

impl Blob {
    /// Create a blob from bytes and a MIME type.
    pub fn new(contents: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    /// MIME type, empty when unknown.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Contents of the blob.
    pub fn bytes(&self) -> Bytes {
        self.contents.clone()
    }

    /// Contents decoded as UTF-8.
    ///
    /// Invalid sequences are replaced with `U+FFFD`.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents).into_owned()
    }

    /// Blob over a sub range of this blob.
    ///
    /// Bounds are clamped to the size of the blob.
    pub fn slice(&self, start: usize, end: usize) -> Blob {
        let end = end.min(self.contents.len());
        let start = start.min(end);
        Blob {
            contents: self.contents.slice(start..end),
            mime_type: String::new(),
        }
    }
}

impl From<File> for Blob {
    fn from(value: File) -> Self {
        value.blob
    }
}

/// Point in time snapshot of a file.
///
/// Later writes to the file do not change a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    blob: Blob,
    name: String,
    last_modified: OffsetDateTime,
}

impl File {
    /// Name of the file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Modification time in milliseconds since the UNIX epoch.
    pub fn last_modified(&self) -> i64 {
        (self.last_modified.unix_timestamp_nanos() / 1_000_000) as i64
    }

    /// Modification time.
    pub fn modified(&self) -> OffsetDateTime {
        self.last_modified
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.blob.size()
    }

    /// Contents of the file.
    pub fn bytes(&self) -> Bytes {
        self.blob.bytes()
    }

    /// Contents decoded as UTF-8.
    pub fn text(&self) -> String {
        self.blob.text()
    }

    /// Blob view of the contents.
    pub fn as_blob(&self) -> &Blob {
        &self.blob
    }
}

/// Handle to a file entry.
#[derive(Clone)]
pub struct FileHandle {
    fd: Arc<MemoryFile>,
}

impl FileHandle {
    pub(crate) fn new(fd: Arc<MemoryFile>) -> Self {
        Self { fd }
    }

    /// Snapshot of the committed contents.
    pub async fn get_file(&self) -> Result<File> {
        let state = self.fd.state();
        Ok(File {
            blob: Blob::new(state.contents.as_slice().to_vec(), ""),
            name: self.fd.name().to_owned(),
            last_modified: state.last_modified(),
        })
    }

    /// Open a buffered stream that commits when closed.
    ///
    /// Any number of streams may be open at once, the last
    /// one to close determines the contents.
    pub async fn create_writable(
        &self,
        options: CreateWritableOptions,
    ) -> Result<WritableFileStream> {
        tracing::debug!(
            name = %self.fd.name(),
            keep_existing_data = options.keep_existing_data,
            "file::create_writable",
        );
        Ok(WritableFileStream::new(Arc::clone(&self.fd), options))
    }

    /// Open an exclusive handle that reads and writes the
    /// committed contents directly.
    pub async fn create_sync_access_handle(&self) -> Result<SyncAccessHandle> {
        if !self.fd.acquire_access() {
            return Err(Error::AlreadyLocked(self.fd.name().to_owned()));
        }
        tracing::debug!(name = %self.fd.name(), "file::create_sync_access_handle");
        Ok(SyncAccessHandle::new(Arc::clone(&self.fd)))
    }

    /// Determine if a synchronous access handle is open.
    pub fn is_locked(&self) -> bool {
        self.fd.is_locked()
    }
}

impl FileSystemHandle for FileHandle {
    fn kind(&self) -> HandleKind {
        HandleKind::File
    }

    fn name(&self) -> &str {
        self.fd.name()
    }

    fn entry_id(&self) -> EntryId {
        self.fd.id()
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.fd.name())
            .field("id", &self.fd.id())
            .finish()
    }
}
