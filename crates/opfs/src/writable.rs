//! Buffered writable stream over a file.
//!
//! Edits accumulate in a private working copy and are committed
//! to the file when the stream is closed. Aborting discards the
//! working copy.
use crate::{memory::MemoryFile, Blob, ByteBuffer, Error, File, Result};
use serde::Deserialize;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Options for opening a writable stream.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateWritableOptions {
    /// Seed the stream with the current contents of the file
    /// and start the cursor at the end.
    pub keep_existing_data: bool,
}

/// Data that can be written to a stream.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WriteData {
    /// Text encoded as UTF-8.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Contents of a blob.
    #[serde(skip_deserializing)]
    Blob(Blob),
}

impl WriteData {
    fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Bytes(bytes) => bytes,
            Self::Blob(blob) => blob.bytes().to_vec(),
        }
    }
}

/// Structured write command.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WriteParams {
    /// Write data, optionally moving the cursor first.
    Write {
        /// Data to write, nothing is written when absent.
        #[serde(default)]
        data: Option<WriteData>,
        /// Position to write at.
        #[serde(default)]
        position: Option<i64>,
    },
    /// Move the cursor.
    Seek {
        /// New cursor position.
        #[serde(default)]
        position: Option<i64>,
    },
    /// Resize the working buffer.
    Truncate {
        /// New size in bytes.
        #[serde(default)]
        size: Option<i64>,
    },
}

/// Input accepted by [`WritableFileStream::write`].
#[derive(Debug, Clone)]
pub enum WriteChunk {
    /// Data written at the cursor.
    Data(WriteData),
    /// Structured command.
    Params(WriteParams),
}

impl WriteChunk {
    /// Parse a chunk from a loosely typed value.
    ///
    /// Strings are written as text, arrays as bytes and objects
    /// are read as a command with a `type` of `write`, `seek`
    /// or `truncate`. Anything else, including `null`, is rejected.
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::Data(WriteData::Text(text))),
            Value::Array(_) => {
                let bytes: Vec<u8> = serde_json::from_value(value)
                    .map_err(|e| Error::InvalidArgument(e.to_string()))?;
                Ok(Self::Data(WriteData::Bytes(bytes)))
            }
            Value::Object(_) => {
                let params: WriteParams = serde_json::from_value(value)
                    .map_err(|e| Error::InvalidArgument(e.to_string()))?;
                Ok(Self::Params(params))
            }
            Value::Null => Err(Error::InvalidArgument(
                "write chunk is undefined".to_owned(),
            )),
            other => Err(Error::InvalidArgument(format!(
                "unsupported write chunk {}",
                other
            ))),
        }
    }
}

impl From<&str> for WriteChunk {
    fn from(value: &str) -> Self {
        Self::Data(WriteData::Text(value.to_owned()))
    }
}

impl From<String> for WriteChunk {
    fn from(value: String) -> Self {
        Self::Data(WriteData::Text(value))
    }
}

impl From<&[u8]> for WriteChunk {
    fn from(value: &[u8]) -> Self {
        Self::Data(WriteData::Bytes(value.to_vec()))
    }
}

impl From<Vec<u8>> for WriteChunk {
    fn from(value: Vec<u8>) -> Self {
        Self::Data(WriteData::Bytes(value))
    }
}

impl From<Blob> for WriteChunk {
    fn from(value: Blob) -> Self {
        Self::Data(WriteData::Blob(value))
    }
}

impl From<File> for WriteChunk {
    fn from(value: File) -> Self {
        Self::Data(WriteData::Blob(value.into()))
    }
}

impl From<WriteData> for WriteChunk {
    fn from(value: WriteData) -> Self {
        Self::Data(value)
    }
}

impl From<WriteParams> for WriteChunk {
    fn from(value: WriteParams) -> Self {
        Self::Params(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Open,
    Closed,
    Aborted(Option<String>),
}

/// Stream that buffers edits to a file and commits them on close.
pub struct WritableFileStream {
    file: Arc<MemoryFile>,
    state: State,
    contents: ByteBuffer,
    cursor: usize,
}

impl WritableFileStream {
    pub(crate) fn new(
        file: Arc<MemoryFile>,
        options: CreateWritableOptions,
    ) -> Self {
        let contents = if options.keep_existing_data {
            file.state().contents.clone()
        } else {
            ByteBuffer::new()
        };
        let cursor = contents.len();
        Self {
            file,
            state: State::Open,
            contents,
            cursor,
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> u64 {
        self.cursor as u64
    }

    /// Size of the uncommitted working buffer.
    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    /// Determine if the stream has been closed.
    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Determine if the stream has been aborted.
    pub fn is_aborted(&self) -> bool {
        matches!(self.state, State::Aborted(_))
    }

    /// Write a chunk or execute a command.
    pub async fn write(&mut self, chunk: impl Into<WriteChunk>) -> Result<()> {
        self.ensure_open()?;
        match chunk.into() {
            WriteChunk::Data(data) => {
                self.write_bytes(self.cursor, &data.into_bytes())
            }
            WriteChunk::Params(WriteParams::Write { data, position }) => {
                let position = position
                    .map(|position| to_offset(position, "position"))
                    .transpose()
                    .map_err(Error::InvalidArgument)?;
                let Some(data) = data else {
                    return Ok(());
                };
                self.write_bytes(
                    position.unwrap_or(self.cursor),
                    &data.into_bytes(),
                )
            }
            WriteChunk::Params(WriteParams::Seek { position }) => {
                let position = position.ok_or_else(|| {
                    Error::InvalidArgument(
                        "seek requires a position".to_owned(),
                    )
                })?;
                self.cursor = to_offset(position, "position")
                    .map_err(Error::InvalidArgument)?;
                Ok(())
            }
            WriteChunk::Params(WriteParams::Truncate { size }) => {
                let size = size.ok_or_else(|| {
                    Error::InvalidArgument(
                        "truncate requires a size".to_owned(),
                    )
                })?;
                let size =
                    to_offset(size, "size").map_err(Error::InvalidArgument)?;
                self.resize(size)
            }
        }
    }

    /// Move the cursor.
    ///
    /// Negative positions are rejected.
    pub async fn seek(&mut self, position: i64) -> Result<()> {
        self.ensure_open()?;
        self.cursor =
            to_offset(position, "position").map_err(Error::OutOfRange)?;
        Ok(())
    }

    /// Resize the working buffer.
    ///
    /// The cursor is clamped to the new size. Negative sizes
    /// are rejected.
    pub async fn truncate(&mut self, size: i64) -> Result<()> {
        self.ensure_open()?;
        let size = to_offset(size, "size").map_err(Error::OutOfRange)?;
        self.resize(size)
    }

    /// Discard the working buffer.
    ///
    /// The committed contents of the file are not changed. Later
    /// writes fail and report the reason.
    pub async fn abort(&mut self, reason: Option<&str>) -> Result<()> {
        if self.state == State::Open {
            tracing::debug!(
                name = %self.file.name(),
                reason = ?reason,
                "writable::abort",
            );
            self.state = State::Aborted(reason.map(|r| r.to_owned()));
            self.contents = ByteBuffer::new();
            self.cursor = 0;
        }
        Ok(())
    }

    /// Commit the working buffer as the contents of the file.
    pub async fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        let contents = std::mem::take(&mut self.contents);
        tracing::debug!(
            name = %self.file.name(),
            length = contents.len(),
            "writable::close",
        );
        self.file.state().commit(contents);
        self.state = State::Closed;
        Ok(())
    }

    fn ensure_open(&self) -> Result<()> {
        match &self.state {
            State::Open => Ok(()),
            State::Closed => {
                Err(Error::InvalidState("stream is closed".to_owned()))
            }
            State::Aborted(reason) => Err(Error::Aborted(reason.clone())),
        }
    }

    /// Cursor only moves once the write has succeeded.
    fn write_bytes(&mut self, at: usize, bytes: &[u8]) -> Result<()> {
        tracing::trace!(
            position = at,
            length = bytes.len(),
            "writable::write",
        );
        let written = self.contents.write_at(bytes, at)?;
        self.cursor = at + written;
        Ok(())
    }

    fn resize(&mut self, size: usize) -> Result<()> {
        self.contents.resize(size)?;
        if self.cursor > size {
            self.cursor = size;
        }
        Ok(())
    }
}

impl fmt::Debug for WritableFileStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WritableFileStream")
            .field("name", &self.file.name())
            .field("state", &self.state)
            .field("cursor", &self.cursor)
            .field("size", &self.contents.len())
            .finish()
    }
}

/// Convert a caller supplied value to a buffer offset.
fn to_offset(value: i64, field: &str) -> std::result::Result<usize, String> {
    if value < 0 {
        return Err(format!("{} must not be negative, got {}", field, value));
    }
    usize::try_from(value)
        .map_err(|_| format!("{} {} is not addressable", field, value))
}
