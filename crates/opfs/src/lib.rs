//! Origin private file system emulated in memory.
//!
//! Code written against the origin private file system can be
//! exercised without a persistent backing store. The root directory
//! is obtained from a [`StorageManager`] and child files and
//! directories are navigated by name.
//!
//! Files are mutated through either a [`WritableFileStream`], which
//! buffers edits and commits them when closed, or a
//! [`SyncAccessHandle`], which writes straight to the committed
//! buffer and holds an exclusive lock on the file until closed.
//!
//! ```
//! # async fn run() -> opfs_mock::Result<()> {
//! use opfs_mock::{GetHandleOptions, StorageManager, CreateWritableOptions};
//!
//! let storage = StorageManager::default();
//! let root = storage.get_directory().await;
//! let file = root
//!     .get_file_handle("a.txt", GetHandleOptions { create: true })
//!     .await?;
//! let mut stream =
//!     file.create_writable(CreateWritableOptions::default()).await?;
//! stream.write("Hello").await?;
//! stream.close().await?;
//! assert_eq!("Hello", file.get_file().await?.text());
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod access_handle;
mod config;
mod directory;
mod error;
mod file;
mod global;
mod handle;
mod memory;
mod storage;
mod writable;


pub use access_handle::{ReadWriteOptions, SyncAccessHandle};
pub use config::{StorageConfig, DEFAULT_QUOTA};
pub use directory::{DirectoryHandle, GetHandleOptions, RemoveOptions};
pub use error::Error;
pub use file::{Blob, File, FileHandle};
pub use global::{install, reset, root_directory, Navigator};
pub use handle::{
    FileSystemHandle, Handle, HandleKind, PermissionDescriptor,
    PermissionMode, PermissionState,
};
pub use memory::{ByteBuffer, EntryId};
pub use storage::{StorageEstimate, StorageManager};
pub use writable::{
    CreateWritableOptions, WritableFileStream, WriteChunk, WriteData,
    WriteParams,
};

/// Result type for the in-memory file system.
pub type Result<T> = std::result::Result<T, Error>;
