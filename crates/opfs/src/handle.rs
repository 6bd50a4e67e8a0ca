//! Behaviour shared by file and directory handles.
use crate::{DirectoryHandle, EntryId, FileHandle};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entry a handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl HandleKind {
    /// Tests whether this kind represents a regular file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }

    /// Tests whether this kind represents a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, Self::Directory)
    }

    /// Kind as the string `"file"` or `"directory"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Access mode for a permission query.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionMode {
    /// Read access.
    #[default]
    Read,
    /// Read and write access.
    ReadWrite,
}

/// Descriptor for a permission query.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct PermissionDescriptor {
    /// Requested access mode.
    pub mode: PermissionMode,
}

/// Result of a permission query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Access is granted.
    Granted,
    /// Access is denied.
    Denied,
    /// The user would be prompted.
    Prompt,
}

/// Operations common to file and directory handles.
///
/// Permissions are not modelled so every query is granted.
#[async_trait]
pub trait FileSystemHandle: Send + Sync {
    /// Kind of the entry.
    fn kind(&self) -> HandleKind;

    /// Name of the entry.
    fn name(&self) -> &str;

    /// Identity token of the entry.
    fn entry_id(&self) -> EntryId;

    /// Determine if both handles refer to the same entry.
    async fn is_same_entry(&self, other: &dyn FileSystemHandle) -> bool {
        self.kind() == other.kind() && self.entry_id() == other.entry_id()
    }

    /// Query the permission state for this handle.
    async fn query_permission(
        &self,
        _descriptor: PermissionDescriptor,
    ) -> PermissionState {
        PermissionState::Granted
    }

    /// Request permission for this handle.
    async fn request_permission(
        &self,
        _descriptor: PermissionDescriptor,
    ) -> PermissionState {
        PermissionState::Granted
    }
}

/// Handle to either a file or a directory.
#[derive(Debug, Clone)]
pub enum Handle {
    /// File handle.
    File(FileHandle),
    /// Directory handle.
    Directory(DirectoryHandle),
}

impl Handle {
    /// File handle if this is a file.
    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(handle) => Some(handle),
            Self::Directory(_) => None,
        }
    }

    /// Directory handle if this is a directory.
    pub fn as_directory(&self) -> Option<&DirectoryHandle> {
        match self {
            Self::File(_) => None,
            Self::Directory(handle) => Some(handle),
        }
    }
}

impl FileSystemHandle for Handle {
    fn kind(&self) -> HandleKind {
        match self {
            Self::File(handle) => handle.kind(),
            Self::Directory(handle) => handle.kind(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::File(handle) => handle.name(),
            Self::Directory(handle) => handle.name(),
        }
    }

    fn entry_id(&self) -> EntryId {
        match self {
            Self::File(handle) => handle.entry_id(),
            Self::Directory(handle) => handle.entry_id(),
        }
    }
}

impl From<FileHandle> for Handle {
    fn from(value: FileHandle) -> Self {
        Self::File(value)
    }
}

impl From<DirectoryHandle> for Handle {
    fn from(value: DirectoryHandle) -> Self {
        Self::Directory(value)
    }
}
