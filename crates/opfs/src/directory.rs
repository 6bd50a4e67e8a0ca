//! Directory handles.
use crate::{
    memory::{walk, Children, MemoryDir, MemoryFd, MemoryFile},
    EntryId, Error, FileHandle, FileSystemHandle, Handle, HandleKind, Result,
};
use futures::stream::{self, BoxStream, StreamExt};
use serde::Deserialize;
use std::{fmt, sync::Arc};

/// Options for looking up a child handle.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct GetHandleOptions {
    /// Create the entry when it does not exist.
    pub create: bool,
}

/// Options for removing a child entry.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct RemoveOptions {
    /// Remove a directory along with everything below it.
    pub recursive: bool,
}

/// Handle to a directory entry.
#[derive(Clone)]
pub struct DirectoryHandle {
    fd: Arc<MemoryDir>,
}

impl DirectoryHandle {
    fn new(fd: Arc<MemoryDir>) -> Self {
        Self { fd }
    }

    /// Create a handle to a new, empty root directory.
    pub(crate) fn new_root() -> Self {
        Self::new(Arc::new(MemoryDir::new_root()))
    }

    pub(crate) fn fd(&self) -> &Arc<MemoryDir> {
        &self.fd
    }

    /// Get a handle to a child file.
    ///
    /// # Errors
    ///
    /// * `TypeMismatch` if a directory has the same name.
    /// * `NotFound` if the file does not exist and `create` is not set.
    pub async fn get_file_handle(
        &self,
        name: &str,
        options: GetHandleOptions,
    ) -> Result<FileHandle> {
        ensure_valid_name(name)?;
        if !options.create {
            let children = self.fd.children().read().await;
            return find_file(&children, name);
        }

        let mut children = self.fd.children().write().await;
        match find_file(&children, name) {
            Err(Error::NotFound(_)) => {
                let fd = Arc::new(MemoryFile::new(name.to_owned()));
                children.insert_file(Arc::clone(&fd));
                tracing::debug!(
                    parent = %self.fd.name(),
                    name = %name,
                    "directory::create_file",
                );
                Ok(FileHandle::new(fd))
            }
            result => result,
        }
    }

    /// Get a handle to a child directory.
    ///
    /// # Errors
    ///
    /// * `TypeMismatch` if a file has the same name.
    /// * `NotFound` if the directory does not exist and `create`
    ///   is not set.
    pub async fn get_directory_handle(
        &self,
        name: &str,
        options: GetHandleOptions,
    ) -> Result<DirectoryHandle> {
        ensure_valid_name(name)?;
        if !options.create {
            let children = self.fd.children().read().await;
            return find_directory(&children, name);
        }

        let mut children = self.fd.children().write().await;
        match find_directory(&children, name) {
            Err(Error::NotFound(_)) => {
                let fd = Arc::new(MemoryDir::new(name.to_owned()));
                children.insert_directory(Arc::clone(&fd));
                tracing::debug!(
                    parent = %self.fd.name(),
                    name = %name,
                    "directory::create_dir",
                );
                Ok(DirectoryHandle::new(fd))
            }
            result => result,
        }
    }

    /// Remove a child entry.
    ///
    /// Files are always removed. A directory that has children is
    /// only removed when the `recursive` option is set, in which
    /// case everything below it becomes unreachable.
    pub async fn remove_entry(
        &self,
        name: &str,
        options: RemoveOptions,
    ) -> Result<()> {
        ensure_valid_name(name)?;
        let mut children = self.fd.children().write().await;

        if children.remove_file(name).is_some() {
            tracing::debug!(
                parent = %self.fd.name(),
                name = %name,
                "directory::remove_file",
            );
            return Ok(());
        }

        if let Some(dir) = children.directory(name) {
            if !options.recursive && !dir.children().read().await.is_empty() {
                return Err(Error::NotEmpty(name.to_owned()));
            }
            children.remove_directory(name);
            tracing::debug!(
                parent = %self.fd.name(),
                name = %name,
                recursive = options.recursive,
                "directory::remove_dir",
            );
            return Ok(());
        }

        Err(Error::NotFound(name.to_owned()))
    }

    /// Names from this directory down to the given entry.
    ///
    /// The path is empty when the entry is this directory and `None`
    /// when the entry is not below it. Entries are matched by
    /// identity, never by name.
    pub async fn resolve(
        &self,
        possible_descendant: &dyn FileSystemHandle,
    ) -> Option<Vec<String>> {
        let target = possible_descendant.entry_id();
        if target == self.fd.id() {
            return Some(Vec::new());
        }
        let mut path = Vec::new();
        if walk(Arc::clone(&self.fd), target, &mut path).await {
            Some(path)
        } else {
            None
        }
    }

    /// Stream of the children as name and handle pairs.
    ///
    /// Files are listed before directories, each in the order they
    /// were created. The stream reads the current children at each
    /// step, call again to start over.
    pub fn entries(&self) -> BoxStream<'static, (String, Handle)> {
        stream::unfold(
            (Arc::clone(&self.fd), 0usize),
            |(dir, index)| async move {
                let child = dir.children().read().await.get_index(index);
                child.map(|fd| (into_entry(fd), (dir, index + 1)))
            },
        )
        .boxed()
    }

    /// Stream of the names of the children.
    pub fn keys(&self) -> BoxStream<'static, String> {
        self.entries().map(|(name, _)| name).boxed()
    }

    /// Stream of the handles of the children.
    pub fn values(&self) -> BoxStream<'static, Handle> {
        self.entries().map(|(_, handle)| handle).boxed()
    }
}

impl FileSystemHandle for DirectoryHandle {
    fn kind(&self) -> HandleKind {
        HandleKind::Directory
    }

    fn name(&self) -> &str {
        self.fd.name()
    }

    fn entry_id(&self) -> EntryId {
        self.fd.id()
    }
}

impl fmt::Debug for DirectoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirectoryHandle")
            .field("name", &self.fd.name())
            .field("id", &self.fd.id())
            .finish()
    }
}

fn find_file(children: &Children, name: &str) -> Result<FileHandle> {
    if children.directory(name).is_some() {
        return Err(Error::TypeMismatch(name.to_owned(), HandleKind::File));
    }
    children
        .file(name)
        .map(FileHandle::new)
        .ok_or_else(|| Error::NotFound(name.to_owned()))
}

fn find_directory(children: &Children, name: &str) -> Result<DirectoryHandle> {
    if children.file(name).is_some() {
        return Err(Error::TypeMismatch(
            name.to_owned(),
            HandleKind::Directory,
        ));
    }
    children
        .directory(name)
        .map(DirectoryHandle::new)
        .ok_or_else(|| Error::NotFound(name.to_owned()))
}

fn into_entry(fd: MemoryFd) -> (String, Handle) {
    let name = fd.name().to_owned();
    let handle = match fd {
        MemoryFd::File(fd) => Handle::File(FileHandle::new(fd)),
        MemoryFd::Dir(fd) => Handle::Directory(DirectoryHandle::new(fd)),
    };
    (name, handle)
}

/// Reject names that cannot refer to a single child.
fn ensure_valid_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(Error::InvalidArgument(format!(
            "'{}' is not a valid entry name",
            name
        )));
    }
    Ok(())
}
