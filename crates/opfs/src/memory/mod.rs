//! Entry tree backed by in-memory buffers.
use async_recursion::async_recursion;
use indexmap::IndexMap;
use parking_lot::{Mutex as SyncMutex, MutexGuard};
use std::{fmt, sync::Arc};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

mod buffer;

pub use buffer::ByteBuffer;
pub(crate) use buffer::MAX_LEN;

/// Identity token for an entry.
///
/// Unique within the process and independent of the entry
/// name, two entries created with the same name never compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(Uuid);

impl EntryId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mutable state of a file.
#[derive(Debug)]
pub(crate) struct FileState {
    pub(crate) contents: ByteBuffer,
    last_modified: OffsetDateTime,
    locked: bool,
}

impl FileState {
    pub fn last_modified(&self) -> OffsetDateTime {
        self.last_modified
    }

    /// Stamp the modification time.
    ///
    /// The timestamp never moves backwards.
    pub fn touch(&mut self) {
        let now = OffsetDateTime::now_utc();
        if now > self.last_modified {
            self.last_modified = now;
        }
    }

    /// Replace the contents and stamp the modification time.
    pub fn commit(&mut self, contents: ByteBuffer) {
        self.contents = contents;
        self.touch();
    }
}

/// File node.
#[derive(Debug)]
pub(crate) struct MemoryFile {
    id: EntryId,
    name: String,
    state: SyncMutex<FileState>,
}

impl MemoryFile {
    pub fn new(name: String) -> Self {
        Self {
            id: EntryId::new(),
            name,
            state: SyncMutex::new(FileState {
                contents: ByteBuffer::new(),
                last_modified: OffsetDateTime::now_utc(),
                locked: false,
            }),
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> MutexGuard<'_, FileState> {
        self.state.lock()
    }

    /// Length of the committed contents.
    pub fn len(&self) -> usize {
        self.state.lock().contents.len()
    }

    pub fn is_locked(&self) -> bool {
        self.state.lock().locked
    }

    /// Set the access lock.
    ///
    /// Returns false if the lock is already held.
    pub fn acquire_access(&self) -> bool {
        let mut state = self.state.lock();
        if state.locked {
            false
        } else {
            state.locked = true;
            true
        }
    }

    pub fn release_access(&self) {
        self.state.lock().locked = false;
    }
}

/// Children of a directory.
///
/// Files and directories are kept in separate collections, both
/// in insertion order, and listed files first.
#[derive(Debug, Default)]
pub(crate) struct Children {
    files: IndexMap<String, Arc<MemoryFile>>,
    directories: IndexMap<String, Arc<MemoryDir>>,
}

impl Children {
    pub fn file(&self, name: &str) -> Option<Arc<MemoryFile>> {
        self.files.get(name).map(Arc::clone)
    }

    pub fn directory(&self, name: &str) -> Option<Arc<MemoryDir>> {
        self.directories.get(name).map(Arc::clone)
    }

    pub fn insert_file(&mut self, fd: Arc<MemoryFile>) {
        self.files.insert(fd.name().to_owned(), fd);
    }

    pub fn insert_directory(&mut self, fd: Arc<MemoryDir>) {
        self.directories.insert(fd.name().to_owned(), fd);
    }

    pub fn remove_file(&mut self, name: &str) -> Option<Arc<MemoryFile>> {
        self.files.shift_remove(name)
    }

    pub fn remove_directory(&mut self, name: &str) -> Option<Arc<MemoryDir>> {
        self.directories.shift_remove(name)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.directories.is_empty()
    }

    /// Child at a position in listing order.
    pub fn get_index(&self, index: usize) -> Option<MemoryFd> {
        if index < self.files.len() {
            self.files
                .get_index(index)
                .map(|(_, fd)| MemoryFd::File(Arc::clone(fd)))
        } else {
            self.directories
                .get_index(index - self.files.len())
                .map(|(_, fd)| MemoryFd::Dir(Arc::clone(fd)))
        }
    }

    /// All children in listing order.
    pub fn list(&self) -> Vec<MemoryFd> {
        self.files
            .values()
            .map(|fd| MemoryFd::File(Arc::clone(fd)))
            .chain(
                self.directories
                    .values()
                    .map(|fd| MemoryFd::Dir(Arc::clone(fd))),
            )
            .collect()
    }
}

/// Directory node.
#[derive(Debug)]
pub(crate) struct MemoryDir {
    id: EntryId,
    name: String,
    children: RwLock<Children>,
}

impl MemoryDir {
    pub fn new(name: String) -> Self {
        Self {
            id: EntryId::new(),
            name,
            children: Default::default(),
        }
    }

    /// Root directories have an empty name.
    pub fn new_root() -> Self {
        Self::new(String::new())
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &RwLock<Children> {
        &self.children
    }
}

/// Entry in the tree.
#[derive(Debug, Clone)]
pub(crate) enum MemoryFd {
    /// File variant.
    File(Arc<MemoryFile>),
    /// Directory variant.
    Dir(Arc<MemoryDir>),
}

impl MemoryFd {
    pub fn id(&self) -> EntryId {
        match self {
            Self::File(fd) => fd.id(),
            Self::Dir(fd) => fd.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File(fd) => fd.name(),
            Self::Dir(fd) => fd.name(),
        }
    }
}

/// Depth first search below `dir` for the entry with the `target`
/// identity.
///
/// On success `path` holds the names from `dir` down to the target.
#[async_recursion]
pub(crate) async fn walk(
    dir: Arc<MemoryDir>,
    target: EntryId,
    path: &mut Vec<String>,
) -> bool {
    let children = dir.children().read().await.list();
    for child in children {
        path.push(child.name().to_owned());
        if child.id() == target {
            return true;
        }
        if let MemoryFd::Dir(sub) = child {
            if walk(sub, target, path).await {
                return true;
            }
        }
        path.pop();
    }
    false
}

/// Sum of the lengths of all files reachable from `dir`.
#[async_recursion]
pub(crate) async fn usage(dir: Arc<MemoryDir>) -> u64 {
    let children = dir.children().read().await.list();
    let mut total = 0u64;
    for child in children {
        total += match child {
            MemoryFd::File(fd) => fd.len() as u64,
            MemoryFd::Dir(sub) => usage(sub).await,
        };
    }
    total
}
