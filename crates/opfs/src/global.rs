//! Process wide root directory and storage installation.
//!
//! A single root directory lives for the whole process. It
//! can be replaced with an empty one by calling [`reset`], after
//! which handles from the old root no longer compare equal
//! to anything reachable from the new root.
use crate::{DirectoryHandle, StorageConfig, StorageManager};
use once_cell::sync::Lazy;
use parking_lot::RwLock;

static ROOT_DIR: Lazy<RwLock<DirectoryHandle>> =
    Lazy::new(|| RwLock::new(DirectoryHandle::new_root()));

/// Handle to the process wide root directory.
pub fn root_directory() -> DirectoryHandle {
    ROOT_DIR.read().clone()
}

/// Replace the process wide root with a fresh, empty directory.
pub fn reset() {
    *ROOT_DIR.write() = DirectoryHandle::new_root();
    tracing::debug!("global::reset");
}

/// Platform object that may expose a storage accessor.
#[derive(Debug, Default)]
pub struct Navigator {
    storage: Option<StorageManager>,
}

impl Navigator {
    /// Create a platform object without a storage accessor.
    pub fn new() -> Self {
        Default::default()
    }

    /// Create a platform object with an existing storage accessor.
    pub fn with_storage(storage: StorageManager) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    /// Storage accessor when one is installed.
    pub fn storage(&self) -> Option<&StorageManager> {
        self.storage.as_ref()
    }
}

/// Install a storage accessor backed by the process wide root.
///
/// Nothing happens when the platform object already has a
/// storage accessor. Returns whether one was installed.
pub fn install(navigator: &mut Navigator, config: StorageConfig) -> bool {
    if navigator.storage.is_some() {
        return false;
    }
    navigator.storage = Some(StorageManager::new_global(config));
    tracing::debug!("global::install");
    true
}
