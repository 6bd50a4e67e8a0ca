//! Storage accessor over a root directory.
use crate::{global, memory, DirectoryHandle, StorageConfig};
use serde::Serialize;
use std::sync::Arc;

/// Estimate of the storage used and available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageEstimate {
    /// Configured base usage plus the length of every file
    /// reachable from the root.
    pub usage: u64,
    /// Configured quota.
    pub quota: u64,
}

#[derive(Debug, Clone)]
enum Root {
    /// Root owned by this manager.
    Owned(DirectoryHandle),
    /// Process wide root, read on every call so a reset is observed.
    Global,
}

/// Storage accessor exposing the root directory.
#[derive(Debug, Clone)]
pub struct StorageManager {
    root: Root,
    config: StorageConfig,
}

impl Default for StorageManager {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl StorageManager {
    /// Create a storage manager with a fresh root directory.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            root: Root::Owned(DirectoryHandle::new_root()),
            config,
        }
    }

    /// Create a storage manager backed by the process wide root.
    pub fn new_global(config: StorageConfig) -> Self {
        Self {
            root: Root::Global,
            config,
        }
    }

    /// Configuration for this manager.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Root directory.
    pub async fn get_directory(&self) -> DirectoryHandle {
        match &self.root {
            Root::Owned(root) => root.clone(),
            Root::Global => global::root_directory(),
        }
    }

    /// Estimate usage and quota.
    pub async fn estimate(&self) -> StorageEstimate {
        let root = self.get_directory().await;
        let files = memory::usage(Arc::clone(root.fd())).await;
        StorageEstimate {
            usage: self.config.base_usage + files,
            quota: self.config.quota,
        }
    }

    /// Request persistence, always granted.
    pub async fn persist(&self) -> bool {
        true
    }

    /// Determine if storage is persisted, always true.
    pub async fn persisted(&self) -> bool {
        true
    }
}
