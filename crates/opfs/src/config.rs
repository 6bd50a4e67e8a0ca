//! Storage configuration.
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default storage quota in bytes.
pub const DEFAULT_QUOTA: u64 = 1 << 30;

/// Configuration for a storage manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StorageConfig {
    /// Usage reported before any files are counted.
    pub base_usage: u64,
    /// Quota reported by estimates.
    pub quota: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            base_usage: 0,
            quota: DEFAULT_QUOTA,
        }
    }
}

impl StorageConfig {
    /// Load a configuration from a TOML file.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::from_toml_str(&contents)
    }

    /// Parse a configuration from a TOML string.
    ///
    /// Missing fields take their default values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
