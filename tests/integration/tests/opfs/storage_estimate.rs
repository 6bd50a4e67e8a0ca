use crate::test_utils::write_file;
use anyhow::Result;
use opfs_mock::{StorageConfig, StorageManager};

/// Usage is the configured base plus the length of every file.
#[tokio::test]
async fn opfs_storage_estimate() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("storage.toml");
    std::fs::write(&path, "baseUsage = 100\nquota = 1048576\n")?;

    let config = StorageConfig::load(&path).await?;
    let storage = StorageManager::new(config);
    let root = storage.get_directory().await;

    write_file(&root, "data.bin", [1u8, 2, 3, 4]).await?;

    let estimate = storage.estimate().await;
    assert!(estimate.usage >= 104);
    assert_eq!(1048576, estimate.quota);

    let value = serde_json::to_value(estimate)?;
    assert_eq!(serde_json::json!({"usage": 104, "quota": 1048576}), value);

    Ok(())
}
