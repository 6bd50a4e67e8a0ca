use crate::test_utils::{create, write_file};
use anyhow::Result;
use opfs_mock::{
    install, reset, root_directory, FileSystemHandle, Navigator,
    StorageConfig, StorageManager,
};
use pretty_assertions::assert_eq;

/// Installing attaches a storage accessor backed by the process
/// wide root and reset replaces that root with an empty one.
///
/// Kept as a single test because the root is shared by
/// every test in this binary that calls into it.
#[tokio::test]
async fn opfs_install_reset() -> Result<()> {
    let mut navigator = Navigator::new();
    assert!(navigator.storage().is_none());
    assert!(install(&mut navigator, StorageConfig::default()));

    // Existing accessors are left alone
    assert!(!install(
        &mut navigator,
        StorageConfig {
            base_usage: 5,
            ..Default::default()
        }
    ));
    let storage = navigator.storage().cloned().expect("storage installed");
    assert_eq!(0, storage.config().base_usage);

    let root = storage.get_directory().await;
    assert!(root.is_same_entry(&root_directory()).await);

    let file = write_file(&root, "state.json", "{}").await?;
    assert_eq!(2, storage.estimate().await.usage);

    reset();

    let fresh = storage.get_directory().await;
    assert!(!fresh.is_same_entry(&root).await);
    assert!(fresh.resolve(&file).await.is_none());
    assert!(fresh
        .get_file_handle("state.json", Default::default())
        .await
        .is_err());
    assert_eq!(0, storage.estimate().await.usage);

    // Handles from the old root keep working on detached entries
    assert_eq!("{}", file.get_file().await?.text());
    root.get_directory_handle("late", create()).await?;
    assert!(fresh.resolve(&root).await.is_none());

    // A navigator with its own accessor keeps it
    let mut custom = Navigator::with_storage(StorageManager::default());
    assert!(!install(&mut custom, StorageConfig::default()));
    let own = custom.storage().expect("storage present");
    assert!(!own
        .get_directory()
        .await
        .is_same_entry(&root_directory())
        .await);

    Ok(())
}
