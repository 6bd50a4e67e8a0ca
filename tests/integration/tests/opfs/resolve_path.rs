use crate::test_utils::{create, write_file};
use anyhow::Result;
use opfs_mock::StorageManager;
use pretty_assertions::assert_eq;

/// Resolve finds entries by identity and returns the names
/// of every directory on the way down.
#[tokio::test]
async fn opfs_resolve_path() -> Result<()> {
    let storage = StorageManager::default();
    let root = storage.get_directory().await;

    let dir = root.get_directory_handle("dir", create()).await?;
    let sub = dir.get_directory_handle("sub", create()).await?;
    let file = write_file(&sub, "notes.md", "# Notes").await?;

    assert_eq!(
        Some(vec!["dir".to_owned(), "sub".to_owned(), "notes.md".to_owned()]),
        root.resolve(&file).await,
    );
    assert_eq!(Some(Vec::<String>::new()), sub.resolve(&sub).await);

    // Same name in a sibling directory is a different entry
    let other = root.get_directory_handle("other", create()).await?;
    let decoy = write_file(&other, "notes.md", "# Notes").await?;
    assert!(sub.resolve(&decoy).await.is_none());
    assert_eq!(
        Some(vec!["other".to_owned(), "notes.md".to_owned()]),
        root.resolve(&decoy).await,
    );

    // Removed entries are no longer reachable
    root.remove_entry("dir", opfs_mock::RemoveOptions { recursive: true })
        .await?;
    assert!(root.resolve(&file).await.is_none());

    Ok(())
}
