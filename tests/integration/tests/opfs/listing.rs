use crate::test_utils::{create, write_file};
use anyhow::Result;
use futures::StreamExt;
use opfs_mock::{FileSystemHandle, Handle, StorageManager};
use pretty_assertions::assert_eq;

/// Children are listed files first, each kind in creation order.
#[tokio::test]
async fn opfs_listing() -> Result<()> {
    let storage = StorageManager::default();
    let root = storage.get_directory().await;

    root.get_directory_handle("photos", create()).await?;
    write_file(&root, "b.txt", "b").await?;
    root.get_directory_handle("music", create()).await?;
    write_file(&root, "a.txt", "a").await?;

    let entries: Vec<(String, Handle)> = root.entries().collect().await;
    let listing: Vec<(String, &str)> = entries
        .iter()
        .map(|(name, handle)| (name.clone(), handle.kind().as_str()))
        .collect();
    assert_eq!(
        vec![
            ("b.txt".to_owned(), "file"),
            ("a.txt".to_owned(), "file"),
            ("photos".to_owned(), "directory"),
            ("music".to_owned(), "directory"),
        ],
        listing,
    );

    // Iteration can be restarted
    let first: Vec<String> = root.keys().collect().await;
    let second: Vec<String> = root.keys().collect().await;
    assert_eq!(first, second);

    let files = root
        .values()
        .filter_map(|handle| async move {
            match handle {
                Handle::File(file) => Some(file),
                Handle::Directory(_) => None,
            }
        })
        .collect::<Vec<_>>()
        .await;
    assert_eq!(2, files.len());
    assert_eq!("b", files[0].get_file().await?.text());

    Ok(())
}
