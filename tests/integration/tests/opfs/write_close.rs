use crate::test_utils::{create, init_tracing, read_file};
use anyhow::Result;
use opfs_mock::{CreateWritableOptions, StorageManager};
use pretty_assertions::assert_eq;

/// Writes are buffered by the stream and only become visible
/// once the stream is closed.
#[tokio::test]
async fn opfs_write_close() -> Result<()> {
    init_tracing();

    let storage = StorageManager::default();
    let root = storage.get_directory().await;
    let file = root.get_file_handle("greeting.txt", create()).await?;

    let mut stream =
        file.create_writable(CreateWritableOptions::default()).await?;
    stream.write("Hello").await?;
    stream.write(" World!").await?;
    assert!(read_file(&file).await?.is_empty());

    stream.close().await?;

    let snapshot = file.get_file().await?;
    assert_eq!("Hello World!", snapshot.text());
    assert_eq!(12, snapshot.size());
    assert_eq!("greeting.txt", snapshot.name());

    Ok(())
}

/// A stream opened with `keepExistingData` appends to the
/// committed contents.
#[tokio::test]
async fn opfs_write_keep_existing_data() -> Result<()> {
    let storage = StorageManager::default();
    let root = storage.get_directory().await;
    let file =
        crate::test_utils::write_file(&root, "log.txt", "one\n").await?;

    let options: CreateWritableOptions =
        serde_json::from_value(serde_json::json!({"keepExistingData": true}))?;
    let mut stream = file.create_writable(options).await?;
    stream.write("two\n").await?;
    stream.close().await?;

    assert_eq!(b"one\ntwo\n".to_vec(), read_file(&file).await?);
    Ok(())
}
