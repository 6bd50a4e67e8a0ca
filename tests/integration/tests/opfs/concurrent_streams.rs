use crate::test_utils::{create, read_file};
use anyhow::Result;
use opfs_mock::{CreateWritableOptions, StorageManager};
use pretty_assertions::assert_eq;

/// With several streams open on one file the last stream to
/// close determines the contents.
#[tokio::test]
async fn opfs_last_close_wins() -> Result<()> {
    let storage = StorageManager::default();
    let root = storage.get_directory().await;
    let file = root.get_file_handle("f", create()).await?;

    let mut first =
        file.create_writable(CreateWritableOptions::default()).await?;
    let mut second =
        file.create_writable(CreateWritableOptions::default()).await?;

    first.write("from the first stream").await?;
    second.write("second").await?;

    first.close().await?;
    assert_eq!(b"from the first stream".to_vec(), read_file(&file).await?);

    second.close().await?;
    assert_eq!(b"second".to_vec(), read_file(&file).await?);

    Ok(())
}

/// Streams are independent values so they can be driven from
/// separate tasks.
#[tokio::test(flavor = "multi_thread")]
async fn opfs_streams_across_tasks() -> Result<()> {
    let storage = StorageManager::default();
    let root = storage.get_directory().await;

    let mut tasks = Vec::new();
    for index in 0..8 {
        let root = root.clone();
        tasks.push(tokio::spawn(async move {
            let name = format!("file-{}.txt", index);
            let file = root.get_file_handle(&name, create()).await?;
            let mut stream = file
                .create_writable(CreateWritableOptions::default())
                .await?;
            stream.write(name.clone()).await?;
            stream.close().await?;
            Ok::<_, opfs_mock::Error>(())
        }));
    }
    for task in tasks {
        task.await??;
    }

    for index in 0..8 {
        let name = format!("file-{}.txt", index);
        let file = root
            .get_file_handle(&name, Default::default())
            .await?;
        assert_eq!(name, file.get_file().await?.text());
    }
    Ok(())
}
