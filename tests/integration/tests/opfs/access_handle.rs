use crate::test_utils::{create, read_file};
use anyhow::Result;
use opfs_mock::{Error, ReadWriteOptions, StorageManager};
use pretty_assertions::assert_eq;

/// Only one access handle can be open for a file and the lock
/// is released on close.
#[tokio::test]
async fn opfs_access_handle() -> Result<()> {
    let storage = StorageManager::default();
    let root = storage.get_directory().await;
    let file = root.get_file_handle("db.sqlite", create()).await?;

    let mut handle = file.create_sync_access_handle().await?;
    assert!(matches!(
        file.create_sync_access_handle().await,
        Err(Error::AlreadyLocked(_))
    ));

    handle.write(b"header", ReadWriteOptions::default())?;
    handle.write(b"page", ReadWriteOptions::at(16))?;
    handle.flush()?;
    assert_eq!(20, handle.get_size()?);

    let mut page = [0u8; 4];
    assert_eq!(4, handle.read(&mut page, ReadWriteOptions::at(16))?);
    assert_eq!(b"page", &page);

    handle.close();
    assert!(matches!(handle.get_size(), Err(Error::Closed)));

    let contents = read_file(&file).await?;
    assert_eq!(b"header", &contents[..6]);
    assert_eq!(20, contents.len());

    let mut handle = file.create_sync_access_handle().await?;
    handle.truncate(6)?;
    handle.close();
    assert_eq!(b"header".to_vec(), read_file(&file).await?);

    Ok(())
}
