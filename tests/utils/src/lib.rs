//! Helpers shared by the test suites.
use anyhow::Result;
use opfs_mock::{
    CreateWritableOptions, DirectoryHandle, FileHandle, GetHandleOptions,
};

/// Install a tracing subscriber that honours `RUST_LOG`.
///
/// Safe to call from every test, only the first call installs.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().without_time())
        .try_init();
}

/// Options that create missing entries.
pub fn create() -> GetHandleOptions {
    GetHandleOptions { create: true }
}

/// Create a file in `dir` with the given contents.
pub async fn write_file(
    dir: &DirectoryHandle,
    name: &str,
    contents: impl AsRef<[u8]>,
) -> Result<FileHandle> {
    let file = dir.get_file_handle(name, create()).await?;
    let mut stream =
        file.create_writable(CreateWritableOptions::default()).await?;
    stream.write(contents.as_ref()).await?;
    stream.close().await?;
    Ok(file)
}

/// Read the committed contents of a file.
pub async fn read_file(file: &FileHandle) -> Result<Vec<u8>> {
    Ok(file.get_file().await?.bytes().to_vec())
}
