mod access_handle;
mod concurrent_streams;
mod global_root;
mod listing;
mod resolve_path;
mod storage_estimate;
mod write_close;

pub use opfs_test_utils as test_utils;
