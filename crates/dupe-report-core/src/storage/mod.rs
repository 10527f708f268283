pub mod filesystem;
pub mod memory;
pub mod models;

pub use filesystem::FilesystemStorages;
pub use memory::MemoryStorage;
pub use models::{DuplicateGroup, FileRecord, StorageId, StorageInfo, StorageScanResult};

use crate::error::Result;

/// Lazy, single-pass sequence of the records held by one storage.
pub type FileRecords<'a> = Box<dyn Iterator<Item = FileRecord> + 'a>;

/// Enumerates the storages known to the system, in a stable order.
pub trait StorageRegistry {
    fn list_all_storages(&self) -> Result<Vec<StorageInfo>>;
}

/// Yields `(id, hash)` records for a storage.
///
/// Implementations deal with per-file problems themselves (log and skip);
/// only failures affecting the whole storage are returned as errors.
pub trait FileIndex {
    fn list_files(&self, storage: StorageId) -> Result<FileRecords<'_>>;
}
