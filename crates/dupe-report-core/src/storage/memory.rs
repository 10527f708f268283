use super::models::{FileRecord, StorageId, StorageInfo};
use super::{FileIndex, FileRecords, StorageRegistry};
use crate::error::{Error, Result};

struct Entry {
    info: StorageInfo,
    files: Vec<FileRecord>,
}

/// Registry and index held entirely in memory.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Vec<Entry>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an online storage with the given `(id, hash)` pairs.
    pub fn with_storage(mut self, uid: u32, name: &str, files: &[(&str, &str)]) -> Self {
        self.push(uid, name, true, files);
        self
    }

    /// Add a storage that reports itself offline.
    pub fn with_offline_storage(mut self, uid: u32, name: &str) -> Self {
        self.push(uid, name, false, &[]);
        self
    }

    fn push(&mut self, uid: u32, name: &str, is_online: bool, files: &[(&str, &str)]) {
        self.entries.push(Entry {
            info: StorageInfo {
                id: StorageId(uid),
                name: name.to_string(),
                is_online,
            },
            files: files
                .iter()
                .map(|(id, hash)| FileRecord::new(*id, *hash))
                .collect(),
        });
    }
}

impl StorageRegistry for MemoryStorage {
    fn list_all_storages(&self) -> Result<Vec<StorageInfo>> {
        Ok(self.entries.iter().map(|e| e.info.clone()).collect())
    }
}

impl FileIndex for MemoryStorage {
    fn list_files(&self, storage: StorageId) -> Result<FileRecords<'_>> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.info.id == storage)
            .ok_or(Error::UnknownStorage(storage))?;
        Ok(Box::new(entry.files.iter().cloned()))
    }
}
