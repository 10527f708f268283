use tracing::{debug, warn};

use super::models::{FileRecord, StorageId, StorageInfo};
use super::{FileIndex, FileRecords, StorageRegistry};
use crate::config::StorageConfig;
use crate::error::{Error, Result};
use crate::hasher;
use crate::scanner::walk::{compile_ignore_patterns, identifier, walk_files};

/// Storages rooted in local directories, as declared in the configuration.
///
/// Files are hashed while they are enumerated, so listing a storage costs a
/// full read of every file in it.
pub struct FilesystemStorages {
    storages: Vec<StorageConfig>,
}

impl FilesystemStorages {
    pub fn new(storages: Vec<StorageConfig>) -> Self {
        Self { storages }
    }

    fn get(&self, id: StorageId) -> Result<&StorageConfig> {
        self.storages
            .iter()
            .find(|s| s.uid == id.0)
            .ok_or(Error::UnknownStorage(id))
    }

    fn is_online(storage: &StorageConfig) -> bool {
        storage.online && storage.root.is_dir()
    }
}

impl StorageRegistry for FilesystemStorages {
    fn list_all_storages(&self) -> Result<Vec<StorageInfo>> {
        Ok(self
            .storages
            .iter()
            .map(|s| StorageInfo {
                id: StorageId(s.uid),
                name: s.name.clone(),
                is_online: Self::is_online(s),
            })
            .collect())
    }
}

impl FileIndex for FilesystemStorages {
    fn list_files(&self, storage: StorageId) -> Result<FileRecords<'_>> {
        let config = self.get(storage)?;
        let root = config.root.as_path();
        debug!("Listing files of storage {} under {}", storage, root.display());

        let patterns = compile_ignore_patterns(&config.ignore_patterns);
        let records = walk_files(root.to_path_buf(), patterns).filter_map(move |path| {
            match hasher::content_hash(&path) {
                Ok(hash) => Some(FileRecord {
                    id: identifier(root, &path),
                    content_hash: hash,
                }),
                Err(e) => {
                    warn!("Error hashing file '{}': {}", path.display(), e);
                    None
                }
            }
        });
        Ok(Box::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn storage_config(uid: u32, root: PathBuf) -> StorageConfig {
        StorageConfig {
            uid,
            name: format!("storage-{}", uid),
            root,
            online: true,
            ignore_patterns: vec![],
        }
    }

    #[test]
    fn test_online_status() {
        let tmp = tempdir().unwrap();
        let mut disabled = storage_config(2, tmp.path().to_path_buf());
        disabled.online = false;

        let storages = FilesystemStorages::new(vec![
            storage_config(1, tmp.path().to_path_buf()),
            disabled,
            storage_config(3, tmp.path().join("missing")),
        ]);

        let online: Vec<bool> = storages
            .list_all_storages()
            .unwrap()
            .iter()
            .map(|s| s.is_online)
            .collect();
        assert_eq!(online, vec![true, false, false]);
    }

    #[test]
    fn test_list_files_hashes_content() {
        let tmp = tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("docs")).unwrap();
        fs::write(tmp.path().join("a.txt"), "same").unwrap();
        fs::write(tmp.path().join("docs/b.txt"), "same").unwrap();
        fs::write(tmp.path().join("docs/c.txt"), "other").unwrap();

        let storages = FilesystemStorages::new(vec![storage_config(1, tmp.path().to_path_buf())]);
        let records: Vec<FileRecord> = storages.list_files(StorageId(1)).unwrap().collect();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["/a.txt", "/docs/b.txt", "/docs/c.txt"]);
        assert_eq!(records[0].content_hash, records[1].content_hash);
        assert_ne!(records[0].content_hash, records[2].content_hash);
        assert_eq!(records[2].content_hash, hasher::hash_data(b"other"));
    }

    #[test]
    fn test_unknown_storage() {
        let storages = FilesystemStorages::new(vec![]);
        assert!(matches!(
            storages.list_files(StorageId(9)),
            Err(Error::UnknownStorage(StorageId(9)))
        ));
    }
}
