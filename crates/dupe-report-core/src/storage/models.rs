use std::fmt;

/// Numeric uid of a configured storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageId(pub u32);

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A storage as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    pub id: StorageId,
    pub name: String,
    pub is_online: bool,
}

/// An indexed file: its identifier within the storage and its content hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub id: String,
    pub content_hash: String,
}

impl FileRecord {
    pub fn new(id: impl Into<String>, content_hash: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content_hash: content_hash.into(),
        }
    }
}

/// Files sharing one content hash. Always holds at least two members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    pub hash: String,
    pub members: Vec<FileRecord>,
}

impl DuplicateGroup {
    pub fn member_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.id.as_str()).collect()
    }
}

/// Outcome of scanning a single storage during one analysis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageScanResult {
    pub storage_id: StorageId,
    pub groups: Vec<DuplicateGroup>,
    pub files_scanned: usize,
}

impl StorageScanResult {
    pub fn has_duplicates(&self) -> bool {
        !self.groups.is_empty()
    }

    pub fn duplicate_files(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).sum()
    }
}
