use ahash::AHashMap;
use std::time::Instant;
use tracing::debug;

use crate::error::Result;
use crate::progress::{ProgressReporter, SilentReporter};
use crate::storage::models::{DuplicateGroup, FileRecord, StorageInfo, StorageScanResult};
use crate::storage::FileIndex;

/// Bucket records by content hash in a single pass and keep the buckets
/// holding more than one record.
///
/// Groups come out in the order their hash was first seen; members keep the
/// order in which they were yielded.
pub fn group_by_hash<I>(records: I) -> Vec<DuplicateGroup>
where
    I: IntoIterator<Item = FileRecord>,
{
    let mut slot_by_hash: AHashMap<String, usize> = AHashMap::new();
    let mut buckets: Vec<DuplicateGroup> = Vec::new();

    for record in records {
        match slot_by_hash.get(&record.content_hash) {
            Some(&slot) => buckets[slot].members.push(record),
            None => {
                slot_by_hash.insert(record.content_hash.clone(), buckets.len());
                buckets.push(DuplicateGroup {
                    hash: record.content_hash.clone(),
                    members: vec![record],
                });
            }
        }
    }

    buckets.retain(|bucket| bucket.members.len() > 1);
    buckets
}

/// Finds files sharing a content hash within one storage.
///
/// The caller checks that the storage is online before scanning it.
pub struct DuplicateDetector<'a> {
    index: &'a dyn FileIndex,
}

impl<'a> DuplicateDetector<'a> {
    pub fn new(index: &'a dyn FileIndex) -> Self {
        Self { index }
    }

    pub fn find_duplicates(&self, storage: &StorageInfo) -> Result<Vec<DuplicateGroup>> {
        Ok(self.scan_storage(storage, &SilentReporter)?.groups)
    }

    pub fn scan_storage(
        &self,
        storage: &StorageInfo,
        reporter: &dyn ProgressReporter,
    ) -> Result<StorageScanResult> {
        let start = Instant::now();
        let mut files_scanned = 0usize;

        let records = self.index.list_files(storage.id)?.inspect(|_| {
            files_scanned += 1;
            reporter.on_file_indexed(files_scanned);
        });
        let groups = group_by_hash(records);

        debug!(
            "Storage {} scanned in {:.2}s: {} files, {} duplicate groups",
            storage.id,
            start.elapsed().as_secs_f64(),
            files_scanned,
            groups.len(),
        );

        Ok(StorageScanResult {
            storage_id: storage.id,
            groups,
            files_scanned,
        })
    }
}
