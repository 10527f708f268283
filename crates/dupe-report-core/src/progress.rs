use crate::storage::models::StorageInfo;

/// Trait for reporting analysis progress.
///
/// The CLI implements it with indicatif; all methods default to no-ops.
pub trait ProgressReporter {
    fn on_storage_start(&self, _storage: &StorageInfo) {}
    fn on_file_indexed(&self, _files_seen: usize) {}
    fn on_storage_complete(&self, _storage: &StorageInfo, _groups: usize, _duration_secs: f64) {}
    fn on_storage_offline(&self, _storage: &StorageInfo) {}
    /// Called instead of `on_storage_complete` when a started scan fails.
    fn on_storage_failed(&self, _storage: &StorageInfo, _reason: &str) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
