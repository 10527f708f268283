use std::fmt;

use crate::storage::models::{DuplicateGroup, StorageInfo};

pub const CLEAN_MESSAGE: &str = "Looks good, no duplicate files!";
pub const FINDINGS_HEADER: &str = "Duplicated identifiers detected:";
const RULE: &str = "--------------------------------------------";

/// Accumulates the text report of one analysis run.
#[derive(Debug, Default)]
pub struct ReportAggregator {
    lines: Vec<String>,
    has_findings: bool,
    storages_with_findings: usize,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the section for a scanned storage and return the lines added.
    pub fn record_storage(
        &mut self,
        storage: &StorageInfo,
        groups: &[DuplicateGroup],
    ) -> &[String] {
        let start = self.lines.len();

        self.lines.push(String::new());
        self.lines.push(format!("{} ({})", storage.name, storage.id));
        self.lines.push(RULE.to_string());
        self.lines.push(String::new());

        if groups.is_empty() {
            self.lines.push(CLEAN_MESSAGE.to_string());
        } else {
            self.has_findings = true;
            self.storages_with_findings += 1;
            self.lines.push(FINDINGS_HEADER.to_string());
            for group in groups {
                self.lines.push(format!(
                    "* identifiers \"{}\" having same hash {}",
                    group.member_ids().join(","),
                    group.hash
                ));
            }
        }

        &self.lines[start..]
    }

    /// Append the single line noting that a storage was skipped.
    pub fn record_offline_storage(&mut self, storage: &StorageInfo) -> &[String] {
        let start = self.lines.len();
        self.lines.push(format!(
            "{} ({}): storage is offline!",
            storage.name, storage.id
        ));
        &self.lines[start..]
    }

    /// Append the single line noting that a storage could not be scanned.
    /// A failed storage is not a finding.
    pub fn record_failed_storage(
        &mut self,
        storage: &StorageInfo,
        reason: &dyn fmt::Display,
    ) -> &[String] {
        let start = self.lines.len();
        self.lines.push(format!(
            "{} ({}): could not be scanned: {}",
            storage.name, storage.id, reason
        ));
        &self.lines[start..]
    }

    /// Append the single line noting that the storage list was unavailable.
    pub fn record_registry_failure(&mut self, reason: &dyn fmt::Display) -> &[String] {
        let start = self.lines.len();
        self.lines.push(format!("Storages could not be listed: {}", reason));
        &self.lines[start..]
    }

    pub fn has_findings(&self) -> bool {
        self.has_findings
    }

    pub fn storages_with_findings(&self) -> usize {
        self.storages_with_findings
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn build_text(&self) -> String {
        self.lines.join("\n")
    }
}
