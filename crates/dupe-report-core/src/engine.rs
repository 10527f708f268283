use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::analysis::duplicates::DuplicateDetector;
use crate::error::{Error, Result};
use crate::notify::{Notifier, NotifyError, Recipient};
use crate::progress::ProgressReporter;
use crate::report::ReportAggregator;
use crate::storage::{FileIndex, StorageRegistry};

pub const REPORT_SUBJECT: &str = "Duplicate files detected!";

/// Runs the duplicate analysis over every registered storage.
pub struct AnalysisEngine<'a> {
    registry: &'a dyn StorageRegistry,
    index: &'a dyn FileIndex,
    notifier: &'a dyn Notifier,
    recipients: Vec<Recipient>,
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub duration: Duration,
    pub storages_scanned: usize,
    pub storages_offline: usize,
    /// Online storages whose file listing failed.
    pub storages_failed: usize,
    pub files_scanned: usize,
    pub duplicate_groups: usize,
    pub duplicate_files: usize,
    pub report: String,
    /// Address the report went to, if one was sent.
    pub notified: Option<String>,
}

impl AnalysisResult {
    pub fn has_findings(&self) -> bool {
        self.duplicate_groups > 0
    }
}

impl<'a> AnalysisEngine<'a> {
    pub fn new(
        registry: &'a dyn StorageRegistry,
        index: &'a dyn FileIndex,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            registry,
            index,
            notifier,
            recipients: Vec::new(),
        }
    }

    pub fn with_recipient(mut self, recipient: Option<Recipient>) -> Self {
        self.recipients = recipient.into_iter().collect();
        self
    }

    /// Scan each online storage, echo its report section to `console`, and
    /// send the full report when duplicates were found and someone is
    /// configured to receive it.
    ///
    /// Storage and console failures are logged and the run continues; only
    /// a failed delivery is returned as an error.
    pub fn analyse(
        &self,
        console: &mut dyn Write,
        reporter: &dyn ProgressReporter,
    ) -> Result<AnalysisResult> {
        let start = Instant::now();
        let detector = DuplicateDetector::new(self.index);
        let mut report = ReportAggregator::new();
        let mut console = Console::new(console);

        let mut storages_scanned = 0;
        let mut storages_offline = 0;
        let mut storages_failed = 0;
        let mut files_scanned = 0;
        let mut duplicate_groups = 0;
        let mut duplicate_files = 0;

        let storages = match self.registry.list_all_storages() {
            Ok(storages) => storages,
            Err(e) => {
                warn!("Could not list storages: {}", e);
                console.echo(report.record_registry_failure(&e));
                Vec::new()
            }
        };

        for storage in storages {
            if !storage.is_online {
                info!("Storage {} ({}) is offline, skipping", storage.name, storage.id);
                reporter.on_storage_offline(&storage);
                storages_offline += 1;
                console.echo(report.record_offline_storage(&storage));
                continue;
            }

            reporter.on_storage_start(&storage);
            let storage_start = Instant::now();
            let result = match detector.scan_storage(&storage, reporter) {
                Ok(result) => result,
                Err(e) => {
                    warn!(
                        "Storage {} ({}) could not be scanned: {}",
                        storage.name, storage.id, e
                    );
                    reporter.on_storage_failed(&storage, &e.to_string());
                    storages_failed += 1;
                    console.echo(report.record_failed_storage(&storage, &e));
                    continue;
                }
            };
            reporter.on_storage_complete(
                &storage,
                result.groups.len(),
                storage_start.elapsed().as_secs_f64(),
            );

            storages_scanned += 1;
            files_scanned += result.files_scanned;
            duplicate_groups += result.groups.len();
            duplicate_files += result.duplicate_files();
            console.echo(report.record_storage(&storage, &result.groups));
        }

        console.flush();

        let text = report.build_text();
        let notified = self.dispatch(&report, &text)?;

        if let Some(address) = &notified {
            console.write_line("");
            console.write_line(&format!("Report was sent to {}", address));
        }
        console.flush();

        Ok(AnalysisResult {
            duration: start.elapsed(),
            storages_scanned,
            storages_offline,
            storages_failed,
            files_scanned,
            duplicate_groups,
            duplicate_files,
            report: text,
            notified,
        })
    }

    fn dispatch(&self, report: &ReportAggregator, text: &str) -> Result<Option<String>> {
        if !report.has_findings() {
            debug!("No duplicates found, nothing to send");
            return Ok(None);
        }
        let Some(primary) = self.recipients.first() else {
            debug!("No report recipient configured, skipping notification");
            return Ok(None);
        };

        let failed = |source: Option<NotifyError>| Error::NotificationDeliveryFailed {
            recipient: primary.address.clone(),
            source,
        };
        match self
            .notifier
            .send_notification(&self.recipients, REPORT_SUBJECT, text)
        {
            Ok(true) => {
                info!("Duplicate report sent to {}", primary.address);
                Ok(Some(primary.address.clone()))
            }
            Ok(false) => Err(failed(None)),
            Err(e) => Err(failed(Some(e))),
        }
    }
}

/// Best-effort echo of the report. After the first write error the console
/// is left alone for the rest of the run.
struct Console<'c> {
    out: &'c mut dyn Write,
    broken: bool,
}

impl<'c> Console<'c> {
    fn new(out: &'c mut dyn Write) -> Self {
        Self { out, broken: false }
    }

    fn echo(&mut self, lines: &[String]) {
        for line in lines {
            self.write_line(line);
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.broken {
            return;
        }
        if let Err(e) = writeln!(self.out, "{}", line) {
            self.fail(e);
        }
    }

    fn flush(&mut self) {
        if self.broken {
            return;
        }
        if let Err(e) = self.out.flush() {
            self.fail(e);
        }
    }

    fn fail(&mut self, e: io::Error) {
        warn!("Console output failed, continuing without it: {}", e);
        self.broken = true;
    }
}
