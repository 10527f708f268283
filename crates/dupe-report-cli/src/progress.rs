use dupe_report_core::storage::StorageInfo;
use dupe_report_core::ProgressReporter;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

/// Spinner on stderr while a storage is being hashed.
pub struct CliReporter {
    bar: RefCell<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: RefCell::new(None),
        }
    }

    fn finish_bar(&self) {
        if let Some(pb) = self.bar.borrow_mut().take() {
            pb.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliReporter {
    fn on_storage_start(&self, storage: &StorageInfo) {
        self.finish_bar();
        let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        pb.set_message(format!("Hashing files in {}...", storage.name));
        pb.enable_steady_tick(Duration::from_millis(80));
        *self.bar.borrow_mut() = Some(pb);
    }

    fn on_file_indexed(&self, files_seen: usize) {
        if let Some(pb) = self.bar.borrow().as_ref() {
            pb.set_position(files_seen as u64);
            pb.set_message(format!("Hashing... {} files", files_seen));
        }
    }

    fn on_storage_complete(&self, storage: &StorageInfo, groups: usize, duration_secs: f64) {
        let files = self
            .bar
            .borrow()
            .as_ref()
            .map(|pb| pb.position())
            .unwrap_or(0);
        self.finish_bar();
        tracing::info!(
            "{} ({}): {} files, {} duplicate groups in {:.2}s",
            storage.name,
            storage.id,
            files,
            groups,
            duration_secs
        );
    }

    fn on_storage_failed(&self, _storage: &StorageInfo, _reason: &str) {
        self.finish_bar();
    }
}

impl Drop for CliReporter {
    fn drop(&mut self) {
        self.finish_bar();
    }
}
