pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod hasher;
pub mod notify;
pub mod progress;
pub mod report;
pub mod scanner;
pub mod storage;

pub use analysis::duplicates::DuplicateDetector;
pub use config::AppConfig;
pub use engine::{AnalysisEngine, AnalysisResult};
pub use error::{Error, Result};
pub use notify::{Notifier, NotifyError, OutboxNotifier, Recipient};
pub use progress::{ProgressReporter, SilentReporter};
pub use report::ReportAggregator;
