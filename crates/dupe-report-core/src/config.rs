use config::{Config, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::notify::Recipient;

/// Base name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "DupeReport";

const ENV_PREFIX: &str = "DUPE_REPORT";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storages: Vec<StorageConfig>,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    pub uid: u32,
    pub name: String,
    pub root: PathBuf,
    /// Administrative switch; a storage whose root is missing is offline regardless.
    #[serde(default = "default_online")]
    pub online: bool,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_online() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Where to send the report. No recipient, no notification.
    pub recipient: Option<Recipient>,
    pub sender: Option<Recipient>,
    #[serde(default = "default_outbox_dir")]
    pub outbox_dir: PathBuf,
}

fn default_outbox_dir() -> PathBuf {
    PathBuf::from("./outbox")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            recipient: None,
            sender: None,
            outbox_dir: default_outbox_dir(),
        }
    }
}

impl ReportConfig {
    /// The configured sender, falling back to the recipient.
    pub fn effective_sender(&self) -> Option<&Recipient> {
        self.sender.as_ref().or(self.recipient.as_ref())
    }
}

/// Load `DupeReport.toml` from the working directory (if present), overlaid
/// with `DUPE_REPORT_*` environment variables.
pub fn load_configuration() -> Result<AppConfig> {
    build(ConfigFile::with_name(DEFAULT_CONFIG_NAME).required(false))
}

/// Load an explicit configuration file, overlaid with the environment.
pub fn load_configuration_from(path: &Path) -> Result<AppConfig> {
    build(ConfigFile::from(path).required(true))
}

fn build<S>(file: S) -> Result<AppConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let app_config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<AppConfig>()?;
    app_config.validate()?;
    Ok(app_config)
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for storage in &self.storages {
            if !seen.insert(storage.uid) {
                return Err(Error::InvalidConfig(format!(
                    "storage uid {} is declared more than once",
                    storage.uid
                )));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}
