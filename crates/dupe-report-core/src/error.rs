use thiserror::Error;

use crate::notify::NotifyError;
use crate::storage::models::StorageId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown storage: {0}")]
    UnknownStorage(StorageId),

    /// The report was built but could not be handed to the notifier.
    #[error("Could not deliver the duplicate report to {recipient}")]
    NotificationDeliveryFailed {
        recipient: String,
        #[source]
        source: Option<NotifyError>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
