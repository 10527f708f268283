pub mod outbox;

pub use outbox::OutboxNotifier;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A mail address with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Recipient {
    pub address: String,
    #[serde(default)]
    pub name: String,
}

impl Recipient {
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "<{}>", self.address)
        } else {
            f.write_str("\"")?;
            for c in self.name.chars() {
                if c == '"' || c == '\\' {
                    f.write_str("\\")?;
                }
                write!(f, "{}", c)?;
            }
            write!(f, "\" <{}>", self.address)
        }
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid mail address: {0:?}")]
    InvalidAddress(String),

    #[error("Line break in mail header: {0:?}")]
    InvalidHeader(String),
}

/// Delivers a finished report.
///
/// `Ok(false)` means the transport declined the message without a specific error.
pub trait Notifier {
    fn send_notification(
        &self,
        recipients: &[Recipient],
        subject: &str,
        body: &str,
    ) -> Result<bool, NotifyError>;
}
