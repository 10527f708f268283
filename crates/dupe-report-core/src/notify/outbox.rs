use chrono::Utc;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tempfile::Builder;
use tracing::debug;

use super::{Notifier, NotifyError, Recipient};

/// Drop-directory mailer: every notification becomes one `.eml` file that
/// the local mail system picks up.
pub struct OutboxNotifier {
    dir: PathBuf,
    sender: Option<Recipient>,
}

impl OutboxNotifier {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sender: None,
        }
    }

    pub fn with_sender(mut self, sender: Option<Recipient>) -> Self {
        self.sender = sender;
        self
    }

    fn render(&self, recipients: &[Recipient], subject: &str, body: &str) -> String {
        let to = recipients
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");

        let mut message = String::new();
        if let Some(sender) = &self.sender {
            message.push_str(&format!("From: {}\r\n", sender));
        }
        message.push_str(&format!("To: {}\r\n", to));
        message.push_str(&format!("Subject: {}\r\n", subject));
        message.push_str(&format!("Date: {}\r\n", Utc::now().to_rfc2822()));
        message.push_str("MIME-Version: 1.0\r\n");
        message.push_str("Content-Type: text/plain; charset=utf-8\r\n");
        message.push_str("\r\n");
        for line in body.lines() {
            message.push_str(line);
            message.push_str("\r\n");
        }
        message
    }

    /// Write the message to a hidden temp file, then move it into place
    /// under a `.eml` name that does not clobber an existing message.
    /// A failed write leaves nothing behind in the outbox.
    fn deliver(&self, message: &str) -> io::Result<PathBuf> {
        let mut tmp = Builder::new()
            .prefix(".outbox-")
            .suffix(".tmp")
            .tempfile_in(&self.dir)?;
        tmp.write_all(message.as_bytes())?;
        tmp.as_file().sync_all()?;

        let stamp = Utc::now().format("%Y%m%dT%H%M%S%.6f").to_string();
        let mut attempt = 0u32;
        loop {
            let path = self.dir.join(format!("{}-{}.eml", stamp, attempt));
            match tmp.persist_noclobber(&path) {
                Ok(_) => return Ok(path),
                Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                    tmp = e.file;
                    attempt += 1;
                }
                Err(e) => return Err(e.error),
            }
        }
    }
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\r', '\n'])
}

fn validate(recipient: &Recipient) -> Result<(), NotifyError> {
    if has_line_break(&recipient.name) {
        return Err(NotifyError::InvalidHeader(recipient.name.clone()));
    }
    let address = recipient.address.as_str();
    if address.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
        return Err(NotifyError::InvalidAddress(recipient.address.clone()));
    }
    match address.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(NotifyError::InvalidAddress(recipient.address.clone())),
    }
}

impl Notifier for OutboxNotifier {
    fn send_notification(
        &self,
        recipients: &[Recipient],
        subject: &str,
        body: &str,
    ) -> Result<bool, NotifyError> {
        if recipients.is_empty() {
            return Ok(false);
        }
        for recipient in recipients.iter().chain(self.sender.iter()) {
            validate(recipient)?;
        }
        if has_line_break(subject) {
            return Err(NotifyError::InvalidHeader(subject.to_string()));
        }

        fs::create_dir_all(&self.dir)?;
        let path = self.deliver(&self.render(recipients, subject, body))?;

        debug!("Report message written to {}", path.display());
        Ok(true)
    }
}
