use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::notify::{Message, Notifier, NotifyError};

pub const DEFAULT_SENDMAIL_PATH: &str = "/usr/sbin/sendmail";

/// Delivers messages through a local `sendmail -t` binary
#[derive(Debug, Clone)]
pub struct SendmailNotifier {
    path: PathBuf,
}

impl SendmailNotifier {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for SendmailNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_SENDMAIL_PATH)
    }
}

impl Notifier for SendmailNotifier {
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError> {
        let mut child = Command::new(&self.path)
            .arg("-t")
            .stdin(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // An early exit closes the pipe; the exit status reports why
            if let Err(e) = stdin.write_all(message.render().as_bytes()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e.into());
                }
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(NotifyError::TransportFailed {
                recipient: message.recipient.clone(),
                status: status.to_string(),
            });
        }

        debug!(recipient = %message.recipient, "Message handed to sendmail");
        Ok(())
    }
}
