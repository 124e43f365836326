//! Delivering assignments to participants.
//!
//! The matching core hands over finished `(recipient, giver)` pairs; this
//! module composes one message per recipient and passes it to a
//! [`Notifier`]. Two transports are provided:
//!
//! - [`SendmailNotifier`]: pipes each message into `sendmail -t`
//! - [`PreviewNotifier`]: writes rendered messages to any `io::Write`
//!   (used for dry runs)

pub mod preview;
pub mod sendmail;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::info;

use crate::core::roster::Roster;
use crate::core::types::Participant;
use crate::matching::engine::Matching;

pub use preview::PreviewNotifier;
pub use sendmail::{SendmailNotifier, DEFAULT_SENDMAIL_PATH};

pub const SUBJECT: &str = "Your secret santa match!";
pub const SIGNATURE: &str = "Yours friendly, the secret santa generator";

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("No address on the roster for '{0}'")]
    MissingAddress(Participant),

    #[error("Failed to run mail transport: {0}")]
    Io(#[from] std::io::Error),

    #[error("Mail transport failed for '{recipient}': {status}")]
    TransportFailed {
        recipient: Participant,
        status: String,
    },
}

/// A composed notification for one participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub recipient: Participant,
    pub address: String,
    pub subject: String,
    pub body: String,
    pub date: DateTime<Utc>,
}

impl Message {
    /// Compose the message telling `recipient` who they were matched with
    pub fn compose(recipient: &Participant, giver: &Participant, address: impl Into<String>) -> Self {
        Self {
            recipient: recipient.clone(),
            address: address.into(),
            subject: SUBJECT.to_string(),
            body: format!("Hi {recipient}, your match is {giver}"),
            date: Utc::now(),
        }
    }

    /// Render as an RFC 822 message suitable for `sendmail -t`
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "To: {}\nSubject: {}\nDate: {}\n\n{}\n\n{}\n",
            self.address,
            self.subject,
            self.date.to_rfc2822(),
            self.body,
            SIGNATURE
        )
    }
}

/// A way of getting a message to its recipient
pub trait Notifier {
    /// Deliver a single message
    ///
    /// # Errors
    ///
    /// Returns `NotifyError` if the transport cannot accept the message.
    fn deliver(&mut self, message: &Message) -> Result<(), NotifyError>;
}

/// Send every recipient in `matching` their assignment.
///
/// Messages go out in recipient order. Delivery stops at the first failure;
/// there are no retries.
///
/// # Errors
///
/// Returns `NotifyError::MissingAddress` if a recipient is not on the roster,
/// or the transport's error if delivery fails.
pub fn notify_all(
    matching: &Matching,
    roster: &Roster,
    notifier: &mut dyn Notifier,
) -> Result<usize, NotifyError> {
    let mut sent = 0;
    for (recipient, giver) in matching.pairs() {
        let address = roster
            .address_of(recipient)
            .ok_or_else(|| NotifyError::MissingAddress(recipient.clone()))?;
        let message = Message::compose(recipient, giver, address);
        notifier.deliver(&message)?;
        sent += 1;
    }
    info!(sent, "Notifications delivered");
    Ok(sent)
}
