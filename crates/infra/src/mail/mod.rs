//! Outbound mail boundary.

use thiserror::Error;

use folio_core::Notification;

pub mod recording;
pub mod smtp;

pub use recording::RecordingMailer;
pub use smtp::{SmtpMailer, SmtpSettings};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MailError {
    /// A setting the relay needs is missing (names the variable).
    #[error("mail relay not configured: {0} is not set")]
    NotConfigured(&'static str),

    #[error("invalid address `{address}`: {reason}")]
    Address { address: String, reason: String },

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("send failed: {0}")]
    Transport(String),
}

/// Sends one formatted message per call.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: &Notification) -> Result<(), MailError>;
}
