use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_core::Notification;

use super::{MailError, Mailer};

/// Mailer that keeps messages instead of sending them.
///
/// Intended for tests/dev. A failing recorder counts attempts but keeps
/// nothing.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Notification>>,
    attempts: AtomicUsize,
    fail_with: Option<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder whose every send fails with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Number of `send` calls, successful or not.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: &Notification) -> Result<(), MailError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.fail_with {
            return Err(MailError::Transport(reason.clone()));
        }

        self.sent
            .lock()
            .map_err(|_| MailError::Transport("recorder lock poisoned".to_string()))?
            .push(mail.clone());
        Ok(())
    }
}
