//! Service wiring shared by every request.
//!
//! The store collections and the mailer are built once at startup and handed
//! to handlers through an `Arc<AppServices>` extension; tests build the same
//! struct from in-memory collaborators.

use std::sync::Arc;

use thiserror::Error;

use folio_core::{Certificate, CertificateDraft, ContactDraft, ContactMessage, DocumentId};
use folio_infra::{
    config::Config,
    document_store::{Collection, MongoStore, StoreError, StoreResult, UnavailableCollection},
    mail::{MailError, Mailer, SmtpMailer},
};

/// Why a contact submission failed.
///
/// Callers of the HTTP API see the same response for both; only logs tell
/// them apart.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("contact message not saved: {0}")]
    Persist(#[source] StoreError),

    #[error("contact message {id} saved but notification not sent: {source}")]
    Notify {
        id: DocumentId,
        #[source]
        source: MailError,
    },
}

impl ContactError {
    /// Step the submission stopped at (`persist` or `notify`).
    pub fn stage(&self) -> &'static str {
        match self {
            ContactError::Persist(_) => "persist",
            ContactError::Notify { .. } => "notify",
        }
    }
}

pub struct AppServices {
    certificates: Arc<dyn Collection<Certificate>>,
    messages: Arc<dyn Collection<ContactMessage>>,
    mailer: Arc<dyn Mailer>,
    notify_to: Option<String>,
}

impl AppServices {
    pub fn new(
        certificates: Arc<dyn Collection<Certificate>>,
        messages: Arc<dyn Collection<ContactMessage>>,
        mailer: Arc<dyn Mailer>,
        notify_to: Option<String>,
    ) -> Self {
        Self {
            certificates,
            messages,
            mailer,
            notify_to,
        }
    }

    pub async fn list_certificates(&self) -> StoreResult<Vec<Certificate>> {
        self.certificates.find().await
    }

    pub async fn create_certificate(&self, draft: CertificateDraft) -> StoreResult<Certificate> {
        self.certificates.save(draft).await
    }

    /// Persist the message, then relay it by email.
    ///
    /// A persisted message stays persisted when the email fails; there is no
    /// rollback and no retry.
    pub async fn submit_contact(&self, draft: ContactDraft) -> Result<ContactMessage, ContactError> {
        let saved = self.messages.save(draft).await.map_err(ContactError::Persist)?;

        let notify = |source: MailError| ContactError::Notify {
            id: saved.id.clone(),
            source,
        };

        let recipient = self
            .notify_to
            .as_deref()
            .ok_or_else(|| notify(MailError::NotConfigured("EMAIL")))?;

        self.mailer
            .send(&saved.notification(recipient))
            .await
            .map_err(notify)?;

        Ok(saved)
    }
}

/// Build production services from `config`.
///
/// Store problems at boot are logged and swallowed: the server still starts,
/// and store-backed routes fail per request until the store is reachable.
pub async fn build_services(config: &Config) -> AppServices {
    let (certificates, messages) = match config.mongo_uri.as_deref() {
        Some(uri) => match MongoStore::connect(uri).await {
            Ok(store) => {
                spawn_connection_probe(store.clone());
                let certificates: Arc<dyn Collection<Certificate>> = Arc::new(store.collection::<Certificate>());
                let messages: Arc<dyn Collection<ContactMessage>> = Arc::new(store.collection::<ContactMessage>());
                (certificates, messages)
            }
            Err(e) => {
                tracing::error!(error = %e, "MongoDB connection error");
                unavailable(e.to_string())
            }
        },
        None => {
            tracing::error!("MongoDB connection error: MONGO_URI is not set");
            unavailable("MONGO_URI is not set".to_string())
        }
    };

    if config.notify_to().is_none() {
        tracing::warn!("EMAIL not set; contact notifications will fail");
    }

    AppServices::new(
        certificates,
        messages,
        Arc::new(SmtpMailer::new(config.smtp.clone())),
        config.notify_to().map(str::to_string),
    )
}

fn unavailable(
    reason: String,
) -> (Arc<dyn Collection<Certificate>>, Arc<dyn Collection<ContactMessage>>) {
    let store = Arc::new(UnavailableCollection::new(reason));
    let certificates: Arc<dyn Collection<Certificate>> = store.clone();
    let messages: Arc<dyn Collection<ContactMessage>> = store;
    (certificates, messages)
}

/// Report reachability in the background so startup never waits on it.
fn spawn_connection_probe(store: MongoStore) {
    tokio::spawn(async move {
        match store.ping().await {
            Ok(()) => tracing::info!(database = store.database_name(), "MongoDB connected"),
            Err(e) => tracing::error!(error = %e, "MongoDB connection error"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_infra::{document_store::InMemoryCollection, mail::RecordingMailer};
    use serde_json::json;

    fn ada() -> ContactDraft {
        ContactDraft {
            name: Some(json!("Ada")),
            email: Some(json!("ada@example.com")),
            message: Some(json!("Hello")),
        }
    }

    #[tokio::test]
    async fn missing_recipient_fails_after_persisting() {
        let messages = Arc::new(InMemoryCollection::<ContactMessage>::new());
        let mailer = Arc::new(RecordingMailer::new());
        let services = AppServices::new(
            Arc::new(InMemoryCollection::<Certificate>::new()),
            messages.clone(),
            mailer.clone(),
            None,
        );

        let err = services.submit_contact(ada()).await.unwrap_err();

        assert_eq!(err.stage(), "notify");
        assert_eq!(messages.len(), 1);
        assert_eq!(mailer.attempts(), 0);
    }

    #[tokio::test]
    async fn unavailable_store_stops_before_mail() {
        let (certificates, messages) = unavailable("down".to_string());
        let mailer = Arc::new(RecordingMailer::new());
        let services = AppServices::new(certificates, messages, mailer.clone(), Some("owner@example.com".into()));

        let err = services.submit_contact(ada()).await.unwrap_err();

        assert_eq!(err.stage(), "persist");
        assert_eq!(mailer.attempts(), 0);
        assert_eq!(
            services.list_certificates().await.unwrap_err(),
            StoreError::Connection("down".to_string())
        );
    }
}
