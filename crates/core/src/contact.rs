//! Contact form messages and the notification sent for each one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Document;
use crate::error::{DomainError, DomainResult};
use crate::id::DocumentId;
use crate::value::{RawField, cast_text};

/// A message left through the contact form.
///
/// `name`, `email` and `message` are expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Contact form fields as submitted, before casting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDraft {
    pub name: RawField,
    pub email: RawField,
    pub message: RawField,
}

impl Document for ContactMessage {
    type Draft = ContactDraft;

    const COLLECTION: &'static str = "messages";
    const MODEL: &'static str = "Message";
    const TIMESTAMP_FIELD: Option<&'static str> = Some("createdAt");

    fn id(&self) -> &DocumentId {
        &self.id
    }

    fn from_draft(id: DocumentId, saved_at: DateTime<Utc>, draft: ContactDraft) -> DomainResult<Self> {
        let mut errors = Vec::new();
        let mut text = |path: &'static str, raw: &RawField| {
            cast_text(path, raw).unwrap_or_else(|e| {
                errors.push((path, e));
                None
            })
        };

        let name = text("name", &draft.name);
        let email = text("email", &draft.email);
        let message = text("message", &draft.message);

        if let Some(err) = DomainError::from_field_errors(Self::MODEL, errors) {
            return Err(err);
        }

        Ok(Self {
            id,
            name,
            email,
            message,
            created_at: saved_at,
        })
    }
}

/// One outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Sender address; `None` lets the transport use its own account.
    pub from: Option<String>,
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl ContactMessage {
    /// Notification relaying this message to `recipient`.
    ///
    /// Values are interpolated verbatim; the html is not escaped.
    pub fn notification(&self, recipient: &str) -> Notification {
        let name = self.name.as_deref().unwrap_or_default();
        let email = self.email.as_deref().unwrap_or_default();
        let message = self.message.as_deref().unwrap_or_default();

        Notification {
            from: self.email.clone().filter(|e| !e.trim().is_empty()),
            to: recipient.to_string(),
            subject: format!("New Portfolio Message from {name}"),
            html: format!(
                "\n<h3>New Contact Message</h3>\n\
                 <p><b>Name:</b> {name}</p>\n\
                 <p><b>Email:</b> {email}</p>\n\
                 <p><b>Message:</b></p>\n\
                 <p>{message}</p>\n"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ada() -> ContactMessage {
        ContactMessage::from_draft(
            DocumentId::new(),
            Utc::now(),
            ContactDraft {
                name: Some(json!("Ada")),
                email: Some(json!("ada@example.com")),
                message: Some(json!("Hello")),
            },
        )
        .unwrap()
    }

    #[test]
    fn draft_fields_are_kept() {
        let msg = ada();
        assert_eq!(msg.name.as_deref(), Some("Ada"));
        assert_eq!(msg.email.as_deref(), Some("ada@example.com"));
        assert_eq!(msg.message.as_deref(), Some("Hello"));
    }

    #[test]
    fn missing_fields_pass_through() {
        let msg = ContactMessage::from_draft(DocumentId::new(), Utc::now(), ContactDraft::default()).unwrap();
        assert_eq!(msg.name, None);
        assert_eq!(msg.email, None);
        assert_eq!(msg.message, None);
    }

    #[test]
    fn object_message_is_rejected() {
        let err = ContactMessage::from_draft(
            DocumentId::new(),
            Utc::now(),
            ContactDraft {
                message: Some(json!({"nested": true})),
                ..Default::default()
            },
        )
        .unwrap_err();

        assert!(err.to_string().starts_with("Message validation failed: message: Cast to string failed"));
    }

    #[test]
    fn notification_addresses_and_subject() {
        let mail = ada().notification("owner@example.com");

        assert_eq!(mail.to, "owner@example.com");
        assert_eq!(mail.from.as_deref(), Some("ada@example.com"));
        assert_eq!(mail.subject, "New Portfolio Message from Ada");
    }

    #[test]
    fn notification_html_is_not_escaped() {
        let mut msg = ada();
        msg.message = Some("<b>hi</b> & bye".to_string());

        let mail = msg.notification("owner@example.com");

        assert!(mail.html.contains("<h3>New Contact Message</h3>"));
        assert!(mail.html.contains("<p><b>Name:</b> Ada</p>"));
        assert!(mail.html.contains("<p><b>Email:</b> ada@example.com</p>"));
        assert!(mail.html.contains("<p><b>hi</b> & bye</p>"));
    }

    #[test]
    fn blank_email_leaves_sender_to_transport() {
        let mut msg = ada();
        msg.email = Some("   ".to_string());

        assert_eq!(msg.notification("owner@example.com").from, None);
    }
}
