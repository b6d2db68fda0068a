//! Authenticated SMTP relay.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};

use folio_core::Notification;

use super::{MailError, Mailer};

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
/// Implicit-TLS submission port; any other port negotiates STARTTLS.
pub const DEFAULT_SMTP_PORT: u16 = 465;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    /// Authenticating account; also the sender when a message names none.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for SmtpSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_SMTP_HOST.to_string(),
            port: DEFAULT_SMTP_PORT,
            username: None,
            password: None,
        }
    }
}

/// Sends through an authenticated relay.
///
/// A new transport (connection + login) is set up for every message; nothing
/// is pooled between sends.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }

    fn account(&self) -> Result<&str, MailError> {
        self.settings
            .username
            .as_deref()
            .ok_or(MailError::NotConfigured("EMAIL"))
    }

    fn build_message(&self, mail: &Notification) -> Result<Message, MailError> {
        let sender = match mail.from.as_deref() {
            Some(from) => from,
            None => self.account()?,
        };
        let from = mailbox(sender)?;
        let to = mailbox(&mail.to)?;

        Message::builder()
            .from(from.clone())
            .reply_to(from)
            .to(to)
            .subject(mail.subject.as_str())
            .header(ContentType::TEXT_HTML)
            .body(mail.html.clone())
            .map_err(|e| MailError::Build(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let username = self.account()?;
        let password = self
            .settings
            .password
            .as_deref()
            .ok_or(MailError::NotConfigured("PASSWORD"))?;

        let host = self.settings.host.as_str();
        let builder = if self.settings.port == DEFAULT_SMTP_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
        }
        .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(builder
            .port(self.settings.port)
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build())
    }
}

#[async_trait::async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: &Notification) -> Result<(), MailError> {
        let message = self.build_message(mail)?;
        let transport = self.transport()?;

        let response = transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::debug!(
            host = %self.settings.host,
            code = %response.code(),
            "mail accepted by relay"
        );
        Ok(())
    }
}

fn mailbox(address: &str) -> Result<Mailbox, MailError> {
    address.trim().parse::<Mailbox>().map_err(|e| MailError::Address {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> SmtpSettings {
        SmtpSettings {
            username: Some("owner@example.com".to_string()),
            password: Some("app-password".to_string()),
            ..SmtpSettings::default()
        }
    }

    fn mail(from: Option<&str>) -> Notification {
        Notification {
            from: from.map(str::to_string),
            to: "owner@example.com".to_string(),
            subject: "New Portfolio Message from Ada".to_string(),
            html: "<p>Hello</p>".to_string(),
        }
    }

    #[test]
    fn message_uses_submitter_as_sender_and_reply_to() {
        let message = SmtpMailer::new(settings())
            .build_message(&mail(Some("ada@example.com")))
            .unwrap();

        let headers = String::from_utf8(message.formatted()).unwrap();
        assert!(headers.contains("From: ada@example.com"));
        assert!(headers.contains("Reply-To: ada@example.com"));
        assert!(headers.contains("To: owner@example.com"));
        assert!(headers.contains("Subject: New Portfolio Message from Ada"));
        assert!(headers.contains("Content-Type: text/html"));
    }

    #[test]
    fn missing_sender_falls_back_to_account() {
        let message = SmtpMailer::new(settings()).build_message(&mail(None)).unwrap();

        let headers = String::from_utf8(message.formatted()).unwrap();
        assert!(headers.contains("From: owner@example.com"));
    }

    #[test]
    fn invalid_sender_is_an_address_error() {
        let err = SmtpMailer::new(settings())
            .build_message(&mail(Some("not an address")))
            .unwrap_err();

        assert!(matches!(err, MailError::Address { .. }));
    }

    #[test]
    fn transport_requires_credentials() {
        let mailer = SmtpMailer::new(SmtpSettings {
            password: None,
            ..settings()
        });

        assert_eq!(mailer.transport().err(), Some(MailError::NotConfigured("PASSWORD")));

        let mailer = SmtpMailer::new(SmtpSettings::default());
        assert_eq!(mailer.transport().err(), Some(MailError::NotConfigured("EMAIL")));
    }
}
