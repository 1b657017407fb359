// --- File: crates/bookify_notify/src/email.rs ---
//! SMTP email channel.
//!
//! Sends plain-text mail through a STARTTLS relay with a login credential
//! pair, as configured in the `[smtp]` section. One call is one attempt.

use bookify_common::services::NotificationResult;
use bookify_config::SmtpConfig;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;
use uuid::Uuid;

use crate::dispatch::NotifyError;

/// The SMTP mailer for the email channel.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Build a mailer from the SMTP config section.
    ///
    /// Fails when the relay host or the configured sender address is invalid.
    pub fn from_config(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let from_raw = match &config.from_name {
            Some(name) => format!("{} <{}>", name, config.from_address),
            None => config.from_address.clone(),
        };
        let from: Mailbox = from_raw
            .parse()
            .map_err(|e| NotifyError::InvalidSender(format!("{}: {}", from_raw, e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| NotifyError::SmtpError(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }

    /// Send a plain-text message to `to` with the given subject and body.
    pub async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<NotificationResult, NotifyError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| NotifyError::InvalidRecipient(format!("{}: {}", to, e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| NotifyError::SmtpError(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| NotifyError::SmtpError(e.to_string()))?;

        info!("Email sent to {}: {}", to, subject);
        Ok(NotificationResult {
            id: Uuid::new_v4().to_string(),
            status: "sent".to_string(),
        })
    }
}
