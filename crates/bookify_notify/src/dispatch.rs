// --- File: crates/bookify_notify/src/dispatch.rs ---
//! The dispatch interface over both notification channels.
//!
//! A `Dispatcher` holds whichever channels are enabled by configuration and
//! performs exactly one delivery attempt per call. Channel failures never
//! escape `dispatch`; they come back as `DeliveryResult::Failed`.

use bookify_common::services::{BoxFuture, NotificationResult, NotificationService};
use bookify_common::{is_email_enabled, is_sms_enabled};
use bookify_config::AppConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

use crate::email::SmtpMailer;
use crate::sms::HttpSmsSender;

/// Notification channel errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Error occurred while talking to the SMS provider
    #[error("SMS provider request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the SMS provider
    #[error("SMS provider returned an error: {message} (Status: {status_code})")]
    ProviderError { status_code: u16, message: String },

    /// The configured sender address does not parse as a mailbox
    #[error("Invalid sender address: {0}")]
    InvalidSender(String),

    /// The recipient address does not parse as a mailbox
    #[error("Invalid recipient address: {0}")]
    InvalidRecipient(String),

    /// SMTP connection, authentication or protocol failure
    #[error("SMTP transport error: {0}")]
    SmtpError(String),

    /// The requested channel is switched off or missing its config section
    #[error("{0} channel is not configured")]
    ChannelDisabled(&'static str),
}

/// The notification transport variant used for a dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Channel {
    Email,
    Sms,
}

/// The outcome of a single dispatch attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum DeliveryResult {
    Delivered(NotificationResult),
    Failed { reason: String },
}

impl DeliveryResult {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryResult::Delivered(_))
    }
}

/// Dispatches confirmation messages over the enabled channels.
pub struct Dispatcher {
    mailer: Option<SmtpMailer>,
    sms: Option<HttpSmsSender>,
}

impl Dispatcher {
    /// Build a dispatcher with the channels enabled in `config`.
    ///
    /// A channel is built only when its runtime flag is set and its config
    /// section is present. A misconfigured enabled channel (e.g. an invalid
    /// sender address) is an error here, not at dispatch time.
    pub fn from_config(config: &Arc<AppConfig>) -> Result<Self, NotifyError> {
        let mailer = match (is_email_enabled(config), config.smtp.as_ref()) {
            (true, Some(smtp)) => Some(SmtpMailer::from_config(smtp)?),
            _ => None,
        };
        let sms = match (is_sms_enabled(config), config.sms.as_ref()) {
            (true, Some(sms)) => Some(HttpSmsSender::from_config(sms)),
            _ => None,
        };
        Ok(Self { mailer, sms })
    }

    /// Build a dispatcher directly from channel instances.
    pub fn new(mailer: Option<SmtpMailer>, sms: Option<HttpSmsSender>) -> Self {
        Self { mailer, sms }
    }

    /// Perform one delivery attempt on the given channel.
    ///
    /// `subject` is only meaningful for the email channel; the SMS provider
    /// takes the body alone. Errors are folded into the returned result.
    pub async fn dispatch(
        &self,
        channel: Channel,
        target: &str,
        subject: &str,
        body: &str,
    ) -> DeliveryResult {
        let outcome = match channel {
            Channel::Email => match &self.mailer {
                Some(mailer) => mailer.send(target, subject, body).await,
                None => Err(NotifyError::ChannelDisabled("email")),
            },
            Channel::Sms => match &self.sms {
                Some(sender) => sender.send(target, body).await,
                None => Err(NotifyError::ChannelDisabled("sms")),
            },
        };

        match outcome {
            Ok(result) => DeliveryResult::Delivered(result),
            Err(e) => {
                warn!("Dispatch on {:?} channel to {} failed: {}", channel, target, e);
                DeliveryResult::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl NotificationService for Dispatcher {
    type Error = NotifyError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        // Clone the values to avoid lifetime issues
        let to = to.to_string();
        let subject = subject.to_string();
        let body = body.to_string();

        Box::pin(async move {
            match &self.mailer {
                Some(mailer) => mailer.send(&to, &subject, &body).await,
                None => Err(NotifyError::ChannelDisabled("email")),
            }
        })
    }

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let to = to.to_string();
        let body = body.to_string();

        Box::pin(async move {
            match &self.sms {
                Some(sender) => sender.send(&to, &body).await,
                None => Err(NotifyError::ChannelDisabled("sms")),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn dispatch_on_unconfigured_channel_reports_failure() {
        let dispatcher = Dispatcher::new(None, None);
        let result = dispatcher
            .dispatch(Channel::Email, "customer@example.com", "Subject", "Body")
            .await;
        match result {
            DeliveryResult::Failed { reason } => {
                assert_eq!(reason, "email channel is not configured")
            }
            DeliveryResult::Delivered(_) => panic!("nothing was configured to deliver"),
        }
    }

    #[tokio::test]
    async fn failed_sms_delivery_stays_inside_the_dispatcher_boundary() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(403).body("bad api key");
        });

        let config = bookify_config::SmsConfig {
            api_url: server.url("/send"),
            api_key: "wrong".into(),
        };
        let dispatcher = Dispatcher::new(None, Some(HttpSmsSender::from_config(&config)));

        let result = dispatcher
            .dispatch(Channel::Sms, "+41791234567", "", "hello")
            .await;
        assert!(!result.is_delivered());
    }

    #[tokio::test]
    async fn successful_sms_delivery_is_reported_as_delivered() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(200);
        });

        let config = bookify_config::SmsConfig {
            api_url: server.url("/send"),
            api_key: "k".into(),
        };
        let dispatcher = Dispatcher::new(None, Some(HttpSmsSender::from_config(&config)));

        let result = dispatcher
            .dispatch(Channel::Sms, "+41791234567", "", "hello")
            .await;
        assert!(result.is_delivered());
    }
}
