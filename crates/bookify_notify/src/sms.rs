// --- File: crates/bookify_notify/src/sms.rs ---
//! HTTP SMS channel.
//!
//! Issues a form-encoded POST to the configured provider endpoint. The
//! provider contract is `{phone_number, message, api_key}` in the body and
//! HTTP 200 on success; any other status is a delivery failure.

use bookify_common::http::client::post_form;
use bookify_common::services::NotificationResult;
use bookify_config::SmsConfig;
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::dispatch::NotifyError;

#[derive(Serialize, Debug)]
struct SmsPayload<'a> {
    phone_number: &'a str,
    message: &'a str,
    api_key: &'a str,
}

/// The HTTP sender for the SMS channel.
pub struct HttpSmsSender {
    api_url: String,
    api_key: String,
}

impl HttpSmsSender {
    /// Build a sender from the SMS config section.
    pub fn from_config(config: &SmsConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Send `message` to the phone number `to`.
    pub async fn send(&self, to: &str, message: &str) -> Result<NotificationResult, NotifyError> {
        info!("Sending SMS to {}", to);
        let resp = post_form(
            &self.api_url,
            &SmsPayload {
                phone_number: to,
                message,
                api_key: &self.api_key,
            },
        )
        .await?;

        let status = resp.status();
        if status.as_u16() != 200 {
            // Bubble up the provider body so the failure can be debugged
            let body = resp.text().await.unwrap_or_default();
            error!("SMS provider returned {}: {}", status, body);
            return Err(NotifyError::ProviderError {
                status_code: status.as_u16(),
                message: body,
            });
        }

        info!("SMS sent to {}", to);
        Ok(NotificationResult {
            id: Uuid::new_v4().to_string(),
            status: "sent".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn provider_200_is_a_successful_delivery() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/send")
                .header("content-type", "application/x-www-form-urlencoded")
                .body_contains("message=Your+booking+has+been+confirmed.")
                .body_contains("api_key=test-key");
            then.status(200).body("queued");
        });

        let sender = HttpSmsSender {
            api_url: server.url("/send"),
            api_key: "test-key".into(),
        };
        let result = sender
            .send("+41791234567", "Your booking has been confirmed.")
            .await;

        mock.assert();
        let result = result.expect("200 from the provider must be reported as success");
        assert_eq!(result.status, "sent");
    }

    #[tokio::test]
    async fn provider_non_200_is_a_failed_delivery() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(500).body("provider exploded");
        });

        let sender = HttpSmsSender {
            api_url: server.url("/send"),
            api_key: "test-key".into(),
        };
        match sender.send("+41791234567", "hello").await {
            Err(NotifyError::ProviderError {
                status_code,
                message,
            }) => {
                assert_eq!(status_code, 500);
                assert_eq!(message, "provider exploded");
            }
            other => panic!("expected ProviderError, got {:?}", other.map(|_| ())),
        }
    }
}
