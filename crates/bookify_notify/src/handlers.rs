// --- File: crates/bookify_notify/src/handlers.rs ---
//! Direct-send handlers for the notification channels.

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;

use bookify_common::{
    config_error, external_service_error, is_email_enabled, is_sms_enabled, BookifyError,
    HttpStatusCode,
};
use bookify_config::AppConfig;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dispatch::{Channel, DeliveryResult, Dispatcher};

/// Shared state for the notification handlers.
#[derive(Clone)]
pub struct NotifyState {
    pub config: Arc<AppConfig>,
    pub dispatcher: Arc<Dispatcher>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SmsRequest {
    pub to: String,
    pub message: String,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmailRequest {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendResponse {
    pub success: bool,
    pub message: String,
}

fn error_response(err: BookifyError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

pub async fn send_sms(
    State(state): State<Arc<NotifyState>>,
    Json(request): Json<SmsRequest>,
) -> Result<Json<SendResponse>, (StatusCode, String)> {
    if !is_sms_enabled(&state.config) {
        return Err(error_response(config_error("SMS channel disabled")));
    }

    info!("Sending SMS to {}", &request.to);
    match state
        .dispatcher
        .dispatch(Channel::Sms, &request.to, "", &request.message)
        .await
    {
        DeliveryResult::Delivered(_) => Ok(Json(SendResponse {
            success: true,
            message: "SMS sent successfully".into(),
        })),
        DeliveryResult::Failed { reason } => {
            Err(error_response(external_service_error("sms-provider", reason)))
        }
    }
}

pub async fn send_email(
    State(state): State<Arc<NotifyState>>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<SendResponse>, (StatusCode, String)> {
    if !is_email_enabled(&state.config) {
        return Err(error_response(config_error("Email channel disabled")));
    }

    info!("Sending email to {}: {}", &request.to, &request.subject);
    match state
        .dispatcher
        .dispatch(Channel::Email, &request.to, &request.subject, &request.body)
        .await
    {
        DeliveryResult::Delivered(_) => Ok(Json(SendResponse {
            success: true,
            message: "Email sent successfully".into(),
        })),
        DeliveryResult::Failed { reason } => {
            Err(error_response(external_service_error("smtp", reason)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sms::HttpSmsSender;
    use bookify_config::{ServerConfig, SmsConfig};
    use httpmock::prelude::*;

    fn state(use_sms: bool, provider_url: &str) -> Arc<NotifyState> {
        let sms_config = SmsConfig {
            api_url: provider_url.to_string(),
            api_key: "k".into(),
        };
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8086,
            },
            use_email: false,
            use_sms,
            smtp: None,
            sms: Some(sms_config.clone()),
        };
        Arc::new(NotifyState {
            config: Arc::new(config),
            dispatcher: Arc::new(Dispatcher::new(
                None,
                Some(HttpSmsSender::from_config(&sms_config)),
            )),
        })
    }

    fn sms_request() -> Json<SmsRequest> {
        Json(SmsRequest {
            to: "+41791234567".into(),
            message: "hello".into(),
        })
    }

    #[tokio::test]
    async fn disabled_sms_channel_is_a_503() {
        let state = state(false, "https://sms.example.com/send");
        let (status, message) = send_sms(State(state), sms_request())
            .await
            .expect_err("disabled channel must be rejected");
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(message.starts_with("Configuration error:"));
    }

    #[tokio::test]
    async fn failed_provider_dispatch_is_a_502() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(500).body("provider exploded");
        });

        let state = state(true, &server.url("/send"));
        let (status, message) = send_sms(State(state), sms_request())
            .await
            .expect_err("failed dispatch must be rejected");
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(message.contains("sms-provider"));
    }

    #[tokio::test]
    async fn successful_dispatch_is_a_200() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/send");
            then.status(200);
        });

        let state = state(true, &server.url("/send"));
        let Json(response) = send_sms(State(state), sms_request())
            .await
            .expect("delivered dispatch must succeed");
        assert!(response.success);
    }
}
