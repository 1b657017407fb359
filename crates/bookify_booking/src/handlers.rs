// --- File: crates/bookify_booking/src/handlers.rs ---
//! Axum handler for the booking flow: validate, construct, dispatch, report.

use axum::{extract::State, http::StatusCode, response::Json};
use std::sync::Arc;

use bookify_common::services::{BoxedError, NotificationService};
use bookify_common::{is_email_enabled, is_sms_enabled, BookifyError, HttpStatusCode};
use bookify_config::AppConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::logic::{
    confirmation_body, confirmation_sms_body, confirmation_subject, construct_booking,
    BookingRecord,
};

/// Shared state for the booking handlers.
#[derive(Clone)]
pub struct BookingState {
    pub config: Arc<AppConfig>,
    pub notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "Haircut"))]
    pub service_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "2023-11-01"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "10:00 AM"))]
    pub time: String,
    #[cfg_attr(feature = "openapi", schema(example = "customer@example.com"))]
    pub email: String,
    /// Optional phone number; when present the confirmation also goes out as SMS.
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(example = "+41791234567"))]
    pub phone: Option<String>,
}

/// The delivery outcome reported back with the booking.
#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DeliverySummary {
    pub channel: String,
    pub delivered: bool,
    pub detail: String,
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub booking: BookingRecord,
    pub delivery: DeliverySummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sms_delivery: Option<DeliverySummary>,
}

/// Handle `POST /bookings`: construct the record, then dispatch the email
/// confirmation through the injected notification service.
///
/// Validation failures are the caller's fault (422). A failed delivery is not:
/// the booking itself was well-formed, so the outcome is reported in the
/// response body instead of failing the request.
pub async fn handle_create_booking(
    State(state): State<Arc<BookingState>>,
    Json(payload): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, (StatusCode, String)> {
    let record = construct_booking(
        &payload.service_name,
        &payload.date,
        &payload.time,
        &payload.email,
    )
    .map_err(|e| error_response(BookifyError::from(e)))?;

    info!(
        "Booking constructed for {} on {} at {}",
        record.service_name, record.date, record.time
    );

    let delivery = dispatch_confirmation(&state, &record).await;
    let sms_delivery = match &payload.phone {
        Some(phone) => Some(dispatch_sms_confirmation(&state, &record, phone).await),
        None => None,
    };

    Ok(Json(BookingResponse {
        booking: record,
        delivery,
        sms_delivery,
    }))
}

fn error_response(err: BookifyError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, err.to_string())
}

async fn dispatch_confirmation(state: &BookingState, record: &BookingRecord) -> DeliverySummary {
    let notifier = match (&state.notifier, is_email_enabled(&state.config)) {
        (Some(notifier), true) => notifier,
        _ => {
            warn!("No email channel available, booking confirmation not sent");
            return DeliverySummary {
                channel: "email".into(),
                delivered: false,
                detail: "email channel is not configured".into(),
            };
        }
    };

    match notifier
        .send_email(
            &record.contact_email,
            confirmation_subject(),
            &confirmation_body(record),
        )
        .await
    {
        Ok(result) => DeliverySummary {
            channel: "email".into(),
            delivered: true,
            detail: result.status,
        },
        Err(e) => {
            warn!("Confirmation email to {} failed: {}", record.contact_email, e);
            DeliverySummary {
                channel: "email".into(),
                delivered: false,
                detail: e.to_string(),
            }
        }
    }
}

async fn dispatch_sms_confirmation(
    state: &BookingState,
    record: &BookingRecord,
    phone: &str,
) -> DeliverySummary {
    let notifier = match (&state.notifier, is_sms_enabled(&state.config)) {
        (Some(notifier), true) => notifier,
        _ => {
            warn!("No SMS channel available, booking confirmation not sent to {}", phone);
            return DeliverySummary {
                channel: "sms".into(),
                delivered: false,
                detail: "sms channel is not configured".into(),
            };
        }
    };

    match notifier.send_sms(phone, &confirmation_sms_body(record)).await {
        Ok(result) => DeliverySummary {
            channel: "sms".into(),
            delivered: true,
            detail: result.status,
        },
        Err(e) => {
            warn!("Confirmation SMS to {} failed: {}", phone, e);
            DeliverySummary {
                channel: "sms".into(),
                delivered: false,
                detail: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookify_common::services::{BoxFuture, NotificationResult};
    use bookify_config::{ServerConfig, SmtpConfig};

    struct StubNotifier {
        fail: bool,
    }

    impl NotificationService for StubNotifier {
        type Error = BoxedError;

        fn send_email(
            &self,
            _to: &str,
            _subject: &str,
            _body: &str,
        ) -> BoxFuture<'_, NotificationResult, Self::Error> {
            let fail = self.fail;
            Box::pin(async move {
                if fail {
                    Err(BoxedError(
                        "SMTP transport error: 535 authentication rejected".into(),
                    ))
                } else {
                    Ok(NotificationResult {
                        id: "stub-1".into(),
                        status: "sent".into(),
                    })
                }
            })
        }

        fn send_sms(&self, _to: &str, _body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
            Box::pin(async move {
                Ok(NotificationResult {
                    id: "stub-2".into(),
                    status: "sent".into(),
                })
            })
        }
    }

    fn state_with(notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>) -> Arc<BookingState> {
        let config = AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 8086,
            },
            use_email: true,
            use_sms: true,
            smtp: Some(SmtpConfig {
                host: "smtp.example.com".into(),
                port: 587,
                username: "mailer".into(),
                password: "pw".into(),
                from_address: "no-reply@example.com".into(),
                from_name: None,
            }),
            sms: Some(bookify_config::SmsConfig {
                api_url: "https://sms.example.com/send".into(),
                api_key: "k".into(),
            }),
        };
        Arc::new(BookingState {
            config: Arc::new(config),
            notifier,
        })
    }

    fn haircut_request() -> BookingRequest {
        BookingRequest {
            service_name: "Haircut".into(),
            date: "2023-11-01".into(),
            time: "10:00 AM".into(),
            email: "customer@example.com".into(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn booking_with_working_notifier_reports_delivered() {
        let state = state_with(Some(Arc::new(StubNotifier { fail: false })));
        let Json(response) = handle_create_booking(State(state), Json(haircut_request()))
            .await
            .expect("valid booking must succeed");
        assert_eq!(response.booking.service_name, "Haircut");
        assert!(response.delivery.delivered);
        assert!(response.sms_delivery.is_none());
    }

    #[tokio::test]
    async fn phone_number_adds_an_sms_confirmation_leg() {
        let state = state_with(Some(Arc::new(StubNotifier { fail: false })));
        let mut request = haircut_request();
        request.phone = Some("+41791234567".into());
        let Json(response) = handle_create_booking(State(state), Json(request))
            .await
            .expect("valid booking must succeed");
        let sms = response.sms_delivery.expect("phone given, SMS leg expected");
        assert_eq!(sms.channel, "sms");
        assert!(sms.delivered);
    }

    #[tokio::test]
    async fn transport_failure_is_reported_not_raised() {
        let state = state_with(Some(Arc::new(StubNotifier { fail: true })));
        let Json(response) = handle_create_booking(State(state), Json(haircut_request()))
            .await
            .expect("the booking itself is still well-formed");
        assert!(!response.delivery.delivered);
        assert!(response.delivery.detail.contains("authentication rejected"));
    }

    #[tokio::test]
    async fn invalid_email_is_a_422() {
        let state = state_with(Some(Arc::new(StubNotifier { fail: false })));
        let mut request = haircut_request();
        request.email = "a@b".into();
        let (status, message) = handle_create_booking(State(state), Json(request))
            .await
            .expect_err("malformed email must be rejected");
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(message.contains("a@b"));
        // the status comes from the shared error mapping
        assert!(message.starts_with("Validation error:"));
    }

    #[tokio::test]
    async fn missing_notifier_means_undelivered_but_constructed() {
        let state = state_with(None);
        let Json(response) = handle_create_booking(State(state), Json(haircut_request()))
            .await
            .expect("construction does not depend on dispatch");
        assert!(!response.delivery.delivered);
    }
}
