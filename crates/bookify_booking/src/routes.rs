// --- File: crates/bookify_booking/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;

use bookify_common::services::{BoxedError, NotificationService};
use bookify_config::AppConfig;
use tracing::info;

use crate::handlers::{handle_create_booking, BookingState};

/// Creates a router containing the booking routes.
pub fn routes(
    config: Arc<AppConfig>,
    notifier: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
) -> Router {
    let state = Arc::new(BookingState { config, notifier });

    info!("💡 Booking: Adding /bookings route.");
    Router::new()
        .route("/bookings", post(handle_create_booking))
        .with_state(state)
}
