// --- File: crates/bookify_notify/src/routes.rs ---
use axum::{routing::post, Router};
use std::sync::Arc;

use bookify_common::{is_email_enabled, is_sms_enabled};
use bookify_config::AppConfig;
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::handlers::{send_email, send_sms, NotifyState};

/// Creates a router containing the direct-send routes for the enabled channels.
pub fn routes(config: Arc<AppConfig>, dispatcher: Arc<Dispatcher>) -> Router {
    let state = Arc::new(NotifyState {
        config: config.clone(),
        dispatcher,
    });

    let mut router = Router::new();

    if is_email_enabled(&config) {
        info!("💡 Notify: Adding /notify/email route.");
        router = router.route("/notify/email", post(send_email));
    }
    if is_sms_enabled(&config) {
        info!("💡 Notify: Adding /notify/sms route.");
        router = router.route("/notify/sms", post(send_sms));
    }

    router.with_state(state)
}
