// --- File: crates/services/bookify_backend/src/service_factory.rs ---
//! Service factory implementation.
//!
//! This module wires the notification dispatcher into the dependency
//! injection surface the rest of the application consumes. The dispatcher is
//! built once from configuration; callers either take the shared
//! `Arc<Dispatcher>` directly or the type-erased
//! `Arc<dyn NotificationService<Error = BoxedError>>`.

use bookify_common::services::{
    BoxFuture, BoxedError, NotificationResult, NotificationService, ServiceFactory,
};
use bookify_common::{is_email_enabled, is_sms_enabled};
use bookify_config::AppConfig;
use bookify_notify::Dispatcher;
use std::sync::Arc;
use tracing::{error, info};

/// Wrapper that erases the dispatcher's concrete error type behind `BoxedError`.
struct BoxedNotificationService {
    inner: Arc<Dispatcher>,
}

impl NotificationService for BoxedNotificationService {
    type Error = BoxedError;

    fn send_email(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let fut = self.inner.send_email(to, subject, body);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }

    fn send_sms(&self, to: &str, body: &str) -> BoxFuture<'_, NotificationResult, Self::Error> {
        let fut = self.inner.send_sms(to, body);
        Box::pin(async move { fut.await.map_err(|e| BoxedError(Box::new(e))) })
    }
}

/// Service factory for the backend.
pub struct BookifyServiceFactory {
    #[allow(dead_code)]
    config: Arc<AppConfig>,
    dispatcher: Option<Arc<Dispatcher>>,
    notification_service: Option<Arc<dyn NotificationService<Error = BoxedError>>>,
}

impl BookifyServiceFactory {
    /// Create a new service factory, initializing the channels enabled in config.
    pub fn new(config: Arc<AppConfig>) -> Self {
        let mut factory = Self {
            config: config.clone(),
            dispatcher: None,
            notification_service: None,
        };

        if is_email_enabled(&config) || is_sms_enabled(&config) {
            info!("ℹ️ Initializing notification dispatcher...");
            match Dispatcher::from_config(&config) {
                Ok(dispatcher) => {
                    let dispatcher = Arc::new(dispatcher);
                    factory.notification_service = Some(Arc::new(BoxedNotificationService {
                        inner: dispatcher.clone(),
                    }));
                    factory.dispatcher = Some(dispatcher);
                }
                Err(e) => {
                    error!("Failed to initialize notification dispatcher: {}", e);
                }
            }
        }

        factory
    }

    /// The shared dispatcher, for routes that need the channel-level interface.
    pub fn dispatcher(&self) -> Option<Arc<Dispatcher>> {
        self.dispatcher.clone()
    }
}

impl ServiceFactory for BookifyServiceFactory {
    fn notification_service(&self) -> Option<Arc<dyn NotificationService<Error = BoxedError>>> {
        self.notification_service.clone()
    }
}
