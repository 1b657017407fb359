// --- File: crates/bookify_notify/src/lib.rs ---

// Declare modules within this crate
pub mod dispatch; // Channel/DeliveryResult types and the Dispatcher
pub mod email; // SMTP email channel
pub mod handlers; // Axum handlers for direct sends
pub mod routes; // Axum router definition for this crate
pub mod sms; // HTTP SMS channel
#[cfg(feature = "openapi")]
pub mod doc;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export the dispatch surface for callers that bypass HTTP (CLI, booking flow)
pub use dispatch::{Channel, DeliveryResult, Dispatcher, NotifyError};
