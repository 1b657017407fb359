// --- File: crates/bookify_booking/src/lib.rs ---

// Declare modules within this crate
pub mod handlers; // Axum handlers for the booking flow
pub mod logic; // Validation, records and confirmation rendering
pub mod routes; // Axum router definition for this crate
#[cfg(feature = "openapi")]
pub mod doc;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export the construction surface for callers that bypass HTTP (CLI)
pub use logic::{
    confirmation_body, confirmation_sms_body, confirmation_subject, construct_booking,
    BookingError, BookingRecord,
};
