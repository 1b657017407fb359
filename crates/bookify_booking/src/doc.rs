// --- File: crates/bookify_booking/src/doc.rs ---

// Only compile this module if the 'openapi' feature is enabled
#![cfg(feature = "openapi")]
// Allow dead code for the dummy function used by the macro
#![allow(dead_code)]

use utoipa::OpenApi;

use crate::handlers::{BookingRequest, BookingResponse, DeliverySummary};
use crate::logic::BookingRecord;

#[utoipa::path(
    post,
    path = "/bookings",
    request_body = BookingRequest,
    responses(
        (status = 200, description = "Booking constructed; delivery outcome in the body", body = BookingResponse),
        (status = 422, description = "Invalid date/time or email address", body = String)
    ),
    tag = "Booking"
)]
fn doc_create_booking() {
    // Anchor for the macro, never executed.
}

#[derive(OpenApi)]
#[openapi(
    paths(doc_create_booking),
    components(schemas(BookingRequest, BookingResponse, BookingRecord, DeliverySummary)),
    tags(
        (name = "Booking", description = "Booking construction and confirmation dispatch")
    )
)]
pub struct BookingApiDoc;
