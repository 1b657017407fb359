// --- File: crates/bookify_booking/src/logic.rs ---
//! Booking construction and confirmation rendering.
//!
//! Construction is pure: it validates the raw input and assembles the record,
//! nothing else. Dispatching the confirmation is the caller's explicit second
//! step.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Expected calendar date format, e.g. "2023-11-01".
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Expected time-of-day format, 12-hour clock with meridiem, e.g. "10:00 AM".
pub const TIME_FORMAT: &str = "%I:%M %p";

// local-part "@" domain with at least one dot
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)+$")
        .expect("email pattern must compile")
});

// --- Error Handling for Booking Construction ---
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}

impl From<BookingError> for bookify_common::BookifyError {
    fn from(err: BookingError) -> Self {
        bookify_common::validation_error(err)
    }
}

/// The validated tuple of service name, date, time and contact email.
///
/// The four input fields are held verbatim; `starts_at` is the combined
/// timestamp the validation produced. The record has no identity and no
/// lifecycle beyond construction, dispatch and drop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingRecord {
    pub service_name: String,
    pub date: String,
    pub time: String,
    pub contact_email: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "2023-11-01T10:00:00"))]
    pub starts_at: NaiveDateTime,
}

/// Validate the raw input and assemble a booking record.
///
/// `date` and `time` must combine into a valid timestamp and `email` must
/// match the basic email-shape pattern. On success the record holds the four
/// inputs verbatim.
pub fn construct_booking(
    service_name: &str,
    date: &str,
    time: &str,
    email: &str,
) -> Result<BookingRecord, BookingError> {
    let parsed_date = NaiveDate::parse_from_str(date, DATE_FORMAT)
        .map_err(|e| BookingError::InvalidDateTime(format!("{} {}: {}", date, time, e)))?;
    let parsed_time = NaiveTime::parse_from_str(time, TIME_FORMAT)
        .map_err(|e| BookingError::InvalidDateTime(format!("{} {}: {}", date, time, e)))?;

    if !EMAIL_RE.is_match(email) {
        return Err(BookingError::InvalidEmail(email.to_string()));
    }

    Ok(BookingRecord {
        service_name: service_name.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        contact_email: email.to_string(),
        starts_at: parsed_date.and_time(parsed_time),
    })
}

/// Subject line of the confirmation email.
pub fn confirmation_subject() -> &'static str {
    "Booking Confirmation"
}

/// Body of the confirmation email, rendered deterministically from the record.
pub fn confirmation_body(record: &BookingRecord) -> String {
    format!(
        "Dear Customer,\n\nYour booking for {} on {} at {} has been confirmed.\n\n\
         Thank you for choosing our service.\n\nBest regards,\nYour Company",
        record.service_name, record.date, record.time
    )
}

/// One-line confirmation for the SMS channel.
pub fn confirmation_sms_body(record: &BookingRecord) -> String {
    format!(
        "Your booking for {} on {} at {} has been confirmed.",
        record.service_name, record.date, record.time
    )
}
