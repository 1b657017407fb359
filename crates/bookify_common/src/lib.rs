// --- File: crates/bookify_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, external_service_error, validation_error, BookifyError, HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::client::{post_form, HTTP_CLIENT};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level};

// Re-export feature flag handling utilities for easier access
pub use features::{is_email_enabled, is_feature_enabled, is_sms_enabled};

// This crate provides common functionality that can be used across the application.
// It includes shared error handling, logging, HTTP utilities and service traits.
