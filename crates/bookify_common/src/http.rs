// --- File: crates/bookify_common/src/http.rs ---
//! HTTP utilities shared across crates.

pub mod client;
