// --- File: crates/bookify_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- SMTP Config ---
// Holds the outbound mail settings. The password is never written into the
// config file; the file carries the "secret_from_env" marker and the value is
// injected from the SMTP_PASSWORD environment variable.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmtpConfig {
    pub host: String, // e.g. smtp.example.com
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: String,
    pub password: String, // Loaded via marker from env var: SMTP_PASSWORD
    pub from_address: String,
    pub from_name: Option<String>,
}

fn default_smtp_port() -> u16 {
    587 // submission port, STARTTLS
}

// --- SMS Provider Config ---
// Holds non-secret SMS provider config. API key loaded via marker from the
// SMS_API_KEY environment variable.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmsConfig {
    pub api_url: String, // Mandatory, the provider's send endpoint
    pub api_key: String, // Loaded via marker from env var: SMS_API_KEY
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_email: bool,
    #[serde(default)]
    pub use_sms: bool,

    // --- Optional Channel Configurations ---
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,
    #[serde(default)]
    pub sms: Option<SmsConfig>,
}
