//! Feature flag handling for the Bookify application.
//!
//! Notification channels are switched at runtime through configuration: a
//! channel is live when its `use_*` flag is set and its config section is
//! present. This module provides the helpers for those checks.

use bookify_config::AppConfig;
use std::sync::Arc;

/// Check if a feature is enabled at runtime based on configuration.
///
/// # Arguments
///
/// * `config` - The application configuration
/// * `use_feature` - The configuration flag that enables the feature
/// * `feature_config` - The configuration section for the feature
pub fn is_feature_enabled<T>(
    _config: &Arc<AppConfig>,
    use_feature: bool,
    feature_config: Option<&T>,
) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if the email channel is enabled at runtime.
pub fn is_email_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_email, config.smtp.as_ref())
}

/// Check if the SMS channel is enabled at runtime.
pub fn is_sms_enabled(config: &Arc<AppConfig>) -> bool {
    is_feature_enabled(config, config.use_sms, config.sms.as_ref())
}
