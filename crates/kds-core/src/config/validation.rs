//! Configuration validation logic.

use crate::config::types::KdsConfig;
use crate::errors::ConfigError;

/// Validate a KdsConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - Base URL must use `http://` or `https://`
/// - Request timeout, poll interval and clock tick must be greater than zero
pub fn validate_config(config: &KdsConfig) -> Result<(), ConfigError> {
    let base_url = config.backend.base_url();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("Invalid base_url '{}': must start with http:// or https://", base_url),
        });
    }

    if config.backend.request_timeout_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "request_timeout_ms must be greater than 0".to_string(),
        });
    }

    if config.dashboard.poll_interval_secs == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "poll_interval_secs must be greater than 0".to_string(),
        });
    }

    if config.dashboard.clock_tick_ms == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "clock_tick_ms must be greater than 0".to_string(),
        });
    }

    Ok(())
}
