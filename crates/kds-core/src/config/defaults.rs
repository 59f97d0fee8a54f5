//! Default values for configuration types.

use std::time::Duration;

use crate::client::CompletionRoute;
use crate::config::types::{BackendConfig, DashboardConfig};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 3;
pub const DEFAULT_CLOCK_TICK_MS: u64 = 1000;

impl BackendConfig {
    /// Returns the base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
    }

    pub fn completion_route(&self) -> CompletionRoute {
        self.completion_route.unwrap_or_default()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(
            self.request_timeout_ms
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }
}

impl DashboardConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(
            self.poll_interval_secs
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        )
    }

    pub fn clock_tick(&self) -> Duration {
        Duration::from_millis(self.clock_tick_ms.unwrap_or(DEFAULT_CLOCK_TICK_MS))
    }
}
