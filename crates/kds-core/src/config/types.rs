//! Configuration type definitions for KDS.
//!
//! These types are deserialized from TOML config files. Every value is
//! optional so that partial files merge cleanly; accessors in
//! [`super::defaults`] supply the fallbacks.
//!
//! # Example Configuration
//!
//! ```toml
//! [backend]
//! base_url = "http://localhost:8000"
//! completion_route = "update_status"
//! request_timeout_ms = 5000
//!
//! [dashboard]
//! poll_interval_secs = 3
//! clock_tick_ms = 1000
//! ```

use serde::{Deserialize, Serialize};

use crate::client::CompletionRoute;

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct KdsConfig {
    /// Backend order-queue service
    #[serde(default)]
    pub backend: BackendConfig,

    /// Polling and redraw behavior
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Where the order queue lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the backend. Default: `http://localhost:8000`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Which completion endpoint the backend exposes.
    /// Default: `update_status`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_route: Option<CompletionRoute>,

    /// Per-request timeout in milliseconds. Default: 5000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DashboardConfig {
    /// Seconds between queue polls. Default: 3.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_interval_secs: Option<u64>,

    /// Milliseconds between redraws (keeps the clock current). Default: 1000.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_tick_ms: Option<u64>,
}
