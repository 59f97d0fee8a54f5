//! # Configuration System
//!
//! Hierarchical TOML configuration for the KDS dashboard.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.kds/config.toml` (global user preferences)
//! 3. **Project config** - `./.kds/config.toml` (per-kitchen overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.kds/config.toml
//! [backend]
//! base_url = "http://canteen.local:8000"
//! completion_route = "complete"
//!
//! [dashboard]
//! poll_interval_secs = 5
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use kds_core::config::KdsConfig;
//!
//! fn example() -> Result<(), kds_core::ConfigError> {
//!     let config = KdsConfig::load_hierarchy()?;
//!     println!("polling {}", config.backend.base_url());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{BackendConfig, DashboardConfig, KdsConfig};
pub use validation::validate_config;

impl KdsConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
