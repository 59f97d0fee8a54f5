//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.kds/config.toml`
//! 3. **Project config** - `./.kds/config.toml`
//! 4. **CLI arguments** - applied by the binary after loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::types::{BackendConfig, DashboardConfig, KdsConfig};
use crate::config::validation::validate_config;
use crate::errors::ConfigError;

fn is_file_not_found(e: &ConfigError) -> bool {
    matches!(e, ConfigError::IoError { source } if source.kind() == std::io::ErrorKind::NotFound)
}

/// Path of the user config file, if a home directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".kds").join("config.toml"))
}

/// Path of the project config file relative to the current directory.
pub fn project_config_path() -> Result<PathBuf, ConfigError> {
    Ok(std::env::current_dir()?.join(".kds").join("config.toml"))
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be parsed, or if the
/// merged configuration fails validation. Missing config files are not errors.
pub fn load_hierarchy() -> Result<KdsConfig, ConfigError> {
    let project = project_config_path()?;
    load_hierarchy_from(user_config_path().as_deref(), Some(&project))
}

/// Load and merge the given config files in order, then validate.
pub fn load_hierarchy_from(
    user: Option<&Path>,
    project: Option<&Path>,
) -> Result<KdsConfig, ConfigError> {
    let mut config = KdsConfig::default();

    for path in [user, project].into_iter().flatten() {
        match load_config_file(path) {
            Ok(file_config) => {
                info!(event = "core.config.file_loaded", path = %path.display());
                config = merge_configs(config, file_config);
            }
            Err(e) if is_file_not_found(&e) => {
                debug!(event = "core.config.file_missing", path = %path.display());
            }
            Err(e) => return Err(e),
        }
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
pub fn load_config_file(path: &Path) -> Result<KdsConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::ConfigParseError {
        message: format!("{}: {}", path.display(), e),
    })
}

/// Merge two configurations, with `override_config` taking precedence.
///
/// Values set in the override replace base values; unset values fall through.
pub fn merge_configs(base: KdsConfig, override_config: KdsConfig) -> KdsConfig {
    KdsConfig {
        backend: BackendConfig {
            base_url: override_config.backend.base_url.or(base.backend.base_url),
            completion_route: override_config
                .backend
                .completion_route
                .or(base.backend.completion_route),
            request_timeout_ms: override_config
                .backend
                .request_timeout_ms
                .or(base.backend.request_timeout_ms),
        },
        dashboard: DashboardConfig {
            poll_interval_secs: override_config
                .dashboard
                .poll_interval_secs
                .or(base.dashboard.poll_interval_secs),
            clock_tick_ms: override_config
                .dashboard
                .clock_tick_ms
                .or(base.dashboard.clock_tick_ms),
        },
    }
}
