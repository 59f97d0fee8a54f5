use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log file location: `~/.kds/logs/kds.log`.
///
/// The terminal belongs to the dashboard while it runs, so events are
/// written to a file instead of stderr.
pub fn default_log_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(".kds")
        .join("logs")
        .join("kds.log")
}

/// Initialize JSON logging into the file at `path`.
///
/// When `verbose` is true, debug-level events are emitted.
/// When `verbose` is false, info-level and above events are emitted (default).
pub fn init_logging(path: &Path, verbose: bool) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let directive = if verbose { "kds=debug" } else { "kds=info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(
            EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("Invalid log directive")),
        )
        .init();

    Ok(())
}
