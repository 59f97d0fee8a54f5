//! kds: terminal kitchen display
//!
//! Ratatui dashboard that polls the order queue and lets staff mark orders
//! ready.

use std::path::PathBuf;

use kds_core::logging::default_log_path;
use kds_core::{DashboardController, HttpQueueClient, KdsConfig, init_logging};
use tracing::info;

mod app;
mod tui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = app::build_cli().get_matches();

    let verbose = matches.get_flag("verbose");
    let log_path = matches
        .get_one::<PathBuf>("log-file")
        .cloned()
        .unwrap_or_else(default_log_path);
    init_logging(&log_path, verbose)?;

    let config = app::apply_overrides(KdsConfig::load_hierarchy()?, &matches)?;
    info!(
        event = "ui.main.started",
        base_url = config.backend.base_url(),
        route = %config.backend.completion_route(),
        poll_interval_secs = config.dashboard.poll_interval().as_secs()
    );

    let client = HttpQueueClient::new(&config.backend)?;

    // The UI loop blocks on terminal input, so it runs on the main thread
    // while requests run on the runtime's workers.
    let runtime = tokio::runtime::Runtime::new()?;
    let _enter = runtime.enter();

    let controller = DashboardController::new(client);
    tui::run(controller, &config.dashboard)?;

    info!(event = "ui.main.exited");
    Ok(())
}
