//! Terminal dashboard.
//!
//! Owns the terminal for the lifetime of the session: input polling, the
//! redraw clock, and rendering of [`DashboardView`] snapshots. Requests run
//! on the tokio runtime entered by `main`; this loop never awaits.

use std::io::{self, Stdout, stdout};
use std::time::Duration;

use chrono::Local;
use crossterm::ExecutableCommand;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use kds_core::config::DashboardConfig;
use kds_core::controller::COMPLETION_ERROR_MESSAGE;
use kds_core::{CompletionError, DashboardController, DashboardView, QueueBackend};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{error, info};

pub mod clock;
pub mod events;
pub mod state;
pub mod ui;

use clock::Clock;
use events::InputEvent;
use state::{UiAction, UiState};

/// Upper bound on input wait, so state pushed by the controller shows quickly.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Run the dashboard until the user quits.
pub fn run<B: QueueBackend>(
    controller: DashboardController<B>,
    settings: &DashboardConfig,
) -> io::Result<()> {
    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let result = run_loop(&mut terminal, controller, settings);

    restore_terminal()?;
    result
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout()))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Leave the alternate screen before the default hook prints the panic.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

fn run_loop<T: Backend, B: QueueBackend>(
    terminal: &mut Terminal<T>,
    controller: DashboardController<B>,
    settings: &DashboardConfig,
) -> io::Result<()> {
    let mut poller = controller.start_polling(settings.poll_interval());
    let mut state_rx = controller.subscribe();
    let (alert_tx, mut alert_rx) = mpsc::unbounded_channel::<String>();

    let mut ui_state = UiState::new();
    let mut clock = Clock::new(settings.clock_tick());
    let mut dirty = true;

    loop {
        while let Ok(message) = alert_rx.try_recv() {
            ui_state.show_alert(message);
            dirty = true;
        }

        if dirty || clock.is_due() || state_rx.has_changed().unwrap_or(false) {
            let view = DashboardView::build(&state_rx.borrow_and_update(), &Local::now());
            ui_state.clamp_selection(view.cards().len());
            terminal.draw(|frame| ui::draw(frame, &view, &ui_state))?;
            clock.reset();
            dirty = false;
        }

        let event = events::poll_event(clock.remaining().min(INPUT_POLL));
        if event == InputEvent::None {
            continue;
        }

        let view = DashboardView::build(&state_rx.borrow(), &Local::now());
        match ui_state.handle(event, &view) {
            UiAction::Complete(order_id) => spawn_completion(&controller, order_id, &alert_tx),
            UiAction::Retry => {
                info!(event = "ui.app.retry_requested");
                controller.spawn_refresh();
            }
            UiAction::Quit => break,
            UiAction::None => {}
        }
        dirty = true;
    }

    poller.stop();
    info!(event = "ui.app.quit");
    Ok(())
}

/// Complete an order in the background; failures come back as alerts.
fn spawn_completion<B: QueueBackend>(
    controller: &DashboardController<B>,
    order_id: String,
    alerts: &mpsc::UnboundedSender<String>,
) {
    info!(event = "ui.app.completion_requested", order_id = %order_id);

    let controller = controller.clone();
    let alerts = alerts.clone();
    tokio::spawn(async move {
        match controller.complete_order(&order_id).await {
            Ok(()) => {}
            // The card was already disabled; nothing to tell the user.
            Err(CompletionError::AlreadyInFlight { .. }) => {}
            Err(e) => {
                error!(
                    event = "ui.app.completion_failed",
                    order_id = %order_id,
                    error = %e
                );
                let _ = alerts.send(COMPLETION_ERROR_MESSAGE.to_string());
            }
        }
    });
}
