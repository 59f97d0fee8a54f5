//! Dashboard controller: polls the queue and completes orders.
//!
//! The controller owns the only writer of [`DashboardState`]. Snapshots are
//! published through a `tokio::sync::watch` channel; renderers subscribe and
//! always see the latest one. Every change goes through
//! [`DashboardState::apply`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Local;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::client::QueueBackend;
use crate::errors::{CompletionError, FetchError, KdsError};
use crate::state::{DashboardEvent, DashboardState};

/// Message shown while the queue cannot be fetched.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch orders. Is the backend running?";

/// Message shown when marking an order ready fails.
pub const COMPLETION_ERROR_MESSAGE: &str = "Failed to complete order. Please try again.";

struct Inner<B> {
    backend: B,
    state: watch::Sender<DashboardState>,
    /// Last sequence number handed to a fetch.
    next_seq: AtomicU64,
}

/// Handle to the dashboard controller. Clones share the same state.
pub struct DashboardController<B> {
    inner: Arc<Inner<B>>,
}

impl<B> Clone for DashboardController<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: QueueBackend> DashboardController<B> {
    pub fn new(backend: B) -> Self {
        let (state, _) = watch::channel(DashboardState::new());
        Self {
            inner: Arc::new(Inner {
                backend,
                state,
                next_seq: AtomicU64::new(0),
            }),
        }
    }

    /// Subscribe to state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.inner.state.subscribe()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> DashboardState {
        self.inner.state.borrow().clone()
    }

    #[cfg(test)]
    fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Apply an event, notifying subscribers only if the state changed.
    fn dispatch(&self, event: DashboardEvent) {
        let kind = event.kind();
        let changed = self.inner.state.send_if_modified(|state| {
            let next = state.clone().apply(event);
            if next == *state {
                return false;
            }
            *state = next;
            true
        });
        debug!(event = "core.controller.dispatched", kind = kind, changed = changed);
    }

    /// Fetch the queue and apply the result.
    ///
    /// Each call takes a fresh sequence number before the request goes out,
    /// so a response overtaken by a later one is discarded by the state.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` after recording it in state. Callers driven
    /// by the poll timer can ignore it.
    pub async fn refresh(&self) -> Result<(), FetchError> {
        let seq = self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(event = "core.controller.refresh_started", seq = seq);

        match self.inner.backend.fetch_queue().await {
            Ok(orders) => {
                let order_count = orders.len();
                self.dispatch(DashboardEvent::FetchSucceeded {
                    seq,
                    orders,
                    at: Local::now(),
                });
                debug!(
                    event = "core.controller.refresh_completed",
                    seq = seq,
                    order_count = order_count
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    event = "core.controller.refresh_failed",
                    seq = seq,
                    error_code = e.error_code(),
                    error = %e
                );
                self.dispatch(DashboardEvent::FetchFailed {
                    seq,
                    message: FETCH_ERROR_MESSAGE.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Run [`refresh`](Self::refresh) on its own task.
    pub fn spawn_refresh(&self) -> JoinHandle<Result<(), FetchError>> {
        let controller = self.clone();
        tokio::spawn(async move { controller.refresh().await })
    }

    /// Mark an order ready, then re-poll for the authoritative state.
    ///
    /// The order id stays in `pending_completions` until the request settles,
    /// whatever the outcome, including when this future is dropped early.
    ///
    /// # Errors
    ///
    /// - `CompletionError::AlreadyInFlight` if a completion for this id is
    ///   still pending; no request is sent.
    /// - Transport or HTTP status failures of the completion request. Failure
    ///   of the follow-up refresh is recorded in state, not returned.
    pub async fn complete_order(&self, order_id: &str) -> Result<(), CompletionError> {
        let started = self.inner.state.send_if_modified(|state| {
            if state.is_completing(order_id) {
                return false;
            }
            *state = state.clone().apply(DashboardEvent::CompletionStarted {
                order_id: order_id.to_string(),
            });
            true
        });
        if !started {
            warn!(
                event = "core.controller.complete_order_in_flight",
                order_id = order_id
            );
            return Err(CompletionError::AlreadyInFlight {
                order_id: order_id.to_string(),
            });
        }

        let _settle = SettleGuard {
            controller: self,
            order_id,
        };
        info!(event = "core.controller.complete_order_started", order_id = order_id);

        match self.inner.backend.complete_order(order_id).await {
            Ok(()) => {
                info!(
                    event = "core.controller.complete_order_completed",
                    order_id = order_id
                );
                // A failed refresh is already reflected in state.
                let _ = self.refresh().await;
                Ok(())
            }
            Err(e) => {
                error!(
                    event = "core.controller.complete_order_failed",
                    order_id = order_id,
                    error_code = e.error_code(),
                    error = %e
                );
                Err(e)
            }
        }
    }

    /// Start the recurring poll timer.
    ///
    /// The first poll fires immediately. Each tick spawns its own refresh, so
    /// a slow response does not delay the next poll and polls may overlap.
    /// Stopping the handle cancels only the timer; refreshes already in
    /// flight run to completion.
    pub fn start_polling(&self, interval: Duration) -> PollerHandle {
        let controller = self.clone();
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        info!(
            event = "core.controller.poller_started",
            interval_ms = interval.as_millis() as u64
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        controller.spawn_refresh();
                    }
                }
            }

            info!(event = "core.controller.poller_stopped");
        });

        PollerHandle {
            stop_tx: Some(stop_tx),
            task,
        }
    }
}

/// Removes an order id from `pending_completions` when dropped.
struct SettleGuard<'a, B: QueueBackend> {
    controller: &'a DashboardController<B>,
    order_id: &'a str,
}

impl<B: QueueBackend> Drop for SettleGuard<'_, B> {
    fn drop(&mut self) {
        self.controller.dispatch(DashboardEvent::CompletionSettled {
            order_id: self.order_id.to_string(),
        });
    }
}

/// Handle to the recurring poll timer. Dropping it stops the timer.
pub struct PollerHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Stop the timer. Refreshes already in flight are not aborted.
    pub fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Stop the timer and wait for its task to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        let _ = (&mut self.task).await;
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
