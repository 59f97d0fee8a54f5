use std::collections::BTreeSet;

use chrono::{DateTime, Local};
use tracing::debug;

use super::events::DashboardEvent;
use crate::orders::Order;

/// Snapshot of everything the dashboard displays.
///
/// Encapsulates:
/// - `orders`: the last applied queue snapshot, replaced wholesale
/// - `loading`: true until the first fetch settles
/// - `error`: message from the last applied fetch failure
/// - `pending_completions`: ids whose completion request is in flight
///
/// An id can linger in `pending_completions` after its order disappears from
/// a newer snapshot; it is removed once the completion settles.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    orders: Vec<Order>,
    loading: bool,
    error: Option<String>,
    pending_completions: BTreeSet<String>,
    /// Sequence number of the newest fetch applied so far (0 = none).
    last_applied_seq: u64,
    last_updated: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            loading: true,
            error: None,
            pending_completions: BTreeSet::new(),
            last_applied_seq: 0,
            last_updated: None,
        }
    }

    /// Apply one event, producing the next snapshot.
    ///
    /// Fetch outcomes whose `seq` is not newer than the last applied one are
    /// discarded unchanged.
    pub fn apply(mut self, event: DashboardEvent) -> Self {
        match event {
            DashboardEvent::FetchSucceeded { seq, orders, at } => {
                if !self.accepts(seq) {
                    return self;
                }
                self.orders = orders;
                self.error = None;
                self.loading = false;
                self.last_applied_seq = seq;
                self.last_updated = Some(at);
            }
            DashboardEvent::FetchFailed { seq, message } => {
                if !self.accepts(seq) {
                    return self;
                }
                self.error = Some(message);
                self.loading = false;
                self.last_applied_seq = seq;
            }
            DashboardEvent::CompletionStarted { order_id } => {
                self.pending_completions.insert(order_id);
            }
            DashboardEvent::CompletionSettled { order_id } => {
                self.pending_completions.remove(&order_id);
            }
        }
        self
    }

    fn accepts(&self, seq: u64) -> bool {
        if seq <= self.last_applied_seq {
            debug!(
                event = "core.state.stale_fetch_discarded",
                seq = seq,
                last_applied_seq = self.last_applied_seq
            );
            return false;
        }
        true
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn pending_completions(&self) -> &BTreeSet<String> {
        &self.pending_completions
    }

    pub fn is_completing(&self, order_id: &str) -> bool {
        self.pending_completions.contains(order_id)
    }

    pub fn last_applied_seq(&self) -> u64 {
        self.last_applied_seq
    }

    /// Time of the last applied successful fetch.
    pub fn last_updated(&self) -> Option<DateTime<Local>> {
        self.last_updated
    }

    pub fn find_order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
