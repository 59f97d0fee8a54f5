use chrono::{DateTime, Local};

use crate::orders::Order;

/// All state changes the dashboard can go through.
///
/// Each variant describes _what happened_. Fetch outcomes carry the sequence
/// number the request was issued with, so that a response overtaken by a
/// newer one can be recognized and dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    /// A queue fetch returned a decodable snapshot.
    FetchSucceeded {
        seq: u64,
        orders: Vec<Order>,
        at: DateTime<Local>,
    },
    /// A queue fetch failed (transport, HTTP status, or decoding).
    FetchFailed { seq: u64, message: String },
    /// A completion request for an order was issued.
    CompletionStarted { order_id: String },
    /// A completion request resolved, successfully or not.
    CompletionSettled { order_id: String },
}

impl DashboardEvent {
    /// Short name used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            DashboardEvent::FetchSucceeded { .. } => "fetch_succeeded",
            DashboardEvent::FetchFailed { .. } => "fetch_failed",
            DashboardEvent::CompletionStarted { .. } => "completion_started",
            DashboardEvent::CompletionSettled { .. } => "completion_settled",
        }
    }
}
