//! Backend order-queue API.
//!
//! The controller talks to the backend only through [`QueueBackend`], so the
//! HTTP implementation can be swapped for an in-memory one in tests.

use std::future::Future;

use crate::errors::{CompletionError, FetchError};
use crate::orders::Order;

pub mod http;
pub mod types;

pub use http::HttpQueueClient;
pub use types::CompletionRoute;

/// Operations the dashboard needs from the order-queue service.
pub trait QueueBackend: Send + Sync + 'static {
    /// Fetch every currently active order.
    fn fetch_queue(&self) -> impl Future<Output = Result<Vec<Order>, FetchError>> + Send;

    /// Mark one order ready. Any 2xx response is success.
    fn complete_order(
        &self,
        order_id: &str,
    ) -> impl Future<Output = Result<(), CompletionError>> + Send;
}
