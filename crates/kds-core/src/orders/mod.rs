//! Order data model as received from the backend queue endpoint.

pub mod types;

pub use types::{Order, OrderLine, OrderStatus};
