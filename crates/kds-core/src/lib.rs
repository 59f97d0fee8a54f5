//! kds-core: Core library for the KDS kitchen display
//!
//! This library provides the client-side logic for a kitchen display that
//! polls a backend order queue and lets staff mark orders ready. It is used
//! by the terminal dashboard and is testable without any rendering.
//!
//! # Main Entry Points
//!
//! - [`controller`] - Poll the queue and complete orders
//! - [`state`] - Immutable dashboard state and its transitions
//! - [`presentation`] - Pure helpers deriving display values from state
//! - [`client`] - Backend HTTP API
//! - [`config`] - Configuration management

pub mod client;
pub mod config;
pub mod controller;
pub mod errors;
pub mod logging;
pub mod orders;
pub mod presentation;
pub mod state;

// Re-export commonly used types at crate root for convenience
pub use client::{CompletionRoute, HttpQueueClient, QueueBackend};
pub use config::KdsConfig;
pub use controller::{DashboardController, PollerHandle};
pub use errors::{CompletionError, ConfigError, FetchError, KdsError};
pub use orders::{Order, OrderLine, OrderStatus};
pub use presentation::{CardAction, DashboardView, OrderCard, Screen, StatusTag};
pub use state::{DashboardEvent, DashboardState};

// Re-export logging initialization
pub use logging::init_logging;
