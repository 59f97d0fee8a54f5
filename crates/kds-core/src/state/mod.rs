//! Dashboard state as an immutable record.
//!
//! Every change is a [`DashboardEvent`] applied with
//! [`DashboardState::apply`], which consumes the old snapshot and returns the
//! next one. Nothing else mutates state, so transitions can be tested without
//! a network or a terminal.

pub mod events;
pub mod types;

pub use events::DashboardEvent;
pub use types::DashboardState;
