//! Display values derived from [`DashboardState`].
//!
//! Everything here is pure and recomputed on each render. Renderers should
//! build a [`DashboardView`] per frame rather than caching any of it.

use chrono::{DateTime, Local, TimeZone};

use crate::orders::{Order, OrderLine, OrderStatus};
use crate::state::DashboardState;

/// Shown while the backend has not yet computed an ETA.
pub const ETA_PLACEHOLDER: &str = "Calculating...";

/// Fixed style tag per order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTag {
    Pending,
    Preparing,
    Completed,
    Collected,
}

impl StatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Pending => "status-pending",
            StatusTag::Preparing => "status-preparing",
            StatusTag::Completed => "status-completed",
            StatusTag::Collected => "status-collected",
        }
    }
}

impl From<OrderStatus> for StatusTag {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Ordered => StatusTag::Pending,
            OrderStatus::Preparing => StatusTag::Preparing,
            OrderStatus::Ready => StatusTag::Completed,
            OrderStatus::Collected => StatusTag::Collected,
        }
    }
}

/// Style tag for a raw status label. Case-insensitive; anything
/// unrecognized, including a missing label, gets the pending tag.
pub fn status_color_class(status: Option<&str>) -> StatusTag {
    OrderStatus::parse(status).into()
}

/// `"<minutes> min"`, or the placeholder when no ETA is known yet.
pub fn format_eta(minutes: Option<f64>) -> String {
    match minutes {
        Some(m) if m != 0.0 && m.is_finite() => format!("{} min", m),
        _ => ETA_PLACEHOLDER.to_string(),
    }
}

/// Orders that have not been collected yet.
pub fn active_order_count(orders: &[Order]) -> usize {
    orders
        .iter()
        .filter(|o| !o.order_status().is_terminal())
        .count()
}

/// Wall-clock label such as `09:05 AM`.
pub fn current_time_label<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    now.format("%I:%M %p").to_string()
}

/// Last four characters of an order id, uppercased.
pub fn short_order_id(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect::<String>().to_uppercase()
}

/// Status text for a card; `Ordered` when the backend sent none.
pub fn status_label(order: &Order) -> String {
    match order.status.as_deref() {
        Some(label) if !label.trim().is_empty() => label.to_string(),
        _ => "Ordered".to_string(),
    }
}

/// What the card's action area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    /// Control available: mark the order ready.
    MarkReady,
    /// A completion request is in flight; the control is disabled.
    Processing,
    /// Nothing left to do in the kitchen; no control.
    ReadyForPickup,
}

impl CardAction {
    pub fn is_enabled(&self) -> bool {
        matches!(self, CardAction::MarkReady)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub id: String,
    /// `#` followed by the short id, e.g. `#00A1`.
    pub title: String,
    pub student_id: String,
    pub status_label: String,
    pub tag: StatusTag,
    pub items: Vec<OrderLine>,
    /// Units across all lines.
    pub total_qty: u32,
    pub eta: String,
    pub token: Option<String>,
    pub action: CardAction,
}

impl OrderCard {
    pub fn from_order(order: &Order, completing: bool) -> Self {
        let status = order.order_status();
        let action = if !status.awaits_completion() {
            CardAction::ReadyForPickup
        } else if completing {
            CardAction::Processing
        } else {
            CardAction::MarkReady
        };

        Self {
            id: order.id.clone(),
            title: format!("#{}", short_order_id(&order.id)),
            student_id: order.student_id.clone(),
            status_label: status_label(order),
            tag: status.into(),
            items: order.items.clone(),
            total_qty: order.total_qty(),
            eta: format_eta(order.eta_minutes),
            token: order.token.clone(),
            action,
        }
    }
}

/// Main area content.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Error { message: String },
    Empty,
    Orders(Vec<OrderCard>),
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub active_orders: usize,
    pub clock: String,
    /// Clock label of the last successful fetch, if any.
    pub last_updated: Option<String>,
    pub screen: Screen,
}

impl DashboardView {
    pub fn build(state: &DashboardState, now: &DateTime<Local>) -> Self {
        let screen = if state.is_loading() {
            Screen::Loading
        } else if let Some(message) = state.error() {
            Screen::Error {
                message: message.to_string(),
            }
        } else if state.orders().is_empty() {
            Screen::Empty
        } else {
            Screen::Orders(
                state
                    .orders()
                    .iter()
                    .map(|o| OrderCard::from_order(o, state.is_completing(&o.id)))
                    .collect(),
            )
        };

        Self {
            active_orders: active_order_count(state.orders()),
            clock: current_time_label(now),
            last_updated: state.last_updated().map(|at| current_time_label(&at)),
            screen,
        }
    }

    pub fn cards(&self) -> &[OrderCard] {
        match &self.screen {
            Screen::Orders(cards) => cards,
            _ => &[],
        }
    }
}
