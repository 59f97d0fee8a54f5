//! Terminal-only UI state: card selection and the alert modal.
//!
//! Queue data lives in the controller; this only tracks what the keyboard
//! has done.

use kds_core::{CardAction, DashboardView, Screen};
use tracing::debug;

use super::events::InputEvent;

/// What the event loop should do after an input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    None,
    Complete(String),
    Retry,
    Quit,
}

#[derive(Debug, Default)]
pub struct UiState {
    selected: usize,
    alert: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn show_alert(&mut self, message: String) {
        debug!(event = "ui.alert.shown", message = %message);
        self.alert = Some(message);
    }

    /// Keep the selection on a card after the queue shrinks.
    pub fn clamp_selection(&mut self, card_count: usize) {
        if card_count == 0 {
            self.selected = 0;
        } else if self.selected >= card_count {
            self.selected = card_count - 1;
        }
    }

    pub fn handle(&mut self, event: InputEvent, view: &DashboardView) -> UiAction {
        if event == InputEvent::Interrupt {
            return UiAction::Quit;
        }

        // The alert is modal: it must be acknowledged before anything else.
        if self.alert.is_some() {
            if matches!(event, InputEvent::Activate | InputEvent::Dismiss) {
                self.alert = None;
            }
            return UiAction::None;
        }

        let cards = view.cards();
        self.clamp_selection(cards.len());

        match event {
            InputEvent::Quit => UiAction::Quit,
            InputEvent::Previous => {
                self.selected = self.selected.saturating_sub(1);
                UiAction::None
            }
            InputEvent::Next => {
                if self.selected + 1 < cards.len() {
                    self.selected += 1;
                }
                UiAction::None
            }
            InputEvent::Activate => match cards.get(self.selected) {
                Some(card) if card.action == CardAction::MarkReady => {
                    UiAction::Complete(card.id.clone())
                }
                _ => UiAction::None,
            },
            InputEvent::Retry => match view.screen {
                Screen::Loading => UiAction::None,
                _ => UiAction::Retry,
            },
            InputEvent::Interrupt | InputEvent::Dismiss | InputEvent::Resize | InputEvent::None => {
                UiAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use kds_core::{DashboardEvent, DashboardState, Order};

    fn view_with(orders: serde_json::Value, completing: Option<&str>) -> DashboardView {
        let orders: Vec<Order> = serde_json::from_value(orders).unwrap();
        let mut state = DashboardState::new().apply(DashboardEvent::FetchSucceeded {
            seq: 1,
            orders,
            at: Local::now(),
        });
        if let Some(id) = completing {
            state = state.apply(DashboardEvent::CompletionStarted {
                order_id: id.to_string(),
            });
        }
        DashboardView::build(&state, &Local::now())
    }

    fn three_orders() -> DashboardView {
        view_with(
            serde_json::json!([
                {"id": "a1", "status": "ordered"},
                {"id": "b2", "status": "ready"},
                {"id": "c3", "status": "preparing"}
            ]),
            None,
        )
    }

    #[test]
    fn test_navigation_stays_in_bounds() {
        let view = three_orders();
        let mut ui = UiState::new();

        ui.handle(InputEvent::Previous, &view);
        assert_eq!(ui.selected(), 0);

        for _ in 0..5 {
            ui.handle(InputEvent::Next, &view);
        }
        assert_eq!(ui.selected(), 2);
    }

    #[test]
    fn test_activate_completes_selected_order() {
        let view = three_orders();
        let mut ui = UiState::new();

        assert_eq!(
            ui.handle(InputEvent::Activate, &view),
            UiAction::Complete("a1".to_string())
        );

        // Ready orders have no control.
        ui.handle(InputEvent::Next, &view);
        assert_eq!(ui.handle(InputEvent::Activate, &view), UiAction::None);

        ui.handle(InputEvent::Next, &view);
        assert_eq!(
            ui.handle(InputEvent::Activate, &view),
            UiAction::Complete("c3".to_string())
        );
    }

    #[test]
    fn test_activate_ignored_while_processing() {
        let view = view_with(serde_json::json!([{"id": "a1"}]), Some("a1"));
        let mut ui = UiState::new();
        assert_eq!(ui.handle(InputEvent::Activate, &view), UiAction::None);
    }

    #[test]
    fn test_alert_is_modal() {
        let view = three_orders();
        let mut ui = UiState::new();
        ui.show_alert("Failed to complete order. Please try again.".to_string());

        assert_eq!(ui.handle(InputEvent::Quit, &view), UiAction::None);
        assert_eq!(ui.handle(InputEvent::Retry, &view), UiAction::None);
        assert!(ui.alert().is_some());

        assert_eq!(ui.handle(InputEvent::Activate, &view), UiAction::None);
        assert!(ui.alert().is_none());

        assert_eq!(ui.handle(InputEvent::Quit, &view), UiAction::Quit);
    }

    #[test]
    fn test_interrupt_quits_through_alert() {
        let view = three_orders();
        let mut ui = UiState::new();
        ui.show_alert("boom".to_string());
        assert_eq!(ui.handle(InputEvent::Interrupt, &view), UiAction::Quit);
    }

    #[test]
    fn test_retry_ignored_while_loading() {
        let loading = DashboardView::build(&DashboardState::new(), &Local::now());
        let mut ui = UiState::new();
        assert_eq!(ui.handle(InputEvent::Retry, &loading), UiAction::None);
        assert_eq!(ui.handle(InputEvent::Retry, &three_orders()), UiAction::Retry);
    }

    #[test]
    fn test_selection_clamped_when_queue_shrinks() {
        let mut ui = UiState::new();
        ui.handle(InputEvent::Next, &three_orders());
        ui.handle(InputEvent::Next, &three_orders());
        assert_eq!(ui.selected(), 2);

        ui.clamp_selection(1);
        assert_eq!(ui.selected(), 0);
    }
}
