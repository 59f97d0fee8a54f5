//! Integration tests for the dashboard controller against a mock backend.
//!
//! These tests start a real Wiremock server that mimics the order-queue
//! service and drive `DashboardController` through `HttpQueueClient`.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kds_core::config::BackendConfig;
use kds_core::controller::FETCH_ERROR_MESSAGE;
use kds_core::presentation::{CardAction, DashboardView, ETA_PLACEHOLDER, StatusTag};
use kds_core::{CompletionError, CompletionRoute, DashboardController, FetchError, HttpQueueClient};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn controller_for(
    server_uri: &str,
    route: CompletionRoute,
) -> DashboardController<HttpQueueClient> {
    let client = HttpQueueClient::new(&BackendConfig {
        base_url: Some(server_uri.to_string()),
        completion_route: Some(route),
        request_timeout_ms: Some(2000),
    })
    .expect("valid backend config");
    DashboardController::new(client)
}

fn burger_order(status: &str) -> serde_json::Value {
    json!({
        "id": "a1",
        "student_id": "S1",
        "status": status,
        "items": [{"name": "Burger", "qty": 2}]
    })
}

async fn mount_queue(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// One ordered burger shows as an actionable card; marking it ready and
/// re-polling turns it into a ready card with no action control.
#[tokio::test]
async fn complete_order_end_to_end_update_status_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([burger_order("ordered")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_queue(&server, json!([burger_order("ready")])).await;
    Mock::given(method("POST"))
        .and(path("/update_status/a1"))
        .and(query_param("status", "ready"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ready"})))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server.uri(), CompletionRoute::UpdateStatus);

    controller.refresh().await.unwrap();
    let view = DashboardView::build(&controller.snapshot(), &chrono::Local::now());
    assert_eq!(view.active_orders, 1);
    assert_eq!(view.cards().len(), 1);
    assert_eq!(view.cards()[0].eta, ETA_PLACEHOLDER);
    assert_eq!(view.cards()[0].action, CardAction::MarkReady);

    controller.complete_order("a1").await.unwrap();

    let state = controller.snapshot();
    assert!(state.pending_completions().is_empty());
    let view = DashboardView::build(&state, &chrono::Local::now());
    assert_eq!(view.cards().len(), 1);
    assert_eq!(view.cards()[0].tag, StatusTag::Completed);
    assert_eq!(view.cards()[0].action, CardAction::ReadyForPickup);
}

#[tokio::test]
async fn complete_order_uses_complete_route() {
    let server = MockServer::start().await;
    mount_queue(&server, json!([burger_order("ready")])).await;
    Mock::given(method("POST"))
        .and(path("/complete/a1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server.uri(), CompletionRoute::Complete);
    controller.complete_order("a1").await.unwrap();

    assert_eq!(controller.snapshot().orders().len(), 1);
}

#[tokio::test]
async fn refresh_bad_status_keeps_previous_orders() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([burger_order("preparing")])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let controller = controller_for(&server.uri(), CompletionRoute::UpdateStatus);
    controller.refresh().await.unwrap();
    let before = controller.snapshot().orders().to_vec();

    let result = controller.refresh().await;

    assert!(matches!(result, Err(FetchError::Status { status: 503 })));
    let state = controller.snapshot();
    assert_eq!(state.orders(), before.as_slice());
    assert_eq!(state.error(), Some(FETCH_ERROR_MESSAGE));
    assert!(!state.is_loading());
}

#[tokio::test]
async fn refresh_undecodable_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let controller = controller_for(&server.uri(), CompletionRoute::UpdateStatus);
    let result = controller.refresh().await;

    assert!(matches!(result, Err(FetchError::Decode { .. })));
    assert!(controller.snapshot().error().is_some());
}

#[tokio::test]
async fn refresh_unreachable_backend_is_request_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let controller = controller_for(&uri, CompletionRoute::UpdateStatus);
    let result = controller.refresh().await;

    assert!(matches!(result, Err(FetchError::Request { .. })));
    let state = controller.snapshot();
    assert!(!state.is_loading());
    assert_eq!(state.error(), Some(FETCH_ERROR_MESSAGE));
}

/// A failed completion is returned, clears the pending flag, and does not
/// re-poll.
#[tokio::test]
async fn complete_order_failure_does_not_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([burger_order("ordered")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/update_status/a1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server.uri(), CompletionRoute::UpdateStatus);
    controller.refresh().await.unwrap();

    let result = controller.complete_order("a1").await;

    assert!(matches!(
        result,
        Err(CompletionError::Status { status: 500, .. })
    ));
    let state = controller.snapshot();
    assert!(!state.is_completing("a1"));
    assert_eq!(state.orders()[0].status.as_deref(), Some("ordered"));
}

/// Two completions for the same order before the first resolves send one POST.
#[tokio::test]
async fn concurrent_completion_sends_single_post() {
    let server = MockServer::start().await;
    mount_queue(&server, json!([burger_order("ready")])).await;
    Mock::given(method("POST"))
        .and(path("/update_status/a1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(300)))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server.uri(), CompletionRoute::UpdateStatus);

    let (first, second) = tokio::join!(
        controller.complete_order("a1"),
        controller.complete_order("a1")
    );

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results.iter().any(|r| matches!(
        r,
        Err(CompletionError::AlreadyInFlight { order_id }) if order_id == "a1"
    )));
    assert!(controller.snapshot().pending_completions().is_empty());
}

/// Queue body as served by the Mongo-backed service: `PREPARING` status and
/// a text ETA, completed through `/complete/{id}`.
#[tokio::test]
async fn mongo_queue_payload_renders_and_completes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/queue"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "65f1c2ab9e",
            "student_id": "2547115",
            "items": [{"name": "Veg Thali", "qty": 1}],
            "total_price": 80,
            "status": "PREPARING",
            "predicted_time": "10 mins"
        }])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_queue(&server, json!([])).await;
    Mock::given(method("POST"))
        .and(path("/complete/65f1c2ab9e"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "Order Completed"})))
        .expect(1)
        .mount(&server)
        .await;

    let controller = controller_for(&server.uri(), CompletionRoute::Complete);
    controller.refresh().await.unwrap();

    let view = DashboardView::build(&controller.snapshot(), &chrono::Local::now());
    let card = &view.cards()[0];
    assert_eq!(card.title, "#AB9E");
    assert_eq!(card.tag, StatusTag::Preparing);
    assert_eq!(card.eta, "10 min");
    assert_eq!(card.action, CardAction::MarkReady);

    controller.complete_order("65f1c2ab9e").await.unwrap();
    assert!(controller.snapshot().orders().is_empty());
}

/// Queue body as served by the token service: integer ETA and a pickup token.
#[tokio::test]
async fn token_queue_payload_renders() {
    let server = MockServer::start().await;
    mount_queue(
        &server,
        json!([{
            "id": "66a0",
            "student_id": "2547115",
            "items": [{"name": "Veg Thali", "qty": 1}],
            "total_price": 80,
            "token": "A-12",
            "eta_minutes": 12,
            "status": "QUEUED",
            "created_at": "2026-03-02T09:05:00"
        }]),
    )
    .await;

    let controller = controller_for(&server.uri(), CompletionRoute::UpdateStatus);
    controller.refresh().await.unwrap();

    let view = DashboardView::build(&controller.snapshot(), &chrono::Local::now());
    let card = &view.cards()[0];
    assert_eq!(card.token.as_deref(), Some("A-12"));
    assert_eq!(card.eta, "12 min");
    assert_eq!(card.tag, StatusTag::Pending);
    assert_eq!(card.status_label, "QUEUED");
}
