//! Tests for event tracking.

use serde_json::json;
use tokio::sync::mpsc;

use super::events::{EventState, console_error_text};
use crate::cdp::protocol::CdpResponse;

fn event(method: &str, params: serde_json::Value) -> CdpResponse {
    serde_json::from_value(json!({
        "method": method,
        "params": params,
        "sessionId": "S1"
    }))
    .unwrap()
}

#[test]
fn test_console_api_error_text() {
    let params = json!({
        "type": "error",
        "args": [{"type": "string", "value": "Failed to fetch"}, {"type": "number", "value": 404}]
    });
    assert_eq!(
        console_error_text("Runtime.consoleAPICalled", &params).unwrap(),
        "Failed to fetch 404"
    );
}

#[test]
fn test_console_api_log_ignored() {
    let params = json!({"type": "log", "args": [{"type": "string", "value": "hello"}]});
    assert!(console_error_text("Runtime.consoleAPICalled", &params).is_none());
}

#[test]
fn test_exception_thrown_text() {
    let params = json!({
        "exceptionDetails": {
            "text": "Uncaught",
            "exception": {"description": "ReferenceError: map is not defined"}
        }
    });
    assert_eq!(
        console_error_text("Runtime.exceptionThrown", &params).unwrap(),
        "ReferenceError: map is not defined"
    );
}

#[test]
fn test_log_entry_levels() {
    let error = json!({"entry": {"level": "error", "text": "GET /api 500"}});
    let warning = json!({"entry": {"level": "warning", "text": "deprecated"}});
    assert_eq!(
        console_error_text("Log.entryAdded", &error).unwrap(),
        "GET /api 500"
    );
    assert!(console_error_text("Log.entryAdded", &warning).is_none());
}

#[test]
fn test_event_state_tracks_requests_and_errors() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut state = EventState::new(rx);

    tx.send(event("Network.requestWillBeSent", json!({"requestId": "1"})))
        .unwrap();
    tx.send(event("Network.requestWillBeSent", json!({"requestId": "2"})))
        .unwrap();
    tx.send(event("Network.loadingFinished", json!({"requestId": "1"})))
        .unwrap();
    tx.send(event(
        "Runtime.consoleAPICalled",
        json!({"type": "error", "args": [{"type": "string", "value": "boom"}]}),
    ))
    .unwrap();

    state.pump();
    assert_eq!(state.inflight.len(), 1);
    assert_eq!(state.console_errors, vec!["boom".to_string()]);

    tx.send(event("Network.loadingFailed", json!({"requestId": "2"})))
        .unwrap();
    state.pump();
    assert!(state.inflight.is_empty());
}

#[test]
fn test_main_frame_navigation_resets_inflight() {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut state = EventState::new(rx);

    tx.send(event("Network.requestWillBeSent", json!({"requestId": "old"})))
        .unwrap();
    tx.send(event("Page.frameNavigated", json!({"frame": {"id": "F"}})))
        .unwrap();
    state.pump();
    assert!(state.inflight.is_empty());

    tx.send(event("Network.requestWillBeSent", json!({"requestId": "a"})))
        .unwrap();
    tx.send(event(
        "Page.frameNavigated",
        json!({"frame": {"id": "child", "parentId": "F"}}),
    ))
    .unwrap();
    state.pump();
    assert_eq!(state.inflight.len(), 1);
}
