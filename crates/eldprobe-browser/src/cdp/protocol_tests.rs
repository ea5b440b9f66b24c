use super::*;
use serde_json::json;

#[test]
fn test_request_serialization_skips_empty_fields() {
    let req = CdpRequest {
        id: 7,
        method: "Page.enable".to_string(),
        params: None,
        session_id: None,
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value, json!({"id": 7, "method": "Page.enable"}));
}

#[test]
fn test_request_serialization_with_session() {
    let req = CdpRequest {
        id: 1,
        method: "Runtime.evaluate".to_string(),
        params: Some(json!({"expression": "1+1"})),
        session_id: Some("S1".to_string()),
    };
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value["sessionId"], "S1");
    assert_eq!(value["params"]["expression"], "1+1");
}

#[test]
fn test_response_vs_event() {
    let reply: CdpResponse =
        serde_json::from_value(json!({"id": 3, "result": {"frameId": "F"}})).unwrap();
    assert!(!reply.is_event());
    assert_eq!(reply.id, Some(3));

    let event: CdpResponse = serde_json::from_value(json!({
        "method": "Network.requestWillBeSent",
        "params": {"requestId": "R1"},
        "sessionId": "S1"
    }))
    .unwrap();
    assert!(event.is_event());
    assert_eq!(event.session_id.as_deref(), Some("S1"));
}

#[test]
fn test_error_response() {
    let reply: CdpResponse = serde_json::from_value(json!({
        "id": 9,
        "error": {"code": -32000, "message": "No node found"}
    }))
    .unwrap();
    let err = reply.error.unwrap();
    assert_eq!(err.code, -32000);
    assert!(err.data.is_none());
}

#[test]
fn test_browser_version_renames() {
    let version: BrowserVersion = serde_json::from_value(json!({
        "Browser": "HeadlessChrome/126.0",
        "Protocol-Version": "1.3",
        "User-Agent": "Mozilla/5.0",
        "webSocketDebuggerUrl": "ws://127.0.0.1:9222/devtools/browser/abc"
    }))
    .unwrap();
    assert_eq!(version.protocol_version, "1.3");
    assert!(version.web_socket_debugger_url.starts_with("ws://"));
}

#[test]
fn test_quad_center() {
    let quad = [10.0, 20.0, 30.0, 20.0, 30.0, 40.0, 10.0, 40.0];
    assert_eq!(quad_center(&quad), Some((20.0, 30.0)));
    assert_eq!(quad_center(&[1.0, 2.0]), None);
}

#[test]
fn test_box_model_center() {
    let model: BoxModel = serde_json::from_value(json!({
        "content": [0.0, 0.0, 100.0, 0.0, 100.0, 50.0, 0.0, 50.0],
        "padding": [], "border": [], "margin": [],
        "width": 100, "height": 50
    }))
    .unwrap();
    assert_eq!(model.center(), Some((50.0, 25.0)));
}

#[test]
fn test_device_metrics_serialization() {
    let phone = DeviceMetrics::handheld(375, 667);
    let value = serde_json::to_value(phone).unwrap();
    assert_eq!(value["deviceScaleFactor"], 2.0);
    assert_eq!(value["mobile"], true);

    let tablet = DeviceMetrics::handheld(768, 1024);
    assert_eq!(tablet.device_scale_factor, 1.0);
    assert!(!DeviceMetrics::desktop(1280, 720).mobile);
}

#[test]
fn test_mouse_enums_wire_names() {
    assert_eq!(serde_json::to_value(MouseButton::Left).unwrap(), "left");
    assert_eq!(
        serde_json::to_value(MouseEventType::MousePressed).unwrap(),
        "mousePressed"
    );
    assert_eq!(serde_json::to_value(ScreenshotFormat::default()).unwrap(), "png");
}
