//! Integration tests against a real Chrome.
//!
//! Run with `cargo test -p eldprobe-browser -- --ignored`.

use std::time::Duration;

use eldprobe_browser::{BrowserManager, BrowserManagerConfig, DeviceMetrics};

fn test_config() -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: 9333,
        headless: true,
        profile_dir: Some(std::env::temp_dir().join("eldprobe-browser-test")),
        launch_timeout: Duration::from_secs(15),
        ..Default::default()
    }
}

const FORM_PAGE: &str = "data:text/html,<html><body><h1>Trip</h1>\
<form><input name='pickup' placeholder='Pickup'><button type='submit'>Plan Trip</button></form>\
<script>console.error('fixture error')</script></body></html>";

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_open_fill_and_inspect() {
    let manager = BrowserManager::new(test_config());
    manager.connect().await.unwrap();

    let page = manager
        .open_page(FORM_PAGE, Duration::from_secs(20))
        .await
        .unwrap();

    assert_eq!(page.count_selector("input").await.unwrap(), 1);
    assert_eq!(
        page.find_by_text("button", &["plan"]).await.unwrap(),
        Some(0)
    );

    page.fill_nth("input[name='pickup']", 0, "Indianapolis, IN")
        .await
        .unwrap();
    let value = page
        .evaluate("document.querySelector('input').value")
        .await
        .unwrap();
    assert_eq!(value, "Indianapolis, IN");

    assert!(page
        .console_errors()
        .iter()
        .any(|e| e.contains("fixture error")));

    page.set_device_metrics(DeviceMetrics::handheld(375, 667))
        .await
        .unwrap();
    let width = page.evaluate("window.innerWidth").await.unwrap();
    assert_eq!(width, 375);
    page.clear_device_metrics().await.unwrap();

    let png = page
        .screenshot(Default::default(), true)
        .await
        .unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));

    manager.close_page(&page).await.unwrap();
    manager.shutdown().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_unreachable_site_is_load_failure() {
    let manager = BrowserManager::new(test_config());
    let err = manager
        .open_page("http://nonexistent.invalid/", Duration::from_secs(20))
        .await
        .unwrap_err();
    assert!(err.is_load_failure());
    manager.shutdown().await.unwrap();
}
