use std::path::PathBuf;

use super::*;
use crate::cdp::CdpError;

#[test]
fn test_default_config() {
    let config = BrowserManagerConfig::default();
    assert_eq!(config.debug_port, 9222);
    assert!(config.headless);
    assert_eq!(config.endpoint(), "http://127.0.0.1:9222");
}

#[test]
fn test_profile_dir_default_and_override() {
    let config = BrowserManagerConfig::default();
    assert!(config.get_profile_dir().ends_with(".eldprobe/browser-profile"));

    let config = BrowserManagerConfig {
        profile_dir: Some(PathBuf::from("/tmp/probe-profile")),
        ..Default::default()
    };
    assert_eq!(config.get_profile_dir(), PathBuf::from("/tmp/probe-profile"));
}

#[test]
fn test_launch_args() {
    let manager = BrowserManager::new(BrowserManagerConfig {
        debug_port: 9333,
        viewport_width: 1024,
        viewport_height: 768,
        ..Default::default()
    });
    let args = manager.launch_args();
    assert!(args.contains(&"--remote-debugging-port=9333".to_string()));
    assert!(args.contains(&"--window-size=1024,768".to_string()));
    assert!(args.contains(&"--headless=new".to_string()));

    let headed = BrowserManager::new(BrowserManagerConfig {
        headless: false,
        ..Default::default()
    });
    assert!(!headed.launch_args().iter().any(|a| a.starts_with("--headless")));
}

#[test]
fn test_find_chrome_respects_missing_override() {
    let manager = BrowserManager::new(BrowserManagerConfig {
        chrome_path: Some(PathBuf::from("/definitely/not/a/chrome")),
        ..Default::default()
    });
    assert!(manager.find_chrome().is_none());
}

#[test]
fn test_error_mapping() {
    let err: BrowserError = CdpError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".into()).into();
    assert!(err.is_load_failure());

    let err: BrowserError = CdpError::Timeout("page load".into()).into();
    assert!(matches!(err, BrowserError::Timeout(_)));
    assert!(err.is_load_failure());

    let err: BrowserError = CdpError::SessionClosed.into();
    assert!(matches!(err, BrowserError::NotConnected));
    assert!(!err.is_load_failure());
}

#[tokio::test]
async fn test_client_not_connected_without_chrome() {
    // Nothing listens on port 1, and the override makes launching fail.
    let manager = BrowserManager::new(BrowserManagerConfig {
        debug_port: 1,
        chrome_path: Some(PathBuf::from("/definitely/not/a/chrome")),
        ..Default::default()
    });
    let err = manager.connect().await.unwrap_err();
    assert!(matches!(err, BrowserError::ChromeNotFound));
}
