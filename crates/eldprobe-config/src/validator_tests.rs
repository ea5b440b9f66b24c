use super::*;
use crate::schema::SiteConfig;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid(), "{:?}", result.errors);
}

#[test]
fn test_validate_invalid_port() {
    let mut config = Config::default();
    config.browser.debug_port = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "browser.debug_port"));
}

#[test]
fn test_validate_negative_weight() {
    let mut config = Config::default();
    config.scoring.weights.bugs = -0.5;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "scoring.weights"));
}

#[test]
fn test_validate_zero_weights() {
    let mut config = Config::default();
    config.scoring.weights.ui_aesthetics = 0.0;
    config.scoring.weights.ux_intuitiveness = 0.0;
    config.scoring.weights.bugs = 0.0;
    config.scoring.weights.required_features = 0.0;
    config.scoring.weights.eld_accuracy = 0.0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_duplicate_site_names() {
    let mut config = Config::default();
    config.sites = vec![
        SiteConfig::new("Same", "https://a.example.com"),
        SiteConfig::new("Same", "https://b.example.com"),
    ];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "sites[1].name"));
}

#[test]
fn test_validate_colliding_file_stems() {
    let mut config = Config::default();
    config.sites = vec![
        SiteConfig::new("Eld App", "https://a.example.com"),
        SiteConfig::new("Eld_App", "https://b.example.com"),
        SiteConfig::new("Eld-App", "https://c.example.com"),
    ];

    let result = ConfigValidator::validate(&config);
    let paths: Vec<_> = result.errors.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths, vec!["sites[1].name"]);
    assert!(result.errors[0].message.contains("Eld_App"));
}

#[test]
fn test_validate_non_http_url() {
    let mut config = Config::default();
    config.sites = vec![SiteConfig::new("Ftp", "ftp://files.example.com")];

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "sites[0].url"));
}

#[test]
fn test_validate_empty_sites_warning() {
    let mut config = Config::default();
    config.sites.clear();

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "sites"));
}

#[test]
fn test_validate_cycle_hours_out_of_range() {
    let mut config = Config::default();
    config.route.cycle_hours = 90.0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "route.cycle_hours"));
}

#[test]
fn test_validate_empty_location() {
    let mut config = Config::default();
    config.route.pickup_location = "  ".to_string();

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "route.pickup_location"));
}

#[test]
fn test_validate_idle_longer_than_settle_warning() {
    let mut config = Config::default();
    config.wait.network_idle_ms = 20_000;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "wait.network_idle_ms"));
}

#[test]
fn test_into_result_reports_first_error() {
    let mut config = Config::default();
    config.run.navigation_timeout_ms = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("run.navigation_timeout_ms"));
}
