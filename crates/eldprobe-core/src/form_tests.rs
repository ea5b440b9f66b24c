use super::*;
use crate::testing::FakePage;

const TEXT: &str = "input[type=\"text\"]";
const NUMBER: &str = "input[type=\"number\"]";

fn plain_form() -> FakePage {
    FakePage::new()
        .with_count(TEXT, 3)
        .with_count(NUMBER, 1)
        .with_count("button", 1)
        .with_buttons(&["Submit"])
}

#[tokio::test]
async fn test_fills_all_four_fields_and_clicks_once() {
    let page = plain_form();
    let route = TestRoute::default();

    let submission = submit_trip(&page, &route, &WaitSettings::default())
        .await
        .unwrap();

    assert_eq!(submission.filled, TripField::ALL.to_vec());
    assert_eq!(
        page.fills(),
        vec![
            (ElementRef::new(TEXT, 0), "Chicago, IL".to_string()),
            (ElementRef::new(TEXT, 1), "Indianapolis, IN".to_string()),
            (ElementRef::new(TEXT, 2), "Cincinnati, OH".to_string()),
            (ElementRef::new(NUMBER, 0), "2".to_string()),
        ]
    );
    assert_eq!(page.clicks(), vec![ElementRef::new("button", 0)]);
    assert!(submission.submitted());
}

#[tokio::test]
async fn test_autocomplete_suggestion_picked_after_each_location() {
    let page = plain_form().with_count(SUGGESTION_SELECTOR, 1);

    let submission = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    let suggestion = ElementRef::new(SUGGESTION_SELECTOR, 0);
    assert_eq!(
        page.clicks(),
        vec![
            suggestion.clone(),
            suggestion.clone(),
            suggestion,
            ElementRef::new("button", 0),
        ]
    );
    let picked: Vec<&String> = submission
        .notes
        .iter()
        .filter(|n| n.starts_with("Selected autocomplete suggestion"))
        .collect();
    assert_eq!(picked.len(), 3);
    assert!(picked.iter().all(|n| !n.contains("cycle hours")));
    assert!(submission.submitted());
}

#[tokio::test]
async fn test_no_suggestions_leaves_notes_clean() {
    let page = plain_form();

    let submission = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    assert!(!submission
        .notes
        .iter()
        .any(|n| n.contains("suggestion")));
}

#[tokio::test]
async fn test_broken_suggestion_click_is_note() {
    let page = plain_form()
        .with_count(SUGGESTION_SELECTOR, 1)
        .with_failing_selector(SUGGESTION_SELECTOR);

    let submission = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    assert!(submission
        .notes
        .iter()
        .any(|n| n.starts_with("Could not select suggestion for pickup location")));
    assert_eq!(submission.filled, TripField::ALL.to_vec());
    assert!(submission.submitted());
}

#[tokio::test]
async fn test_semantic_field_preferred_over_position() {
    let pickup = matcher::attribute_selector(&["pickup"]);
    let page = plain_form().with_count(&pickup, 1);

    submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    let fills = page.fills();
    assert!(fills.contains(&(ElementRef::new(pickup.as_str(), 0), "Indianapolis, IN".to_string())));
}

#[tokio::test]
async fn test_missing_fields_are_notes() {
    let page = FakePage::new()
        .with_count(TEXT, 1)
        .with_count("#submit", 1);

    let submission = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    assert_eq!(submission.filled, vec![TripField::CurrentLocation]);
    assert!(submission
        .notes
        .iter()
        .any(|n| n == "No cycle hours field found"));
    assert!(submission.notes.iter().any(|n| n == "Filled 1/4 trip fields"));
    assert_eq!(page.clicks(), vec![ElementRef::new("#submit", 0)]);
}

#[tokio::test]
async fn test_no_submit_control() {
    let page = FakePage::new().with_count(TEXT, 3);

    let submission = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    assert!(!submission.submitted());
    assert!(page.clicks().is_empty());
    assert!(submission.notes.iter().any(|n| n == "Could not submit form"));
}

#[tokio::test]
async fn test_timeouts_become_notes() {
    let page = plain_form().with_network_idle(WaitOutcome::TimedOut);

    let submission = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    assert!(submission.submitted());
    assert!(!submission.results_appeared);
    assert!(submission
        .notes
        .iter()
        .any(|n| n.starts_with("Network did not go idle")));
    assert!(submission
        .notes
        .iter()
        .any(|n| n.starts_with("No map or log output appeared")));
}

#[tokio::test]
async fn test_results_detected_after_click() {
    let page = plain_form().with_after_click_count(RESULT_SELECTOR, 1);

    let submission = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap();

    assert!(submission.results_appeared);
}

#[tokio::test]
async fn test_closed_page_is_error() {
    let page = FakePage::new().closed();
    let err = submit_trip(&page, &TestRoute::default(), &WaitSettings::default())
        .await
        .unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn test_wait_settings_from_config() {
    let settings = WaitSettings::default();
    assert_eq!(settings.settle_timeout, Duration::from_millis(10_000));
    assert_eq!(settings.network_idle, Duration::from_millis(500));
    assert_eq!(settings.results_timeout, Duration::from_millis(8_000));
}

#[test]
fn test_field_values() {
    let route = TestRoute::default();
    assert_eq!(TripField::Dropoff.value(&route), "Cincinnati, OH");
    assert_eq!(TripField::CycleHours.value(&route), "2");
}
