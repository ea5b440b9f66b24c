use serde_json::json;

use super::*;
use crate::checks::{HOURS_INPUT_SELECTOR, LOCATION_INPUT_SELECTOR, MAP_SELECTOR};
use crate::driver::PageScript;
use crate::model::{Category, MAX_SCORE};
use crate::testing::FakePage;

const RESULTS_TEXT: &str = "Trip summary. Hours of Service: On Duty 2h, Driving 6h. \
     Drive Time Remaining 5h. Rest Stop at Indianapolis. 30 minute Break.";

fn probe() -> SiteProbe {
    SiteProbe::new(
        TestRoute::default(),
        WaitSettings::default(),
        ScoreWeights::default(),
    )
}

fn planner_page() -> FakePage {
    FakePage::new()
        .with_count("input[type=\"text\"]", 3)
        .with_count("input[type=\"number\"]", 1)
        .with_count(LOCATION_INPUT_SELECTOR, 3)
        .with_count(HOURS_INPUT_SELECTOR, 1)
        .with_count("button", 1)
        .with_buttons(&["Generate Trip"])
        .with_script(PageScript::BrokenImages, json!(0))
        .with_script(PageScript::VisualGlitches, json!(0))
        .with_after_click_body(RESULTS_TEXT)
        .with_after_click_count(MAP_SELECTOR, 1)
        .with_after_click_count("table", 1)
}

#[tokio::test]
async fn test_evaluate_planner() {
    let page = planner_page();
    let site = SiteDescriptor::new("Good Planner", "https://planner.example.com");

    let result = probe().evaluate(&site, &page).await.unwrap();

    assert_eq!(result.status, EvaluationStatus::Complete);
    assert_eq!(result.website, "Good Planner");
    assert_eq!(result.scores.required_features, 10);
    assert_eq!(result.scores.eld_accuracy, 10);
    // Console 3 + images 3 + glitches 2, no validation feedback.
    assert_eq!(result.scores.bugs, 8);
    assert_eq!(
        result.final_score,
        ScoreWeights::default().final_score(&result.scores)
    );
    assert!(result.notes.iter().any(|n| n == "Form submitted successfully"));
}

#[tokio::test]
async fn test_form_submitted_once_before_invalid_input() {
    let page = planner_page();
    let site = SiteDescriptor::new("Good Planner", "https://planner.example.com");

    probe().evaluate(&site, &page).await.unwrap();

    // Trip submission, then the invalid-input resubmission after reload.
    assert_eq!(page.clicks().len(), 2);
    assert_eq!(page.reloads(), 1);
    assert_eq!(page.fills().len(), 5);
}

#[tokio::test]
async fn test_blank_page_scores_in_range() {
    let page = FakePage::new();
    let site = SiteDescriptor::new("Blank", "https://blank.example.com");

    let result = probe().evaluate(&site, &page).await.unwrap();

    for category in Category::ALL {
        assert!(result.scores.get(category) <= MAX_SCORE);
    }
    assert_eq!(result.scores.required_features, 0);
    assert_eq!(result.scores.bugs, 3);
    assert!(result.notes.iter().any(|n| n == "Could not submit form"));
    assert!(
        result
            .notes
            .iter()
            .any(|n| n.starts_with("broken_images failed: "))
    );
    assert!((0.0..=10.0).contains(&result.final_score));
}

#[tokio::test]
async fn test_screenshots_named_after_site() {
    let dir = tempfile::tempdir().unwrap();
    let page = planner_page();
    let site = SiteDescriptor::new("Good Planner", "https://planner.example.com");

    let result = probe()
        .with_screenshot_dir(dir.path())
        .evaluate(&site, &page)
        .await
        .unwrap();

    let expected: Vec<_> = ["initial", "results", "mobile"]
        .iter()
        .map(|label| dir.path().join(format!("Good_Planner_{}.png", label)))
        .collect();
    assert_eq!(page.screenshots(), expected);
    assert_eq!(result.screenshots.len(), 3);

    let viewports = page.viewports();
    assert_eq!(viewports.first(), Some(&Some(MOBILE_VIEWPORT)));
    assert_eq!(viewports.last(), Some(&None));
}

#[tokio::test]
async fn test_no_screenshot_dir_skips_capture() {
    let page = planner_page();
    let site = SiteDescriptor::new("Good Planner", "https://planner.example.com");

    let result = probe().evaluate(&site, &page).await.unwrap();

    assert!(page.screenshots().is_empty());
    assert!(result.screenshots.is_empty());
    // Only the responsive check touches the viewport.
    assert_eq!(page.viewports().len(), 3);
}

#[tokio::test]
async fn test_failing_check_becomes_note() {
    let page = planner_page().with_failing_script(PageScript::ColorPalette);
    let site = SiteDescriptor::new("Good Planner", "https://planner.example.com");

    let result = probe().evaluate(&site, &page).await.unwrap();

    assert_eq!(result.status, EvaluationStatus::Complete);
    assert!(
        result
            .notes
            .iter()
            .any(|n| n == "color_palette failed: Script error: color_palette threw")
    );
}

#[tokio::test]
async fn test_closed_page_is_fatal() {
    let page = FakePage::new().closed();
    let site = SiteDescriptor::new("Gone", "https://gone.example.com");

    let err = probe().evaluate(&site, &page).await.unwrap_err();
    assert!(err.is_fatal());
}
