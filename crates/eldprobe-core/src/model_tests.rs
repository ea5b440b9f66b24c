use chrono::TimeZone;

use super::*;

fn sample_result() -> EvaluationResult {
    EvaluationResult {
        website: "Spotter".to_string(),
        url: "https://spotter.example.com/".to_string(),
        status: EvaluationStatus::Complete,
        final_score: 7.4,
        scores: Scores {
            ui_aesthetics: 8,
            ux_intuitiveness: 7,
            bugs: 9,
            required_features: 6,
            eld_accuracy: 7,
        },
        notes: vec!["Required input fields found".to_string()],
        screenshots: vec!["results/Spotter_initial.png".to_string()],
        evaluated_at: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[test]
fn test_result_json_shape() {
    let value = serde_json::to_value(sample_result()).unwrap();
    assert_eq!(value["website"], "Spotter");
    assert_eq!(value["status"], "complete");
    assert_eq!(value["finalScore"], 7.4);
    assert_eq!(value["scores"]["uiAesthetics"], 8);
    assert_eq!(value["scores"]["eldAccuracy"], 7);
    assert_eq!(value["evaluatedAt"], "2025-03-01T12:00:00Z");
}

#[test]
fn test_result_json_preserves_scores() {
    let original = sample_result();
    let json = serde_json::to_string_pretty(&original).unwrap();
    let parsed: EvaluationResult = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.scores, original.scores);
    assert_eq!(parsed.final_score, original.final_score);
}

#[test]
fn test_status_serialization() {
    assert_eq!(
        serde_json::to_value(EvaluationStatus::LoadFailed).unwrap(),
        "load_failed"
    );
    assert_eq!(
        serde_json::to_value(EvaluationStatus::NotTested).unwrap(),
        "not_tested"
    );
    assert_eq!(EvaluationStatus::LoadFailed.to_string(), "load_failed");
}

#[test]
fn test_scores_add_saturates() {
    let mut scores = Scores::default();
    scores.add(Category::Bugs, 7);
    scores.add(Category::Bugs, 7);
    assert_eq!(scores.bugs, 10);
    assert_eq!(scores.get(Category::UiAesthetics), 0);
}

#[test]
fn test_scores_clamped() {
    let scores = Scores {
        ui_aesthetics: 12,
        ux_intuitiveness: 3,
        bugs: 255,
        required_features: 10,
        eld_accuracy: 0,
    }
    .clamped();
    for category in Category::ALL {
        assert!(scores.get(category) <= MAX_SCORE);
    }
    assert_eq!(scores.ux_intuitiveness, 3);
}

#[test]
fn test_cycle_hours_text() {
    let mut route = TestRoute::default();
    assert_eq!(route.cycle_hours_text(), "2");
    route.cycle_hours = 12.5;
    assert_eq!(route.cycle_hours_text(), "12.5");
}

#[test]
fn test_route_from_config() {
    let route = TestRoute::default();
    assert_eq!(route.current_location, "Chicago, IL");
    assert_eq!(route.pickup_location, "Indianapolis, IN");
    assert_eq!(route.dropoff_location, "Cincinnati, OH");
}

#[test]
fn test_failed_result() {
    let site = SiteDescriptor::new("Down", "https://down.example.com");
    let result = EvaluationResult::failed(
        &site,
        EvaluationStatus::LoadFailed,
        "Navigation failed: net::ERR_NAME_NOT_RESOLVED",
        Utc::now(),
    );
    assert!(!result.is_complete());
    assert_eq!(result.scores, Scores::default());
    assert!(result.error_note().contains("ERR_NAME_NOT_RESOLVED"));
}

#[test]
fn test_check_outcome_failed_note() {
    let outcome = CheckOutcome::failed("map_output", Category::RequiredFeatures, "Script error: x");
    assert_eq!(outcome.points, 0);
    assert_eq!(outcome.notes, vec!["map_output failed: Script error: x".to_string()]);
}

#[test]
fn test_file_stem() {
    assert_eq!(file_stem("Trip Planner #1"), "Trip_Planner__1");
    assert_eq!(file_stem("eld-app.vercel.app"), "eld-app.vercel.app");
}

#[test]
fn test_file_timestamp() {
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 14, 5, 9).unwrap();
    assert_eq!(file_timestamp(at), "2025-03-01T14-05-09");
}
