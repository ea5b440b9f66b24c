//! Domain model: sites, the test route, scores and evaluation results.

use std::fmt;

use chrono::{DateTime, Utc};
use eldprobe_config::{RouteConfig, SiteConfig};
pub use eldprobe_config::file_stem;
use serde::{Deserialize, Serialize};

/// A site to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteDescriptor {
    pub name: String,
    pub url: String,
}

impl SiteDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

impl From<&SiteConfig> for SiteDescriptor {
    fn from(site: &SiteConfig) -> Self {
        Self::new(&site.name, &site.url)
    }
}

/// Timestamp as used in generated file names, e.g. `2025-03-01T14-05-09`.
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H-%M-%S").to_string()
}

/// Canned trip entered into every site's form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRoute {
    pub current_location: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_hours: f64,
}

impl TestRoute {
    /// Cycle hours as typed into a form: whole numbers without a fraction.
    pub fn cycle_hours_text(&self) -> String {
        if self.cycle_hours.fract() == 0.0 && self.cycle_hours.abs() < 1e15 {
            format!("{}", self.cycle_hours as i64)
        } else {
            self.cycle_hours.to_string()
        }
    }
}

impl Default for TestRoute {
    fn default() -> Self {
        Self::from(&RouteConfig::default())
    }
}

impl From<&RouteConfig> for TestRoute {
    fn from(route: &RouteConfig) -> Self {
        Self {
            current_location: route.current_location.clone(),
            pickup_location: route.pickup_location.clone(),
            dropoff_location: route.dropoff_location.clone(),
            cycle_hours: route.cycle_hours,
        }
    }
}

/// Lifecycle state of one site's evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    NotTested,
    Loaded,
    Complete,
    Error,
    LoadFailed,
}

impl EvaluationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationStatus::NotTested => "not_tested",
            EvaluationStatus::Loaded => "loaded",
            EvaluationStatus::Complete => "complete",
            EvaluationStatus::Error => "error",
            EvaluationStatus::LoadFailed => "load_failed",
        }
    }
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scoring category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    UiAesthetics,
    UxIntuitiveness,
    Bugs,
    RequiredFeatures,
    EldAccuracy,
}

impl Category {
    /// All categories in report order.
    pub const ALL: [Category; 5] = [
        Category::UiAesthetics,
        Category::UxIntuitiveness,
        Category::Bugs,
        Category::RequiredFeatures,
        Category::EldAccuracy,
    ];

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Category::UiAesthetics => "UI Aesthetics",
            Category::UxIntuitiveness => "UX Intuitiveness",
            Category::Bugs => "Bug-Free",
            Category::RequiredFeatures => "Required Features",
            Category::EldAccuracy => "ELD Accuracy",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Upper bound of every sub-score.
pub const MAX_SCORE: u8 = 10;

/// Per-category scores, each in `0..=10`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scores {
    pub ui_aesthetics: u8,
    pub ux_intuitiveness: u8,
    pub bugs: u8,
    pub required_features: u8,
    pub eld_accuracy: u8,
}

impl Scores {
    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::UiAesthetics => self.ui_aesthetics,
            Category::UxIntuitiveness => self.ux_intuitiveness,
            Category::Bugs => self.bugs,
            Category::RequiredFeatures => self.required_features,
            Category::EldAccuracy => self.eld_accuracy,
        }
    }

    fn slot(&mut self, category: Category) -> &mut u8 {
        match category {
            Category::UiAesthetics => &mut self.ui_aesthetics,
            Category::UxIntuitiveness => &mut self.ux_intuitiveness,
            Category::Bugs => &mut self.bugs,
            Category::RequiredFeatures => &mut self.required_features,
            Category::EldAccuracy => &mut self.eld_accuracy,
        }
    }

    /// Add points to a category, saturating at [`MAX_SCORE`].
    pub fn add(&mut self, category: Category, points: u8) {
        let slot = self.slot(category);
        *slot = slot.saturating_add(points).min(MAX_SCORE);
    }

    /// Copy with every category clamped to `0..=10`.
    pub fn clamped(mut self) -> Self {
        for category in Category::ALL {
            let slot = self.slot(category);
            *slot = (*slot).min(MAX_SCORE);
        }
        self
    }
}

/// Partial contribution of one heuristic check to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub check: &'static str,
    pub category: Category,
    pub points: u8,
    pub notes: Vec<String>,
}

impl CheckOutcome {
    pub fn new(check: &'static str, category: Category) -> Self {
        Self {
            check,
            category,
            points: 0,
            notes: Vec::new(),
        }
    }

    /// Award `points`.
    pub fn with_points(mut self, points: u8) -> Self {
        self.points = points;
        self
    }

    /// Attach a note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Zero contribution for a check that errored.
    pub fn failed(check: &'static str, category: Category, error: impl fmt::Display) -> Self {
        Self::new(check, category).with_note(format!("{} failed: {}", check, error))
    }
}

/// Persisted result of evaluating one site.
///
/// Built once at the end of a site's evaluation and never mutated after it
/// has been saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub website: String,
    pub url: String,
    pub status: EvaluationStatus,
    pub final_score: f64,
    pub scores: Scores,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationResult {
    /// Result for a site that never got evaluated past loading.
    pub fn failed(
        site: &SiteDescriptor,
        status: EvaluationStatus,
        error: impl fmt::Display,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            website: site.name.clone(),
            url: site.url.clone(),
            status,
            final_score: 0.0,
            scores: Scores::default(),
            notes: vec![error.to_string()],
            screenshots: Vec::new(),
            evaluated_at,
        }
    }

    /// Whether this result carries real scores.
    pub fn is_complete(&self) -> bool {
        self.status == EvaluationStatus::Complete
    }

    /// First note, used as the error message of failed evaluations.
    pub fn error_note(&self) -> &str {
        self.notes.first().map(String::as_str).unwrap_or("Unknown error")
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
