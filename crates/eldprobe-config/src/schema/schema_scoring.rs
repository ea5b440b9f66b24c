//! Test route and scoring configuration.

use serde::{Deserialize, Serialize};

/// Canned trip entered into every site's form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default = "default_current_location")]
    pub current_location: String,

    #[serde(default = "default_pickup_location")]
    pub pickup_location: String,

    #[serde(default = "default_dropoff_location")]
    pub dropoff_location: String,

    /// Hours already used in the current 70-hour cycle.
    #[serde(default = "default_cycle_hours")]
    pub cycle_hours: f64,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            current_location: default_current_location(),
            pickup_location: default_pickup_location(),
            dropoff_location: default_dropoff_location(),
            cycle_hours: default_cycle_hours(),
        }
    }
}

fn default_current_location() -> String {
    "Chicago, IL".to_string()
}

fn default_pickup_location() -> String {
    "Indianapolis, IN".to_string()
}

fn default_dropoff_location() -> String {
    "Cincinnati, OH".to_string()
}

fn default_cycle_hours() -> f64 {
    2.0
}

/// Scoring configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Relative weight of each category in the final score.
///
/// The final score divides by the weight sum, so weights need not add up to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_ui_weight")]
    pub ui_aesthetics: f64,

    #[serde(default = "default_ux_weight")]
    pub ux_intuitiveness: f64,

    #[serde(default = "default_bugs_weight")]
    pub bugs: f64,

    #[serde(default = "default_features_weight")]
    pub required_features: f64,

    #[serde(default = "default_eld_weight")]
    pub eld_accuracy: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            ui_aesthetics: default_ui_weight(),
            ux_intuitiveness: default_ux_weight(),
            bugs: default_bugs_weight(),
            required_features: default_features_weight(),
            eld_accuracy: default_eld_weight(),
        }
    }
}

impl WeightsConfig {
    /// Weights in category order: UI, UX, bugs, features, ELD.
    pub fn as_array(&self) -> [f64; 5] {
        [
            self.ui_aesthetics,
            self.ux_intuitiveness,
            self.bugs,
            self.required_features,
            self.eld_accuracy,
        ]
    }

    /// Sum of all weights.
    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

fn default_ui_weight() -> f64 {
    0.20
}

fn default_ux_weight() -> f64 {
    0.25
}

fn default_bugs_weight() -> f64 {
    0.20
}

fn default_features_weight() -> f64 {
    0.15
}

fn default_eld_weight() -> f64 {
    0.20
}
