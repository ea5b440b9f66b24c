//! Folding check outcomes into scores and the weighted final score.

use eldprobe_config::WeightsConfig;

use crate::model::{Category, CheckOutcome, Scores};

/// Relative weight of each category in the final score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Indexed in [`Category::ALL`] order.
    weights: [f64; 5],
}

impl From<&WeightsConfig> for ScoreWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            weights: config.as_array(),
        }
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::from(&WeightsConfig::default())
    }
}

impl ScoreWeights {
    pub fn weight(&self, category: Category) -> f64 {
        Category::ALL
            .iter()
            .position(|c| *c == category)
            .map(|i| self.weights[i])
            .unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Weighted average of the sub-scores, normalised by the weight sum and
    /// rounded to one decimal. Zero when the weights sum to zero or less.
    pub fn final_score(&self, scores: &Scores) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }
        let weighted: f64 = Category::ALL
            .iter()
            .map(|c| f64::from(scores.get(*c)) * self.weight(*c))
            .sum();
        round_one(weighted / total)
    }
}

/// Sum outcomes per category, clamping every category to `0..=10`.
pub fn fold(outcomes: &[CheckOutcome]) -> Scores {
    outcomes
        .iter()
        .fold(Scores::default(), |mut scores, outcome| {
            scores.add(outcome.category, outcome.points);
            scores
        })
        .clamped()
}

/// Round to one decimal place.
pub fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
