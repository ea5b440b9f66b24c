//! Batch summaries and report files.
//!
//! [`BatchSummary::build`] is pure: the same results and timestamp always
//! give the same summary, and every renderer is a plain function of the
//! summary. [`ReportCompiler`] loads the persisted results and writes the
//! rendered files.

mod csv;
mod markdown;
mod text;

use std::cmp::Ordering;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::error::ProbeError;
use crate::model::{Category, EvaluationResult, EvaluationStatus, Scores, file_timestamp};
use crate::scoring::round_one;
use crate::store::ResultStore;

pub use csv::render_csv;
pub use markdown::{render_evaluation_report, render_top3_analysis};
pub use text::render_text;

/// How many sites get a detailed review.
pub const TOP_COUNT: usize = 3;

/// A scored site in ranking order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedSite {
    pub rank: usize,
    pub name: String,
    pub url: String,
    pub final_score: f64,
    pub scores: Scores,
    pub notes: Vec<String>,
}

/// Mean scores over completed evaluations, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Averages {
    pub overall: f64,
    pub ui_aesthetics: f64,
    pub ux_intuitiveness: f64,
    pub bugs: f64,
    pub required_features: f64,
    pub eld_accuracy: f64,
}

impl Averages {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::UiAesthetics => self.ui_aesthetics,
            Category::UxIntuitiveness => self.ux_intuitiveness,
            Category::Bugs => self.bugs,
            Category::RequiredFeatures => self.required_features,
            Category::EldAccuracy => self.eld_accuracy,
        }
    }

    fn of(ranking: &[RankedSite]) -> Self {
        if ranking.is_empty() {
            return Self::default();
        }
        let n = ranking.len() as f64;
        let mean = |category: Category| {
            round_one(
                ranking
                    .iter()
                    .map(|s| f64::from(s.scores.get(category)))
                    .sum::<f64>()
                    / n,
            )
        };
        Self {
            overall: round_one(ranking.iter().map(|s| s.final_score).sum::<f64>() / n),
            ui_aesthetics: mean(Category::UiAesthetics),
            ux_intuitiveness: mean(Category::UxIntuitiveness),
            bugs: mean(Category::Bugs),
            required_features: mean(Category::RequiredFeatures),
            eld_accuracy: mean(Category::EldAccuracy),
        }
    }
}

/// Best site in one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWinner {
    pub category: Category,
    pub name: String,
    pub score: u8,
}

/// A site without scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedSite {
    pub name: String,
    pub url: String,
    pub status: EvaluationStatus,
    pub error: String,
}

/// Rankings, averages, winners and failures over a set of results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub generated_at: DateTime<Utc>,
    pub total_websites: usize,
    pub successful_evaluations: usize,
    pub failed_evaluations: usize,
    pub ranking: Vec<RankedSite>,
    pub averages: Averages,
    pub category_winners: Vec<CategoryWinner>,
    pub failures: Vec<FailedSite>,
    /// Every result in load order.
    #[serde(skip)]
    pub results: Vec<EvaluationResult>,
}

impl BatchSummary {
    /// Summarise `results`. Only complete results are ranked and averaged;
    /// ties in final score are broken by name.
    pub fn build(results: Vec<EvaluationResult>, generated_at: DateTime<Utc>) -> Self {
        let mut complete: Vec<&EvaluationResult> =
            results.iter().filter(|r| r.is_complete()).collect();
        complete.sort_by(|a, b| {
            b.final_score
                .partial_cmp(&a.final_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.website.cmp(&b.website))
        });

        let ranking: Vec<RankedSite> = complete
            .iter()
            .enumerate()
            .map(|(i, r)| RankedSite {
                rank: i + 1,
                name: r.website.clone(),
                url: r.url.clone(),
                final_score: r.final_score,
                scores: r.scores,
                notes: r.notes.clone(),
            })
            .collect();

        let failures: Vec<FailedSite> = results
            .iter()
            .filter(|r| !r.is_complete())
            .map(|r| FailedSite {
                name: r.website.clone(),
                url: r.url.clone(),
                status: r.status,
                error: r.error_note().to_string(),
            })
            .collect();

        Self {
            generated_at,
            total_websites: results.len(),
            successful_evaluations: ranking.len(),
            failed_evaluations: failures.len(),
            averages: Averages::of(&ranking),
            category_winners: winners(&ranking),
            ranking,
            failures,
            results,
        }
    }

    /// The top of the ranking that gets a detailed review.
    pub fn top(&self) -> &[RankedSite] {
        &self.ranking[..self.ranking.len().min(TOP_COUNT)]
    }

    pub fn winner(&self, category: Category) -> Option<&CategoryWinner> {
        self.category_winners.iter().find(|w| w.category == category)
    }
}

/// First site in ranking order with the highest score, per category.
fn winners(ranking: &[RankedSite]) -> Vec<CategoryWinner> {
    Category::ALL
        .iter()
        .filter_map(|category| {
            let mut best: Option<&RankedSite> = None;
            for site in ranking {
                let better = best.is_none_or(|b| site.scores.get(*category) > b.scores.get(*category));
                if better {
                    best = Some(site);
                }
            }
            best.map(|site| CategoryWinner {
                category: *category,
                name: site.name.clone(),
                score: site.scores.get(*category),
            })
        })
        .collect()
}

/// Paths of the files written by one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFiles {
    pub summary_json: PathBuf,
    pub csv: PathBuf,
    pub text: PathBuf,
    pub evaluation_report: PathBuf,
    pub top3_analysis: PathBuf,
}

impl ReportFiles {
    pub fn all(&self) -> [&PathBuf; 5] {
        [
            &self.summary_json,
            &self.csv,
            &self.text,
            &self.evaluation_report,
            &self.top3_analysis,
        ]
    }
}

/// Loads stored results and writes every report into one directory.
#[derive(Debug, Clone)]
pub struct ReportCompiler {
    output_dir: PathBuf,
}

impl ReportCompiler {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// File names for a compilation at `generated_at`.
    pub fn files(&self, generated_at: DateTime<Utc>) -> ReportFiles {
        let ts = file_timestamp(generated_at);
        ReportFiles {
            summary_json: self.output_dir.join(format!("batch_summary_{}.json", ts)),
            csv: self.output_dir.join(format!("website_scores_{}.csv", ts)),
            text: self.output_dir.join(format!("summary_report_{}.txt", ts)),
            evaluation_report: self.output_dir.join("evaluation_report.md"),
            top3_analysis: self.output_dir.join("top3_detailed_analysis.md"),
        }
    }

    /// Load every result from `store`, summarise and write all reports.
    pub async fn compile(
        &self,
        store: &dyn ResultStore,
        generated_at: DateTime<Utc>,
    ) -> Result<(BatchSummary, ReportFiles), ProbeError> {
        let results = store.load_all().await?;
        info!("Compiling reports from {} results", results.len());
        let summary = BatchSummary::build(results, generated_at);
        let files = self.write(&summary).await?;
        Ok((summary, files))
    }

    /// Render `summary` into the output directory.
    pub async fn write(&self, summary: &BatchSummary) -> Result<ReportFiles, ProbeError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let files = self.files(summary.generated_at);

        let json = serde_json::to_string_pretty(summary)?;
        tokio::fs::write(&files.summary_json, json).await?;
        tokio::fs::write(&files.csv, render_csv(summary)).await?;
        tokio::fs::write(&files.text, render_text(summary)).await?;
        tokio::fs::write(&files.evaluation_report, render_evaluation_report(summary)).await?;
        tokio::fs::write(&files.top3_analysis, render_top3_analysis(summary)).await?;

        for path in files.all() {
            info!("Wrote {}", path.display());
        }
        Ok(files)
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
