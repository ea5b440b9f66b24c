//! Sequential batch evaluation.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::driver::PageLauncher;
use crate::model::{EvaluationResult, EvaluationStatus, Scores, SiteDescriptor, file_stem};
use crate::probe::SiteProbe;
use crate::report::ReportCompiler;
use crate::store::ResultStore;

/// Default bound for opening a site.
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Default pause between two sites.
pub const DEFAULT_SITE_PAUSE: Duration = Duration::from_secs(2);

/// Site name derived from its URL: scheme and trailing slashes stripped,
/// unsafe characters replaced by `_`.
pub fn site_name_from_url(url: &str) -> String {
    let url = url.trim();
    let rest = url.split_once("://").map(|(_, rest)| rest).unwrap_or(url);
    file_stem(rest.trim_end_matches('/'))
}

/// One row of a batch record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteScore {
    pub name: String,
    pub url: String,
    pub status: EvaluationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Scores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&EvaluationResult> for WebsiteScore {
    fn from(result: &EvaluationResult) -> Self {
        let complete = result.is_complete();
        Self {
            name: result.website.clone(),
            url: result.url.clone(),
            status: result.status,
            final_score: complete.then_some(result.final_score),
            scores: complete.then_some(result.scores),
            error: (!complete).then(|| result.error_note().to_string()),
        }
    }
}

/// Metadata of one batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecord {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Seconds.
    pub total_duration: f64,
    pub total_websites: usize,
    pub successful_evaluations: usize,
    pub failed_evaluations: usize,
    pub website_scores: Vec<WebsiteScore>,
}

/// Evaluates sites one after another: open, probe, persist, close, pause.
pub struct BatchRunner {
    launcher: Arc<dyn PageLauncher>,
    store: Arc<dyn ResultStore>,
    probe: SiteProbe,
    navigation_timeout: Duration,
    site_pause: Duration,
    reports: Option<ReportCompiler>,
}

impl BatchRunner {
    pub fn new(launcher: Arc<dyn PageLauncher>, store: Arc<dyn ResultStore>, probe: SiteProbe) -> Self {
        Self {
            launcher,
            store,
            probe,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            site_pause: DEFAULT_SITE_PAUSE,
            reports: None,
        }
    }

    pub fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    pub fn with_site_pause(mut self, pause: Duration) -> Self {
        self.site_pause = pause;
        self
    }

    /// Compile reports after each batch.
    pub fn with_reports(mut self, compiler: ReportCompiler) -> Self {
        self.reports = Some(compiler);
        self
    }

    /// Open, probe, persist and close one site. Never fails: load failures
    /// and fatal probe errors become the result's status.
    pub async fn evaluate_site(&self, site: &SiteDescriptor) -> EvaluationResult {
        let result = match self.launcher.open(&site.url, self.navigation_timeout).await {
            Ok(page) => {
                let result = match self.probe.evaluate(site, page.as_ref()).await {
                    Ok(result) => result,
                    Err(e) => {
                        error!("Evaluation of {} aborted: {}", site.name, e);
                        EvaluationResult::failed(
                            site,
                            EvaluationStatus::Error,
                            format!("Fatal error during evaluation: {}", e),
                            Utc::now(),
                        )
                    }
                };
                if let Err(e) = page.close().await {
                    warn!("Failed to close page for {}: {}", site.name, e);
                }
                result
            }
            Err(e) if e.is_load_failure() => {
                warn!("Failed to load {}: {}", site.url, e);
                EvaluationResult::failed(site, EvaluationStatus::LoadFailed, &e, Utc::now())
            }
            Err(e) => {
                error!("Could not open a page for {}: {}", site.name, e);
                EvaluationResult::failed(site, EvaluationStatus::Error, &e, Utc::now())
            }
        };

        if let Err(e) = self.store.save(&result).await {
            error!("Failed to save result for {}: {}", site.name, e);
        }
        result
    }

    /// Evaluate every site, persist the batch record and compile reports.
    pub async fn run(&self, sites: &[SiteDescriptor]) -> BatchRecord {
        let start = Utc::now();
        let started = tokio::time::Instant::now();
        info!("Batch started at {} with {} sites", start.to_rfc3339(), sites.len());

        let mut website_scores = Vec::with_capacity(sites.len());
        let mut successful = 0;
        for (i, site) in sites.iter().enumerate() {
            info!("[{}/{}] Evaluating {} ({})", i + 1, sites.len(), site.name, site.url);
            let result = self.evaluate_site(site).await;
            if result.is_complete() {
                successful += 1;
                info!("{} complete: {:.1}/10", site.name, result.final_score);
            } else {
                info!("{} ended with status {}", site.name, result.status);
            }
            website_scores.push(WebsiteScore::from(&result));

            if i + 1 < sites.len() && !self.site_pause.is_zero() {
                tokio::time::sleep(self.site_pause).await;
            }
        }

        let record = BatchRecord {
            start_time: start,
            end_time: Utc::now(),
            total_duration: started.elapsed().as_secs_f64(),
            total_websites: sites.len(),
            successful_evaluations: successful,
            failed_evaluations: sites.len() - successful,
            website_scores,
        };
        info!(
            "Batch finished in {:.1}s: {} successful, {} failed",
            record.total_duration, record.successful_evaluations, record.failed_evaluations
        );

        if let Err(e) = self.store.save_batch(&record).await {
            error!("Failed to save batch record: {}", e);
        }
        if let Some(compiler) = &self.reports {
            if let Err(e) = compiler.compile(self.store.as_ref(), record.end_time).await {
                error!("Failed to compile reports: {}", e);
            }
        }
        record
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
