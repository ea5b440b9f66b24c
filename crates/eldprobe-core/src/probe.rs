//! Evaluating one loaded site.

use std::path::PathBuf;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::checks::{self, Check, CheckContext, CheckPhase};
use crate::driver::PageDriver;
use crate::error::ProbeError;
use crate::form::{self, WaitSettings};
use crate::model::{
    CheckOutcome, EvaluationResult, EvaluationStatus, SiteDescriptor, TestRoute, file_stem,
};
use crate::scoring::{self, ScoreWeights};

/// Phone viewport used for the mobile screenshot.
pub const MOBILE_VIEWPORT: (u32, u32) = (375, 667);

/// Runs the trip form and every check against one page.
pub struct SiteProbe {
    route: TestRoute,
    waits: WaitSettings,
    weights: ScoreWeights,
    screenshot_dir: Option<PathBuf>,
    checks: Vec<Box<dyn Check>>,
}

impl SiteProbe {
    pub fn new(route: TestRoute, waits: WaitSettings, weights: ScoreWeights) -> Self {
        Self {
            route,
            waits,
            weights,
            screenshot_dir: None,
            checks: checks::all_checks(),
        }
    }

    /// Save screenshots into `dir`.
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = Some(dir.into());
        self
    }

    pub fn route(&self) -> &TestRoute {
        &self.route
    }

    /// Evaluate a page that has already loaded `site`.
    ///
    /// Check failures, screenshot failures and wait timeouts end up as notes.
    /// Only losing the page is an error.
    pub async fn evaluate(
        &self,
        site: &SiteDescriptor,
        page: &dyn PageDriver,
    ) -> Result<EvaluationResult, ProbeError> {
        info!("Evaluating {} ({})", site.name, site.url);
        let mut run = ProbeRun::default();

        if let Some(note) = self.waits.settle(page, "after load").await? {
            run.notes.push(note);
        }
        self.capture(page, site, "initial", &mut run).await?;

        let initial = self.run_phase(page, CheckPhase::Initial, false).await?;
        run.absorb(initial);

        info!("Submitting trip form on {}", site.name);
        let submission = form::submit_trip(page, &self.route, &self.waits).await?;
        let submitted = submission.submitted();
        run.notes.extend(submission.notes);
        self.capture(page, site, "results", &mut run).await?;

        let results = self.run_phase(page, CheckPhase::Results, submitted).await?;
        run.absorb(results);

        self.capture_mobile(page, site, &mut run).await?;

        let interactive = self
            .run_phase(page, CheckPhase::Interactive, submitted)
            .await?;
        run.absorb(interactive);

        let scores = scoring::fold(&run.outcomes);
        let final_score = self.weights.final_score(&scores);
        info!("{} scored {:.1}/10", site.name, final_score);

        Ok(EvaluationResult {
            website: site.name.clone(),
            url: site.url.clone(),
            status: EvaluationStatus::Complete,
            final_score,
            scores,
            notes: run.notes,
            screenshots: run.screenshots,
            evaluated_at: Utc::now(),
        })
    }

    async fn run_phase(
        &self,
        page: &dyn PageDriver,
        phase: CheckPhase,
        submitted: bool,
    ) -> Result<Vec<CheckOutcome>, ProbeError> {
        debug!("Running {:?} checks", phase);
        let ctx = CheckContext {
            page,
            route: &self.route,
            waits: &self.waits,
            submitted,
        };
        checks::run_phase(&self.checks, phase, &ctx).await
    }

    /// Save `<site>_<label>.png`. Failures other than a lost page become
    /// notes.
    async fn capture(
        &self,
        page: &dyn PageDriver,
        site: &SiteDescriptor,
        label: &str,
        run: &mut ProbeRun,
    ) -> Result<(), ProbeError> {
        let Some(dir) = &self.screenshot_dir else {
            return Ok(());
        };
        let path = dir.join(format!("{}_{}.png", file_stem(&site.name), label));

        let saved = match tokio::fs::create_dir_all(dir).await {
            Ok(()) => page.screenshot(&path, true).await,
            Err(e) => Err(ProbeError::Io(e)),
        };
        match saved {
            Ok(()) => {
                debug!("Saved screenshot {}", path.display());
                run.screenshots.push(path.display().to_string());
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("Screenshot {} failed: {}", path.display(), e);
                run.notes.push(format!("{} screenshot failed: {}", label, e));
                Ok(())
            }
        }
    }

    /// Screenshot at a phone viewport, then restore the default viewport.
    async fn capture_mobile(
        &self,
        page: &dyn PageDriver,
        site: &SiteDescriptor,
        run: &mut ProbeRun,
    ) -> Result<(), ProbeError> {
        if self.screenshot_dir.is_none() {
            return Ok(());
        }
        match page.set_viewport(Some(MOBILE_VIEWPORT)).await {
            Ok(()) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                run.notes.push(format!("mobile screenshot failed: {}", e));
                return Ok(());
            }
        }
        let captured = self.capture(page, site, "mobile", run).await;
        let restored = page.set_viewport(None).await;
        captured?;
        match restored {
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                run.notes.push(format!("Could not restore viewport: {}", e));
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }
}

/// Outcomes and side output gathered while probing one site.
#[derive(Default)]
struct ProbeRun {
    outcomes: Vec<CheckOutcome>,
    notes: Vec<String>,
    screenshots: Vec<String>,
}

impl ProbeRun {
    fn absorb(&mut self, outcomes: Vec<CheckOutcome>) {
        for outcome in &outcomes {
            self.notes.extend(outcome.notes.iter().cloned());
        }
        self.outcomes.extend(outcomes);
    }
}

#[cfg(test)]
#[path = "probe_tests.rs"]
mod tests;
