//! Heuristic checks.
//!
//! Each check inspects the page and returns a [`CheckOutcome`] for a single
//! category. Checks never touch a shared score; the probe folds their
//! outcomes afterwards. Point budgets per category add up to 10.

mod bugs;
mod common;
mod eld;
mod features;
mod ui;
mod ux;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::driver::{PageDriver, PageScript};
use crate::error::ProbeError;
use crate::form::WaitSettings;
use crate::model::{Category, CheckOutcome, TestRoute};

pub use bugs::{BrokenImages, ConsoleErrors, INVALID_INPUT, InvalidInputHandling, VisualGlitches};
pub use common::{KeywordPresence, SelectorPresence, SubmissionCheck};
pub use eld::{ELD_KEYWORDS, EldPresence, LOG_ELEMENT_SELECTOR, eld_logs_present};
pub use features::{HOURS_INPUT_SELECTOR, LOCATION_INPUT_SELECTOR, MAP_SELECTOR, TripInputs};
pub use ui::{
    ColorPalette, FontConsistency, LayoutElements, RESPONSIVE_VIEWPORTS, Responsive, TextContrast,
};
pub use ux::{InputLabels, LabeledControls};

/// When a check runs relative to form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckPhase {
    /// On the freshly loaded page.
    Initial,
    /// After the trip form was submitted.
    Results,
    /// Changes viewport or reloads the page, so runs last.
    Interactive,
}

/// What a check gets to look at.
pub struct CheckContext<'a> {
    pub page: &'a dyn PageDriver,
    pub route: &'a TestRoute,
    pub waits: &'a WaitSettings,
    /// Whether the trip form was submitted.
    pub submitted: bool,
}

/// A single scoring heuristic.
#[async_trait]
pub trait Check: Send + Sync {
    /// Stable identifier used in notes and logs.
    fn name(&self) -> &'static str;

    fn category(&self) -> Category;

    fn phase(&self) -> CheckPhase;

    /// Maximum points this check can award.
    fn max_points(&self) -> u8;

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError>;
}

/// Every check, in execution order within each phase.
pub fn all_checks() -> Vec<Box<dyn Check>> {
    let mut checks: Vec<Box<dyn Check>> = Vec::new();
    checks.extend(features::checks());
    checks.extend(eld::checks());
    checks.extend(ui::checks());
    checks.extend(ux::checks());
    checks.extend(bugs::checks());
    checks
}

/// Run the checks of one phase.
///
/// A failing check contributes zero points and a note; the remaining checks
/// still run. Only a lost page aborts the phase.
pub async fn run_phase(
    checks: &[Box<dyn Check>],
    phase: CheckPhase,
    ctx: &CheckContext<'_>,
) -> Result<Vec<CheckOutcome>, ProbeError> {
    let mut outcomes = Vec::new();
    for check in checks.iter().filter(|c| c.phase() == phase) {
        match check.run(ctx).await {
            Ok(mut outcome) => {
                outcome.points = outcome.points.min(check.max_points());
                outcomes.push(outcome);
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warn!("Check {} failed: {}", check.name(), e);
                outcomes.push(CheckOutcome::failed(check.name(), check.category(), e));
            }
        }
    }
    Ok(outcomes)
}

/// Whether `text` contains any of `keywords` (case-sensitive).
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Run a page script and read its result as a count.
pub(crate) async fn script_count(
    page: &dyn PageDriver,
    script: PageScript,
) -> Result<u64, ProbeError> {
    let value = page.run_script(script).await?;
    value.as_u64().ok_or_else(|| unexpected(script, &value))
}

/// Run a page script and read its result as a flag.
pub(crate) async fn script_flag(
    page: &dyn PageDriver,
    script: PageScript,
) -> Result<bool, ProbeError> {
    let value = page.run_script(script).await?;
    value.as_bool().ok_or_else(|| unexpected(script, &value))
}

pub(crate) fn unexpected(script: PageScript, value: &Value) -> ProbeError {
    ProbeError::Script(format!("{} returned unexpected {}", script.name(), value))
}

#[cfg(test)]
#[path = "checks_tests.rs"]
mod tests;
