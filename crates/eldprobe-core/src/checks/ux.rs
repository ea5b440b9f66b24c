//! UX intuitiveness checks.

use async_trait::async_trait;

use super::common::{SelectorPresence, SubmissionCheck};
use super::{Check, CheckContext, CheckPhase, contains_any, unexpected};
use crate::driver::PageScript;
use crate::error::ProbeError;
use crate::model::{Category, CheckOutcome};

/// Label wording per trip field; a field counts when any alternative shows
/// up in the markup.
const LABEL_GROUPS: [&[&str]; 4] = [
    &["Current Location", "Start"],
    &["Pickup"],
    &["Dropoff", "Destination"],
    &["Cycle", "Hours", "HOS"],
];

const NAVIGATION_SELECTOR: &str = "nav, [role=\"navigation\"], .nav, .navbar, .menu";

const HELP_SELECTOR: &str =
    "[title], [data-tooltip], .tooltip, .help, [aria-describedby], [class*=\"help\"]";

/// Trip fields carry recognisable labels.
pub struct InputLabels;

#[async_trait]
impl Check for InputLabels {
    fn name(&self) -> &'static str {
        "input_labels"
    }

    fn category(&self) -> Category {
        Category::UxIntuitiveness
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Initial
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let html = ctx.page.html().await?;
        let labeled = LABEL_GROUPS
            .iter()
            .filter(|group| contains_any(&html, group))
            .count();
        let outcome = CheckOutcome::new(self.name(), self.category());

        Ok(match labeled {
            n if n >= 3 => outcome.with_points(2).with_note("Clear input labels"),
            2 => outcome.with_points(1).with_note("Some input labels unclear"),
            _ => outcome.with_note("Input labels missing or unclear"),
        })
    }
}

/// Share of visible form controls that have a label, placeholder or ARIA
/// name.
pub struct LabeledControls;

#[async_trait]
impl Check for LabeledControls {
    fn name(&self) -> &'static str {
        "labeled_controls"
    }

    fn category(&self) -> Category {
        Category::UxIntuitiveness
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Initial
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let value = ctx.page.run_script(PageScript::LabeledFormControls).await?;
        let (Some(total), Some(labeled)) = (value["total"].as_u64(), value["labeled"].as_u64())
        else {
            return Err(unexpected(PageScript::LabeledFormControls, &value));
        };
        let outcome = CheckOutcome::new(self.name(), self.category());
        if total == 0 {
            return Ok(outcome.with_note("No form controls found"));
        }

        let ratio = labeled as f64 / total as f64;
        let points = if ratio > 0.8 {
            2
        } else if ratio > 0.5 {
            1
        } else {
            0
        };
        Ok(outcome
            .with_points(points)
            .with_note(format!("{}/{} form controls labelled", labeled, total)))
    }
}

pub(super) fn checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(InputLabels),
        Box::new(SelectorPresence {
            name: "navigation",
            category: Category::UxIntuitiveness,
            phase: CheckPhase::Initial,
            selector: NAVIGATION_SELECTOR,
            points: 2,
            found: "Navigation present",
            missing: "No navigation elements found",
        }),
        Box::new(SelectorPresence {
            name: "help_text",
            category: Category::UxIntuitiveness,
            phase: CheckPhase::Initial,
            selector: HELP_SELECTOR,
            points: 2,
            found: "Help or tooltip elements present",
            missing: "No help or tooltip elements found",
        }),
        Box::new(LabeledControls),
        Box::new(SubmissionCheck {
            name: "workflow",
            category: Category::UxIntuitiveness,
            points: 2,
        }),
    ]
}
