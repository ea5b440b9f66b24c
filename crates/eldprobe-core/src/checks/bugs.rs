//! Bug checks: console errors, broken images, visual glitches and invalid
//! input handling.

use async_trait::async_trait;
use tracing::debug;

use super::{Check, CheckContext, CheckPhase, contains_any, script_count};
use crate::driver::{ElementRef, PageScript};
use crate::error::ProbeError;
use crate::form::click_submit;
use crate::model::{Category, CheckOutcome};

/// Garbage typed into the first text input.
pub const INVALID_INPUT: &str = "!@#$%^&*()";

const TEXT_INPUT: &str = "input[type=\"text\"]";

const VALIDATION_KEYWORDS: &[&str] = &["required", "invalid", "error", "Please", "incorrect"];

const ARIA_INVALID: &str = "[aria-invalid=\"true\"]";

/// Three points minus one per problem, floored at zero.
fn deduct(problems: u64) -> u8 {
    3 - problems.min(3) as u8
}

/// Console errors and uncaught exceptions since the page opened. Runs last
/// so it also sees errors provoked by the other checks.
pub struct ConsoleErrors;

#[async_trait]
impl Check for ConsoleErrors {
    fn name(&self) -> &'static str {
        "console_errors"
    }

    fn category(&self) -> Category {
        Category::Bugs
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Interactive
    }

    fn max_points(&self) -> u8 {
        3
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let errors = ctx.page.console_errors().await?;
        for error in &errors {
            debug!("Console error: {}", error);
        }
        let outcome =
            CheckOutcome::new(self.name(), self.category()).with_points(deduct(errors.len() as u64));
        Ok(if errors.is_empty() {
            outcome
        } else {
            outcome.with_note(format!("Found {} console errors", errors.len()))
        })
    }
}

pub struct BrokenImages;

#[async_trait]
impl Check for BrokenImages {
    fn name(&self) -> &'static str {
        "broken_images"
    }

    fn category(&self) -> Category {
        Category::Bugs
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Results
    }

    fn max_points(&self) -> u8 {
        3
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let broken = script_count(ctx.page, PageScript::BrokenImages).await?;
        let outcome = CheckOutcome::new(self.name(), self.category()).with_points(deduct(broken));
        Ok(if broken == 0 {
            outcome
        } else {
            outcome.with_note(format!("Found {} broken images", broken))
        })
    }
}

/// Elements rendered off-screen or half-faded text.
pub struct VisualGlitches;

#[async_trait]
impl Check for VisualGlitches {
    fn name(&self) -> &'static str {
        "visual_glitches"
    }

    fn category(&self) -> Category {
        Category::Bugs
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Results
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let glitches = script_count(ctx.page, PageScript::VisualGlitches).await?;
        let outcome = CheckOutcome::new(self.name(), self.category());
        Ok(match glitches {
            0..=4 => outcome.with_points(2),
            5..=14 => outcome
                .with_points(1)
                .with_note(format!("Found {} potential visual glitches", glitches)),
            _ => outcome.with_note(format!("Found {} potential visual glitches", glitches)),
        })
    }
}

/// Reload, type garbage into the first text input, submit, and look for
/// validation feedback.
pub struct InvalidInputHandling;

#[async_trait]
impl Check for InvalidInputHandling {
    fn name(&self) -> &'static str {
        "invalid_input"
    }

    fn category(&self) -> Category {
        Category::Bugs
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Interactive
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let page = ctx.page;
        let mut outcome = CheckOutcome::new(self.name(), self.category());

        page.reload().await?;
        if let Some(note) = ctx.waits.settle(page, "after reload").await? {
            outcome = outcome.with_note(note);
        }

        if page.count(TEXT_INPUT).await? == 0 {
            return Ok(outcome.with_note("No text input to test invalid input handling"));
        }
        page.fill(&ElementRef::new(TEXT_INPUT, 0), INVALID_INPUT)
            .await?;
        if click_submit(page).await?.is_none() {
            return Ok(outcome.with_note("No submit control to test invalid input handling"));
        }
        if let Some(note) = ctx.waits.settle(page, "after invalid submission").await? {
            outcome = outcome.with_note(note);
        }

        let text = page.body_text().await?;
        let validated =
            contains_any(&text, VALIDATION_KEYWORDS) || page.count(ARIA_INVALID).await? > 0;
        Ok(if validated {
            outcome
                .with_points(2)
                .with_note("Invalid input is handled with validation feedback")
        } else {
            outcome.with_note("No validation feedback for invalid input")
        })
    }
}

pub(super) fn checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(BrokenImages),
        Box::new(VisualGlitches),
        Box::new(InvalidInputHandling),
        Box::new(ConsoleErrors),
    ]
}
