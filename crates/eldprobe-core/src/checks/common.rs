//! Reusable check shapes: selector presence, keyword presence and
//! "was the form submitted".

use async_trait::async_trait;

use super::{Check, CheckContext, CheckPhase, contains_any};
use crate::error::ProbeError;
use crate::model::{Category, CheckOutcome};

/// Awards points when any element matches a selector.
pub struct SelectorPresence {
    pub name: &'static str,
    pub category: Category,
    pub phase: CheckPhase,
    pub selector: &'static str,
    pub points: u8,
    pub found: &'static str,
    pub missing: &'static str,
}

#[async_trait]
impl Check for SelectorPresence {
    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn phase(&self) -> CheckPhase {
        self.phase
    }

    fn max_points(&self) -> u8 {
        self.points
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let outcome = CheckOutcome::new(self.name, self.category);
        Ok(if ctx.page.count(self.selector).await? > 0 {
            outcome.with_points(self.points).with_note(self.found)
        } else {
            outcome.with_note(self.missing)
        })
    }
}

/// Awards points when the body text mentions any keyword.
pub struct KeywordPresence {
    pub name: &'static str,
    pub category: Category,
    pub phase: CheckPhase,
    pub keywords: &'static [&'static str],
    pub points: u8,
    pub found: &'static str,
    pub missing: &'static str,
}

#[async_trait]
impl Check for KeywordPresence {
    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn phase(&self) -> CheckPhase {
        self.phase
    }

    fn max_points(&self) -> u8 {
        self.points
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let text = ctx.page.body_text().await?;
        let outcome = CheckOutcome::new(self.name, self.category);
        Ok(if contains_any(&text, self.keywords) {
            outcome.with_points(self.points).with_note(self.found)
        } else {
            outcome.with_note(self.missing)
        })
    }
}

/// Awards points when the trip form was submitted.
pub struct SubmissionCheck {
    pub name: &'static str,
    pub category: Category,
    pub points: u8,
}

#[async_trait]
impl Check for SubmissionCheck {
    fn name(&self) -> &'static str {
        self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Results
    }

    fn max_points(&self) -> u8 {
        self.points
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let outcome = CheckOutcome::new(self.name, self.category);
        Ok(if ctx.submitted {
            outcome.with_points(self.points)
        } else {
            outcome
        })
    }
}
