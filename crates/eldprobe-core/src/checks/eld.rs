//! ELD accuracy checks.

use async_trait::async_trait;

use super::common::KeywordPresence;
use super::{Check, CheckContext, CheckPhase, contains_any};
use crate::driver::PageDriver;
use crate::error::ProbeError;
use crate::model::{Category, CheckOutcome};

/// Text that marks a page as showing driver logs.
pub const ELD_KEYWORDS: &[&str] = &[
    "ELD",
    "Electronic Log",
    "Duty Status",
    "Hours of Service",
    "HOS",
    "Driver Log",
];

/// Elements that typically render a log grid.
pub const LOG_ELEMENT_SELECTOR: &str =
    "table, svg, canvas, .log, #log, [class*=\"log\"], [class*=\"eld\"]";

const HOS_KEYWORDS: &[&str] = &["Hours of Service", "HOS"];
const STATUS_KEYWORDS: &[&str] = &["On Duty", "Off Duty", "Driving", "Duty", "Status"];
const DRIVE_TIME_KEYWORDS: &[&str] = &[
    "Drive Time",
    "Driving Hours",
    "Available Hours",
    "Remaining",
];
const BREAK_KEYWORDS: &[&str] = &["Break", "Rest", "Sleep"];

/// Whether the page shows ELD logs: log vocabulary in the text, or elements
/// that usually render a log grid.
pub async fn eld_logs_present(page: &dyn PageDriver) -> Result<bool, ProbeError> {
    let text = page.body_text().await?;
    if contains_any(&text, ELD_KEYWORDS) {
        return Ok(true);
    }
    Ok(page.count(LOG_ELEMENT_SELECTOR).await? > 0)
}

/// Two points when ELD logs are present. Used by both the ELD accuracy and
/// required-features categories.
pub struct EldPresence {
    pub name: &'static str,
    pub category: Category,
}

#[async_trait]
impl Check for EldPresence {
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
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let outcome = CheckOutcome::new(self.name, self.category);
        Ok(if eld_logs_present(ctx.page).await? {
            outcome.with_points(2).with_note("ELD logs found")
        } else {
            outcome.with_note("No ELD logs found")
        })
    }
}

fn keyword_check(
    name: &'static str,
    keywords: &'static [&'static str],
    found: &'static str,
    missing: &'static str,
) -> Box<dyn Check> {
    Box::new(KeywordPresence {
        name,
        category: Category::EldAccuracy,
        phase: CheckPhase::Results,
        keywords,
        points: 2,
        found,
        missing,
    })
}

pub(super) fn checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(EldPresence {
            name: "eld_presence",
            category: Category::EldAccuracy,
        }),
        keyword_check(
            "hos_text",
            HOS_KEYWORDS,
            "HOS information present",
            "No HOS information found",
        ),
        keyword_check(
            "duty_status",
            STATUS_KEYWORDS,
            "Status changes displayed",
            "No duty status changes found",
        ),
        keyword_check(
            "drive_time",
            DRIVE_TIME_KEYWORDS,
            "Drive time calculations present",
            "No drive time calculations found",
        ),
        keyword_check(
            "breaks",
            BREAK_KEYWORDS,
            "Breaks representation present",
            "No breaks representation found",
        ),
    ]
}
