//! Required-features checks: trip inputs, submission, map, stops, log sheets.

use async_trait::async_trait;

use super::common::{KeywordPresence, SelectorPresence, SubmissionCheck};
use super::eld::EldPresence;
use super::{Check, CheckContext, CheckPhase};
use crate::error::ProbeError;
use crate::model::{Category, CheckOutcome};

/// Inputs that look like location fields.
pub const LOCATION_INPUT_SELECTOR: &str = "input[type=\"text\"], [placeholder*=\"location\" i], \
     [name*=\"location\" i], [id*=\"location\" i]";

/// Inputs that look like an hours field.
pub const HOURS_INPUT_SELECTOR: &str = "input[type=\"number\"], [placeholder*=\"hour\" i], \
     [name*=\"hour\" i], [id*=\"hour\" i], [id*=\"cycle\" i]";

/// Route-map output: map containers, drawing surfaces, embedded map frames.
pub const MAP_SELECTOR: &str = ".map, #map, [class*=\"map\"], svg, iframe[src*=\"map\"], \
     iframe[src*=\"google\"], canvas";

const STOP_KEYWORDS: &[&str] = &["Stop", "Rest", "Break", "Station", "Point"];

/// Location and hours inputs are present: three locations plus hours for
/// full points, two locations for one.
pub struct TripInputs;

#[async_trait]
impl Check for TripInputs {
    fn name(&self) -> &'static str {
        "trip_inputs"
    }

    fn category(&self) -> Category {
        Category::RequiredFeatures
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Initial
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let locations = ctx.page.count(LOCATION_INPUT_SELECTOR).await?;
        let hours = ctx.page.count(HOURS_INPUT_SELECTOR).await?;
        let outcome = CheckOutcome::new(self.name(), self.category());

        Ok(if locations >= 3 && hours >= 1 {
            outcome
                .with_points(2)
                .with_note("Required input fields found")
        } else if locations >= 2 {
            outcome
                .with_points(1)
                .with_note("Some required input fields found")
        } else {
            outcome.with_note("Missing most required input fields")
        })
    }
}

pub(super) fn checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(TripInputs),
        Box::new(SubmissionCheck {
            name: "form_submitted",
            category: Category::RequiredFeatures,
            points: 2,
        }),
        Box::new(SelectorPresence {
            name: "route_map",
            category: Category::RequiredFeatures,
            phase: CheckPhase::Results,
            selector: MAP_SELECTOR,
            points: 2,
            found: "Route map found",
            missing: "No map found in results",
        }),
        Box::new(KeywordPresence {
            name: "stop_info",
            category: Category::RequiredFeatures,
            phase: CheckPhase::Results,
            keywords: STOP_KEYWORDS,
            points: 2,
            found: "Stop/rest information present",
            missing: "No stop/rest information found",
        }),
        Box::new(EldPresence {
            name: "log_sheets",
            category: Category::RequiredFeatures,
        }),
    ]
}
