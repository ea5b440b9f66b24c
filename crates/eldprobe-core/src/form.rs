//! Filling and submitting the trip form.

use std::time::Duration;

use eldprobe_config::WaitConfig;
use tracing::{debug, info};

use crate::driver::{ElementRef, PageDriver, WaitCondition, WaitOutcome};
use crate::error::ProbeError;
use crate::matcher::{self, MatchStrategy};
use crate::model::TestRoute;

/// Elements whose appearance means the planner produced output.
pub const RESULT_SELECTOR: &str = ".map, #map, [class*=\"map\"], canvas, svg, \
     iframe[src*=\"map\"], table, .log, #log, [class*=\"log\"], [class*=\"eld\"]";

/// Dropdown entries offered by location autocompletes.
pub const SUGGESTION_SELECTOR: &str =
    ".autocomplete-option, .suggestion, [role=\"option\"], .pac-item";

/// How long a location field gets to show suggestions after typing.
pub const SUGGESTION_TIMEOUT: Duration = Duration::from_secs(2);

/// Timeouts for condition-based waits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitSettings {
    /// Upper bound for the page to go network-idle.
    pub settle_timeout: Duration,
    /// Quiet period that counts as network-idle.
    pub network_idle: Duration,
    /// Upper bound for result content to appear after submission.
    pub results_timeout: Duration,
}

impl From<&WaitConfig> for WaitSettings {
    fn from(config: &WaitConfig) -> Self {
        Self {
            settle_timeout: Duration::from_millis(config.settle_timeout_ms),
            network_idle: Duration::from_millis(config.network_idle_ms),
            results_timeout: Duration::from_millis(config.results_timeout_ms),
        }
    }
}

impl Default for WaitSettings {
    fn default() -> Self {
        Self::from(&WaitConfig::default())
    }
}

impl WaitSettings {
    /// Wait for the network to settle, turning a timeout into a note.
    pub async fn settle(
        &self,
        page: &dyn PageDriver,
        context: &str,
    ) -> Result<Option<String>, ProbeError> {
        let outcome = page
            .wait_until(
                &WaitCondition::NetworkIdle {
                    idle: self.network_idle,
                },
                self.settle_timeout,
            )
            .await?;
        Ok(match outcome {
            WaitOutcome::Satisfied => None,
            WaitOutcome::TimedOut => Some(format!(
                "Network did not go idle within {}ms {}",
                self.settle_timeout.as_millis(),
                context
            )),
        })
    }
}

/// The four trip-form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripField {
    CurrentLocation,
    Pickup,
    Dropoff,
    CycleHours,
}

impl TripField {
    pub const ALL: [TripField; 4] = [
        TripField::CurrentLocation,
        TripField::Pickup,
        TripField::Dropoff,
        TripField::CycleHours,
    ];

    /// Whether the field takes a place name that may autocomplete.
    pub fn is_location(&self) -> bool {
        !matches!(self, TripField::CycleHours)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TripField::CurrentLocation => "current location",
            TripField::Pickup => "pickup location",
            TripField::Dropoff => "dropoff location",
            TripField::CycleHours => "cycle hours",
        }
    }

    /// Ordered strategies for locating this field: attribute heuristics
    /// first, then position among same-typed inputs.
    pub fn chain(&self) -> Vec<MatchStrategy> {
        let (keywords, positional): (&[&str], MatchStrategy) = match self {
            TripField::CurrentLocation => (
                &["current", "start"],
                MatchStrategy::positional("input[type=\"text\"]", 0),
            ),
            TripField::Pickup => (
                &["pickup"],
                MatchStrategy::positional("input[type=\"text\"]", 1),
            ),
            TripField::Dropoff => (
                &["dropoff", "destination"],
                MatchStrategy::positional("input[type=\"text\"]", 2),
            ),
            TripField::CycleHours => (
                &["hour", "cycle"],
                MatchStrategy::positional("input[type=\"number\"]", 0),
            ),
        };
        vec![
            MatchStrategy::semantic(matcher::attribute_selector(keywords)),
            positional,
        ]
    }

    /// Value this field receives from the route.
    pub fn value(&self, route: &TestRoute) -> String {
        match self {
            TripField::CurrentLocation => route.current_location.clone(),
            TripField::Pickup => route.pickup_location.clone(),
            TripField::Dropoff => route.dropoff_location.clone(),
            TripField::CycleHours => route.cycle_hours_text(),
        }
    }
}

/// What happened when the trip form was submitted.
#[derive(Debug, Clone, Default)]
pub struct FormSubmission {
    pub filled: Vec<TripField>,
    pub submit: Option<ElementRef>,
    pub clicked: bool,
    pub results_appeared: bool,
    pub notes: Vec<String>,
}

impl FormSubmission {
    /// Whether the submit control was clicked.
    pub fn submitted(&self) -> bool {
        self.clicked
    }
}

/// Click the submit control, if one can be found. Returns the clicked
/// element; a failed click is an error.
pub async fn click_submit(page: &dyn PageDriver) -> Result<Option<ElementRef>, ProbeError> {
    let Some(submit) = matcher::resolve_first(page, &matcher::submit_chain()).await? else {
        return Ok(None);
    };
    page.click(&submit).await?;
    Ok(Some(submit))
}

/// Click the first autocomplete entry if one shows up after filling a
/// location field. Returns a note describing what happened, or `None` when
/// the field offered no suggestions.
pub async fn pick_suggestion(
    page: &dyn PageDriver,
    field: TripField,
) -> Result<Option<String>, ProbeError> {
    let outcome = page
        .wait_until(
            &WaitCondition::SelectorPresent(SUGGESTION_SELECTOR.to_string()),
            SUGGESTION_TIMEOUT,
        )
        .await?;
    if !outcome.is_satisfied() {
        debug!("No suggestions for {}", field.label());
        return Ok(None);
    }
    match page.click(&ElementRef::new(SUGGESTION_SELECTOR, 0)).await {
        Ok(()) => Ok(Some(format!(
            "Selected autocomplete suggestion for {}",
            field.label()
        ))),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => Ok(Some(format!(
            "Could not select suggestion for {}: {}",
            field.label(),
            e
        ))),
    }
}

/// Fill every trip field that can be located and submit the form once.
///
/// Missing fields, a missing submit control and wait timeouts are recorded
/// as notes. Only a lost page is an error.
pub async fn submit_trip(
    page: &dyn PageDriver,
    route: &TestRoute,
    waits: &WaitSettings,
) -> Result<FormSubmission, ProbeError> {
    let mut submission = FormSubmission::default();

    for field in TripField::ALL {
        let Some(element) = matcher::resolve_first(page, &field.chain()).await? else {
            submission
                .notes
                .push(format!("No {} field found", field.label()));
            continue;
        };
        match page.fill(&element, &field.value(route)).await {
            Ok(()) => {
                debug!("Filled {} at {}", field.label(), element);
                submission.filled.push(field);
                if field.is_location() {
                    if let Some(note) = pick_suggestion(page, field).await? {
                        submission.notes.push(note);
                    }
                }
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => submission
                .notes
                .push(format!("Could not fill {}: {}", field.label(), e)),
        }
    }
    submission.notes.push(format!(
        "Filled {}/{} trip fields",
        submission.filled.len(),
        TripField::ALL.len()
    ));

    match click_submit(page).await {
        Ok(Some(submit)) => {
            info!("Submitted trip form via {}", submit);
            submission.submit = Some(submit);
            submission.clicked = true;
        }
        Ok(None) => {
            submission.notes.push("Could not submit form".to_string());
            return Ok(submission);
        }
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            submission
                .notes
                .push(format!("Could not submit form: {}", e));
            return Ok(submission);
        }
    }
    submission.notes.push("Form submitted successfully".to_string());

    if let Some(note) = waits.settle(page, "after submission").await? {
        submission.notes.push(note);
    }

    let results = page
        .wait_until(
            &WaitCondition::SelectorPresent(RESULT_SELECTOR.to_string()),
            waits.results_timeout,
        )
        .await?;
    submission.results_appeared = results.is_satisfied();
    if !submission.results_appeared {
        submission.notes.push(format!(
            "No map or log output appeared within {}ms",
            waits.results_timeout.as_millis()
        ));
    }

    Ok(submission)
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod tests;
