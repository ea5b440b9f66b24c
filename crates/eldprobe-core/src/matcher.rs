//! Element matcher strategies.
//!
//! Finding a form field or submit control on an unknown page is a chain of
//! guesses. Each guess is a [`MatchStrategy`]; a chain is tried in order and
//! the first hit wins.

use tracing::debug;

use crate::driver::{ElementRef, PageDriver};
use crate::error::ProbeError;

/// Button labels that usually mean "run the planner".
pub const SUBMIT_TEXT_NEEDLES: [&str; 5] = ["Submit", "Calculate", "Plan", "Generate", "Create"];

/// One way of locating an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStrategy {
    /// First element matching an attribute-heuristic selector.
    Semantic { selector: String },
    /// The `index`-th element of a structural selector.
    Positional { selector: String, index: usize },
    /// First `selector` match whose text contains any needle.
    Text {
        selector: String,
        needles: Vec<String>,
    },
}

impl MatchStrategy {
    pub fn semantic(selector: impl Into<String>) -> Self {
        MatchStrategy::Semantic {
            selector: selector.into(),
        }
    }

    pub fn positional(selector: impl Into<String>, index: usize) -> Self {
        MatchStrategy::Positional {
            selector: selector.into(),
            index,
        }
    }

    pub fn text(selector: impl Into<String>, needles: &[&str]) -> Self {
        MatchStrategy::Text {
            selector: selector.into(),
            needles: needles.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Try this strategy against the page.
    pub async fn resolve(&self, page: &dyn PageDriver) -> Result<Option<ElementRef>, ProbeError> {
        match self {
            MatchStrategy::Semantic { selector } => Ok((page.count(selector).await? > 0)
                .then(|| ElementRef::new(selector.as_str(), 0))),
            MatchStrategy::Positional { selector, index } => Ok((page.count(selector).await?
                > *index)
                .then(|| ElementRef::new(selector.as_str(), *index))),
            MatchStrategy::Text { selector, needles } => {
                let needles: Vec<&str> = needles.iter().map(String::as_str).collect();
                Ok(page
                    .find_by_text(selector, &needles)
                    .await?
                    .map(|index| ElementRef::new(selector.as_str(), index)))
            }
        }
    }
}

/// Resolve the first strategy in `chain` that matches.
///
/// A strategy that errors (for example on a selector the page's engine
/// rejects) is skipped unless the page itself is gone.
pub async fn resolve_first(
    page: &dyn PageDriver,
    chain: &[MatchStrategy],
) -> Result<Option<ElementRef>, ProbeError> {
    for strategy in chain {
        match strategy.resolve(page).await {
            Ok(Some(element)) => {
                debug!("Matched {} via {:?}", element, strategy);
                return Ok(Some(element));
            }
            Ok(None) => {}
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => debug!("Strategy {:?} failed: {}", strategy, e),
        }
    }
    Ok(None)
}

/// Selector matching any input whose placeholder, aria-label, name or id
/// contains one of `keywords`, case-insensitively.
pub fn attribute_selector(keywords: &[&str]) -> String {
    let mut parts = Vec::new();
    for keyword in keywords {
        for attr in ["placeholder", "aria-label", "name", "id"] {
            parts.push(format!("input[{}*=\"{}\" i]", attr, keyword));
        }
    }
    parts.join(", ")
}

/// The submit-control chain: explicit submit types, label text, common
/// class/id conventions, then any button at all.
pub fn submit_chain() -> Vec<MatchStrategy> {
    vec![
        MatchStrategy::semantic("button[type=\"submit\"]"),
        MatchStrategy::semantic("input[type=\"submit\"]"),
        MatchStrategy::text("button", &SUBMIT_TEXT_NEEDLES),
        MatchStrategy::semantic(".submit"),
        MatchStrategy::semantic("#submit"),
        MatchStrategy::positional("button", 0),
    ]
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
