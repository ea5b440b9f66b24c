//! Heuristic evaluation of trip-planner / ELD logbook web applications.
//!
//! A [`SiteProbe`] drives one loaded page through the [`PageDriver`] seam:
//! it fills and submits the trip form, runs every [`Check`], and folds the
//! partial [`CheckOutcome`]s into [`Scores`]. The [`BatchRunner`] does that
//! for a list of sites and persists one [`EvaluationResult`] per site through
//! a [`ResultStore`]; the [`ReportCompiler`] turns the persisted results into
//! rankings and report files.

pub mod checks;
pub mod driver;
pub mod error;
pub mod form;
pub mod matcher;
pub mod model;
pub mod probe;
pub mod report;
pub mod runner;
pub mod scoring;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use checks::{Check, CheckContext, CheckPhase, all_checks};
pub use driver::{ElementRef, PageDriver, PageLauncher, PageScript, WaitCondition, WaitOutcome};
pub use error::ProbeError;
pub use form::{FormSubmission, TripField, WaitSettings};
pub use matcher::MatchStrategy;
pub use model::{
    Category, CheckOutcome, EvaluationResult, EvaluationStatus, Scores, SiteDescriptor, TestRoute,
};
pub use probe::SiteProbe;
pub use report::{BatchSummary, ReportCompiler, ReportFiles};
pub use runner::{BatchRecord, BatchRunner, WebsiteScore, site_name_from_url};
pub use scoring::ScoreWeights;
pub use store::{FileResultStore, MemoryResultStore, ResultStore};
