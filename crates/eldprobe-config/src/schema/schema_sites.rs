//! Site list configuration.

use serde::{Deserialize, Serialize};

/// A site to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Identifier used in result file names.
    pub name: String,
    pub url: String,
}

impl SiteConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Stem of this site's result and screenshot file names.
    pub fn file_stem(&self) -> String {
        file_stem(&self.name)
    }
}

/// File-name-safe form of a site name: every character other than ASCII
/// letters, digits, `_`, `-` and `.` becomes `_`.
pub fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

const BUILTIN_SITES: &[(&str, &str)] = &[
    ("SpotterLavandesn", "https://spotter.lavandesn.com/"),
    ("TripsFrontend", "https://trips-frontend-dusky.vercel.app"),
    ("EldClient", "https://eld-client.onrender.com"),
    ("EldLogApp", "https://eld-log-app-git-main-mert-gokhan-donmezs-projects.vercel.app/"),
    ("TrackingUserApp", "https://tracking-user-app.netlify.app/"),
    ("FrontendNine", "https://frontend-nine-phi-12.vercel.app/"),
    ("TripappYdoc", "https://tripapp-ydoc.onrender.com"),
    ("TripplannerFrontend", "https://tripplanner-frontend-production.up.railway.app/"),
    ("SpotterAiLogbook", "https://spotter-ai-logbook-react-frontend.vercel.app"),
    ("DriverLogbook", "https://driver-logbook.vercel.app/"),
    ("TripPlanningLogging", "https://trip-planning-logging.netlify.app/"),
    ("EldLog", "http://eldlog.duckdns.org"),
    ("RouteELDTracker", "https://route-eld-tracker-git-main-ilhams-projects-9cb20472.vercel.app/"),
    ("TrajectSpotter", "https://trajectspotterfrontend.onrender.com"),
    ("EldFrontendCobt", "https://eld-frontend-cobt.vercel.app/"),
    ("TripplannerMu", "https://tripplanner-mu.vercel.app/"),
    ("TripLogger", "https://trip-logger-jet.vercel.app"),
    ("EldTripPlanner", "https://eld-trip-planner-frontend.vercel.app/"),
    ("SpotterFront", "https://spotter-front-git-master-pbnjaays-projects.vercel.app/"),
    ("TrackDrivers", "https://track-drivers.vercel.app/"),
    ("TruckLogbook", "https://truck-logbook.vercel.app/"),
    ("TripPlannerFrontend", "https://trip-planner-frontend-tau.vercel.app"),
    ("EldClientVercel", "https://eld-client.vercel.app"),
    ("WeHaulFrontend", "https://we-haul-frontend.vercel.app/trips"),
    ("EldGenerator", "https://eld-generator.netlify.app"),
    ("TripPlannerYphs", "https://trip-planner-yphs.onrender.com/"),
    ("EldFrontendSand", "https://eld-frontend-sand.vercel.app/"),
    ("EldTripTracker", "https://eld-trip-tracker.vercel.app/"),
    ("EldTripPlannerApp", "https://eld-trip-planner.vercel.app/"),
    ("TripPlannerAppGray", "https://trip-planner-app-gray.vercel.app/"),
];

/// The built-in list of trip planner deployments.
pub fn default_sites() -> Vec<SiteConfig> {
    BUILTIN_SITES
        .iter()
        .map(|(name, url)| SiteConfig::new(*name, *url))
        .collect()
}
