//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

mod schema_browser;
mod schema_scoring;
mod schema_sites;

pub use schema_browser::*;
pub use schema_scoring::*;
pub use schema_sites::*;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default)]
    pub wait: WaitConfig,

    #[serde(default)]
    pub route: RouteConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Sites to evaluate. Replaces the built-in list when present.
    #[serde(default = "default_sites")]
    pub sites: Vec<SiteConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            run: RunConfig::default(),
            wait: WaitConfig::default(),
            route: RouteConfig::default(),
            scoring: ScoringConfig::default(),
            logging: LoggingConfig::default(),
            sites: default_sites(),
        }
    }
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
