//! Configuration validation.

use std::collections::{HashMap, HashSet};

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error, if any, into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_timing(config, &mut result);
        Self::validate_route(config, &mut result);
        Self::validate_weights(config, &mut result);
        Self::validate_sites(config, &mut result);

        result
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.viewport_width == 0 || config.browser.viewport_height == 0 {
            result.add_error(ValidationError::new(
                "browser.viewport",
                "Viewport dimensions must be greater than 0",
            ));
        }

        if let Some(ref path) = config.browser.chrome_path {
            if !path.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.chrome_path",
                    format!("Chrome executable does not exist: {:?}", path),
                ));
            }
        }
    }

    fn validate_timing(config: &Config, result: &mut ValidationResult) {
        if config.run.navigation_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "run.navigation_timeout_ms",
                "navigation_timeout_ms must be greater than 0",
            ));
        }

        if config.wait.settle_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "wait.settle_timeout_ms",
                "settle_timeout_ms must be greater than 0",
            ));
        }

        if config.wait.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "wait.poll_interval_ms",
                "poll_interval_ms must be greater than 0",
            ));
        }

        if config.wait.network_idle_ms >= config.wait.settle_timeout_ms {
            result.add_warning(ValidationWarning::new(
                "wait.network_idle_ms",
                "network_idle_ms is not shorter than settle_timeout_ms, network idle can never be observed",
            ));
        }

        if config.run.site_pause_ms > 60_000 {
            result.add_warning(ValidationWarning::new(
                "run.site_pause_ms",
                "site_pause_ms is over a minute, batches will be slow",
            ));
        }
    }

    fn validate_route(config: &Config, result: &mut ValidationResult) {
        let route = &config.route;
        for (field, value) in [
            ("route.current_location", &route.current_location),
            ("route.pickup_location", &route.pickup_location),
            ("route.dropoff_location", &route.dropoff_location),
        ] {
            if value.trim().is_empty() {
                result.add_error(ValidationError::new(field, "Location cannot be empty"));
            }
        }

        if !(0.0..=70.0).contains(&route.cycle_hours) {
            result.add_error(ValidationError::new(
                "route.cycle_hours",
                "cycle_hours must be between 0 and 70",
            ));
        }
    }

    fn validate_weights(config: &Config, result: &mut ValidationResult) {
        let weights = &config.scoring.weights;
        if weights.as_array().iter().any(|w| *w < 0.0 || !w.is_finite()) {
            result.add_error(ValidationError::new(
                "scoring.weights",
                "Weights must be finite and non-negative",
            ));
        } else if weights.total() <= 0.0 {
            result.add_error(ValidationError::new(
                "scoring.weights",
                "Weights must sum to a positive value",
            ));
        }
    }

    fn validate_sites(config: &Config, result: &mut ValidationResult) {
        if config.sites.is_empty() {
            result.add_warning(ValidationWarning::new("sites", "No sites configured"));
        }

        let mut seen = HashSet::new();
        let mut stems: HashMap<String, &str> = HashMap::new();
        for (i, site) in config.sites.iter().enumerate() {
            if site.name.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("sites[{}].name", i),
                    "Site name cannot be empty",
                ));
            } else if !seen.insert(site.name.as_str()) {
                result.add_error(ValidationError::new(
                    format!("sites[{}].name", i),
                    format!("Duplicate site name '{}'", site.name),
                ));
            } else if let Some(other) = stems.get(&site.file_stem()) {
                result.add_error(ValidationError::new(
                    format!("sites[{}].name", i),
                    format!(
                        "Site name '{}' shares result file '{}' with '{}'",
                        site.name,
                        site.file_stem(),
                        other
                    ),
                ));
            } else {
                stems.insert(site.file_stem(), site.name.as_str());
            }

            match url::Url::parse(&site.url) {
                Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => {}
                _ => result.add_error(ValidationError::new(
                    format!("sites[{}].url", i),
                    "url must be an absolute http:// or https:// URL",
                )),
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
