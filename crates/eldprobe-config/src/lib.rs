//! # eldprobe Config
//!
//! Configuration management for the eldprobe evaluator: browser connection,
//! run pacing, wait budgets, the canned test route, scoring weights, logging
//! and the site list.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
