//! Browser, run pacing, wait budget and logging configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Chrome connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Chrome remote debugging port.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    /// Launch Chrome with `--headless=new` when eldprobe starts it.
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Desktop viewport width.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Desktop viewport height.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Chrome profile directory. Defaults to `~/.eldprobe/browser-profile`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,

    /// Explicit Chrome executable. Auto-detected when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            debug_port: default_debug_port(),
            headless: default_headless(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            profile_dir: None,
            chrome_path: None,
        }
    }
}

fn default_debug_port() -> u16 {
    9222
}

fn default_headless() -> bool {
    true
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

/// Batch run settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Directory for result JSON, screenshots and reports.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,

    /// Pause between two sites.
    #[serde(default = "default_site_pause_ms")]
    pub site_pause_ms: u64,

    /// Upper bound for opening a site and waiting for its document.
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Capture screenshots at the initial, results and mobile checkpoints.
    #[serde(default = "default_screenshots")]
    pub screenshots: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            site_pause_ms: default_site_pause_ms(),
            navigation_timeout_ms: default_navigation_timeout_ms(),
            screenshots: default_screenshots(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_site_pause_ms() -> u64 {
    2000
}

fn default_navigation_timeout_ms() -> u64 {
    60_000
}

fn default_screenshots() -> bool {
    true
}

/// Budgets for condition-based waits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// How long to wait for the page to settle after load or submit.
    #[serde(default = "default_settle_timeout_ms")]
    pub settle_timeout_ms: u64,

    /// Quiet period without in-flight requests that counts as network idle.
    #[serde(default = "default_network_idle_ms")]
    pub network_idle_ms: u64,

    /// How long to wait for result content after submitting the form.
    #[serde(default = "default_results_timeout_ms")]
    pub results_timeout_ms: u64,

    /// Polling interval for condition checks.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            settle_timeout_ms: default_settle_timeout_ms(),
            network_idle_ms: default_network_idle_ms(),
            results_timeout_ms: default_results_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

fn default_settle_timeout_ms() -> u64 {
    10_000
}

fn default_network_idle_ms() -> u64 {
    500
}

fn default_results_timeout_ms() -> u64 {
    8_000
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for rolling log files. Defaults to `~/.eldprobe/logs`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    /// Resolve the log directory.
    pub fn log_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(&dir.to_string_lossy()).as_ref()),
            None => eldprobe_home().join("logs"),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// The `~/.eldprobe` directory.
pub fn eldprobe_home() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".eldprobe"))
        .unwrap_or_else(|| PathBuf::from(".eldprobe"))
}
