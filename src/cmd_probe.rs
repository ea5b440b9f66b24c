//! Batch and single-site evaluation commands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use eldprobe_browser::{BrowserManager, BrowserManagerConfig};
use eldprobe_config::{BrowserConfig, Config, ConfigLoader};
use eldprobe_core::{
    BatchRunner, FileResultStore, ReportCompiler, ScoreWeights, SiteDescriptor, SiteProbe,
    TestRoute, WaitSettings, site_name_from_url,
};

use crate::adapters::CdpLauncher;

/// Screenshots live next to the result files.
const SCREENSHOT_SUBDIR: &str = "screenshots";

pub(crate) fn manager_config(browser: &BrowserConfig) -> BrowserManagerConfig {
    BrowserManagerConfig {
        debug_port: browser.debug_port,
        viewport_width: browser.viewport_width,
        viewport_height: browser.viewport_height,
        profile_dir: browser
            .profile_dir
            .as_ref()
            .map(|p| ConfigLoader::expand_path(&p.to_string_lossy()).into()),
        chrome_path: browser
            .chrome_path
            .as_ref()
            .map(|p| ConfigLoader::expand_path(&p.to_string_lossy()).into()),
        headless: browser.headless,
        ..BrowserManagerConfig::default()
    }
}

pub(crate) fn build_probe(config: &Config) -> SiteProbe {
    let probe = SiteProbe::new(
        TestRoute::from(&config.route),
        WaitSettings::from(&config.wait),
        ScoreWeights::from(&config.scoring.weights),
    );
    if config.run.screenshots {
        probe.with_screenshot_dir(config.run.results_dir.join(SCREENSHOT_SUBDIR))
    } else {
        probe
    }
}

fn build_runner(config: &Config, manager: Arc<BrowserManager>, results_dir: &Path) -> BatchRunner {
    let navigation_timeout = Duration::from_millis(config.run.navigation_timeout_ms);
    let launcher = CdpLauncher::new(
        manager,
        Duration::from_millis(config.wait.poll_interval_ms),
        navigation_timeout,
    );
    BatchRunner::new(
        Arc::new(launcher),
        Arc::new(FileResultStore::new(results_dir)),
        build_probe(config),
    )
    .with_navigation_timeout(navigation_timeout)
    .with_site_pause(Duration::from_millis(config.run.site_pause_ms))
}

async fn connect(config: &Config) -> Result<Arc<BrowserManager>, Box<dyn std::error::Error>> {
    let manager = Arc::new(BrowserManager::new(manager_config(&config.browser)));
    manager.connect().await?;
    Ok(manager)
}

async fn shutdown(manager: &BrowserManager) {
    if let Err(e) = manager.shutdown().await {
        warn!("Browser shutdown failed: {}", e);
    }
}

/// Evaluate every configured site and compile reports.
pub(crate) async fn handle_batch(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let results_dir = &config.run.results_dir;
    tokio::fs::create_dir_all(results_dir).await?;

    let sites: Vec<SiteDescriptor> = config.sites.iter().map(SiteDescriptor::from).collect();
    info!(
        "Evaluating {} sites, results in {}",
        sites.len(),
        results_dir.display()
    );

    let manager = connect(config).await?;
    let runner = build_runner(config, manager.clone(), results_dir)
        .with_reports(ReportCompiler::new(results_dir));
    let record = runner.run(&sites).await;
    shutdown(&manager).await;

    println!(
        "Evaluated {} sites in {:.1}s: {} successful, {} failed",
        record.total_websites,
        record.total_duration,
        record.successful_evaluations,
        record.failed_evaluations
    );
    Ok(())
}

/// Evaluate one URL and print its scores.
pub(crate) async fn handle_single(
    config: &Config,
    url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let results_dir = &config.run.results_dir;
    tokio::fs::create_dir_all(results_dir).await?;

    let site = SiteDescriptor::new(site_name_from_url(url), url);
    let manager = connect(config).await?;
    let runner = build_runner(config, manager.clone(), results_dir);
    let result = runner.evaluate_site(&site).await;
    shutdown(&manager).await;

    println!("{} ({})", result.website, result.url);
    println!("Status: {}", result.status);
    if result.is_complete() {
        let s = &result.scores;
        println!("Final Score: {:.1}/10", result.final_score);
        println!(
            "UI: {}/10 | UX: {}/10 | Bugs: {}/10 | Features: {}/10 | ELD: {}/10",
            s.ui_aesthetics, s.ux_intuitiveness, s.bugs, s.required_features, s.eld_accuracy
        );
    } else {
        println!("Error: {}", result.error_note());
    }
    for note in &result.notes {
        println!("  - {}", note);
    }
    Ok(())
}
