//! Chrome-backed implementations of the core page seams.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use eldprobe_browser::{
    BrowserError, BrowserManager, CdpError, DeviceMetrics, PageSession, ScreenshotFormat,
};
use eldprobe_core::{ElementRef, PageDriver, PageLauncher, PageScript, ProbeError, WaitCondition, WaitOutcome};

/// Map a page-level CDP error onto the probe taxonomy.
pub(crate) fn probe_error(e: CdpError) -> ProbeError {
    match e {
        CdpError::SessionClosed | CdpError::WebSocket(_) => ProbeError::SessionClosed,
        CdpError::Timeout(msg) => ProbeError::Timeout(msg),
        CdpError::NavigationFailed(msg) => ProbeError::Navigation(msg),
        CdpError::ElementNotFound(msg) => ProbeError::ElementNotFound(msg),
        CdpError::JavaScript(msg) => ProbeError::Script(msg),
        other => ProbeError::Browser(other.to_string()),
    }
}

/// Map a manager error raised while opening a site.
pub(crate) fn launch_error(e: BrowserError) -> ProbeError {
    match e {
        BrowserError::NavigationFailed(msg) => ProbeError::Navigation(msg),
        BrowserError::Timeout(msg) => ProbeError::Timeout(msg),
        BrowserError::ElementNotFound(msg) => ProbeError::ElementNotFound(msg),
        other => ProbeError::Browser(other.to_string()),
    }
}

/// One Chrome tab driven over CDP.
pub(crate) struct CdpPage {
    session: Arc<PageSession>,
    manager: Arc<BrowserManager>,
    viewport: (u32, u32),
    poll: Duration,
    reload_timeout: Duration,
}

#[async_trait]
impl PageDriver for CdpPage {
    async fn count(&self, selector: &str) -> Result<usize, ProbeError> {
        self.session.count_selector(selector).await.map_err(probe_error)
    }

    async fn find_by_text(
        &self,
        selector: &str,
        needles: &[&str],
    ) -> Result<Option<usize>, ProbeError> {
        self.session
            .find_by_text(selector, needles)
            .await
            .map_err(probe_error)
    }

    async fn fill(&self, element: &ElementRef, value: &str) -> Result<(), ProbeError> {
        self.session
            .fill_nth(&element.selector, element.index, value)
            .await
            .map_err(probe_error)
    }

    async fn click(&self, element: &ElementRef) -> Result<(), ProbeError> {
        self.session
            .click_nth(&element.selector, element.index)
            .await
            .map_err(probe_error)
    }

    async fn body_text(&self) -> Result<String, ProbeError> {
        self.session.body_text().await.map_err(probe_error)
    }

    async fn html(&self) -> Result<String, ProbeError> {
        self.session.get_content().await.map_err(probe_error)
    }

    async fn run_script(&self, script: PageScript) -> Result<Value, ProbeError> {
        debug!("Running page script {}", script.name());
        self.session
            .evaluate(script.source())
            .await
            .map_err(probe_error)
    }

    async fn set_viewport(&self, size: Option<(u32, u32)>) -> Result<(), ProbeError> {
        let metrics = match size {
            Some((width, height)) => DeviceMetrics::handheld(width, height),
            None => DeviceMetrics::desktop(self.viewport.0, self.viewport.1),
        };
        self.session
            .set_device_metrics(metrics)
            .await
            .map_err(probe_error)
    }

    async fn reload(&self) -> Result<(), ProbeError> {
        self.session
            .reload(self.reload_timeout)
            .await
            .map_err(probe_error)
    }

    async fn screenshot(&self, path: &Path, full_page: bool) -> Result<(), ProbeError> {
        let bytes = self
            .session
            .screenshot(ScreenshotFormat::Png, full_page)
            .await
            .map_err(probe_error)?;
        tokio::fs::write(path, bytes).await?;
        Ok(())
    }

    async fn wait_until(
        &self,
        condition: &WaitCondition,
        timeout: Duration,
    ) -> Result<WaitOutcome, ProbeError> {
        let waited = match condition {
            WaitCondition::NetworkIdle { idle } => {
                self.session
                    .wait_for_network_idle(*idle, timeout, self.poll)
                    .await
            }
            WaitCondition::SelectorPresent(selector) => {
                self.session
                    .wait_for_selector(selector, timeout, self.poll)
                    .await
            }
        };
        match waited {
            Ok(()) => Ok(WaitOutcome::Satisfied),
            Err(e) if e.is_timeout() => Ok(WaitOutcome::TimedOut),
            Err(e) => Err(probe_error(e)),
        }
    }

    async fn console_errors(&self) -> Result<Vec<String>, ProbeError> {
        Ok(self.session.console_errors())
    }

    async fn close(&self) -> Result<(), ProbeError> {
        self.manager
            .close_page(&self.session)
            .await
            .map_err(|e| ProbeError::Browser(e.to_string()))
    }
}

/// Opens each site in a fresh tab of the shared browser.
pub(crate) struct CdpLauncher {
    manager: Arc<BrowserManager>,
    poll: Duration,
    reload_timeout: Duration,
}

impl CdpLauncher {
    pub(crate) fn new(manager: Arc<BrowserManager>, poll: Duration, reload_timeout: Duration) -> Self {
        Self {
            manager,
            poll,
            reload_timeout,
        }
    }
}

#[async_trait]
impl PageLauncher for CdpLauncher {
    async fn open(&self, url: &str, timeout: Duration) -> Result<Box<dyn PageDriver>, ProbeError> {
        let session = self
            .manager
            .open_page(url, timeout)
            .await
            .map_err(launch_error)?;
        let config = self.manager.config();
        Ok(Box::new(CdpPage {
            session,
            manager: self.manager.clone(),
            viewport: (config.viewport_width, config.viewport_height),
            poll: self.poll,
            reload_timeout: self.reload_timeout,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lost_session_is_fatal() {
        assert!(probe_error(CdpError::SessionClosed).is_fatal());
        assert!(probe_error(CdpError::WebSocket("reset".into())).is_fatal());
        assert!(!probe_error(CdpError::JavaScript("boom".into())).is_fatal());
    }

    #[test]
    fn test_page_error_mapping() {
        assert!(matches!(
            probe_error(CdpError::Timeout("selector".into())),
            ProbeError::Timeout(_)
        ));
        assert!(matches!(
            probe_error(CdpError::JavaScript("ReferenceError".into())),
            ProbeError::Script(_)
        ));
        assert!(matches!(
            probe_error(CdpError::Protocol {
                code: -32000,
                message: "No node".into()
            }),
            ProbeError::Browser(_)
        ));
    }

    #[test]
    fn test_launch_errors_classified_as_load_failures() {
        assert!(launch_error(BrowserError::NavigationFailed("net::ERR_NAME_NOT_RESOLVED".into()))
            .is_load_failure());
        assert!(launch_error(BrowserError::Timeout("navigation".into())).is_load_failure());
        assert!(!launch_error(BrowserError::NotConnected).is_load_failure());
        assert!(!launch_error(BrowserError::LaunchFailed("no chrome".into())).is_load_failure());
    }
}
