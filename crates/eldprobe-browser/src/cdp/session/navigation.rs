//! Navigation operations for CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;

use super::core::PageSession;

const LOAD_POLL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to `url` and wait for the document to finish loading.
    ///
    /// Network-level failures (DNS, refused connection, TLS) come back as
    /// `NavigationFailed`; a load that never completes as `Timeout`.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<String, CdpError> {
        let start = Instant::now();
        let result = self
            .call_with_timeout("Page.navigate", Some(json!({ "url": url })), timeout)
            .await
            .map_err(|e| match e {
                CdpError::Timeout(_) => CdpError::Timeout(format!("navigation to {}", url)),
                other => other,
            })?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load(timeout.saturating_sub(start.elapsed())).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll `document.readyState` until it reports `complete`.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            // The execution context is torn down mid-navigation; keep polling.
            match self.evaluate("document.readyState").await {
                Ok(state) if state.as_str() == Some("complete") => return Ok(()),
                Ok(_) | Err(CdpError::JavaScript(_)) | Err(CdpError::Protocol { .. }) => {}
                Err(e) => return Err(e),
            }

            if start.elapsed() >= timeout {
                return Err(CdpError::Timeout("page load".to_string()));
            }

            tokio::time::sleep(LOAD_POLL).await;
        }
    }

    /// Reload page.
    pub async fn reload(&self, timeout: Duration) -> Result<(), CdpError> {
        self.call_with_timeout("Page.reload", None, timeout).await?;
        self.wait_for_load(timeout).await
    }

    /// Wait until `selector` matches at least one element.
    pub async fn wait_for_selector(
        &self,
        selector: &str,
        timeout: Duration,
        poll: Duration,
    ) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            if self.count_selector(selector).await? > 0 {
                return Ok(());
            }

            if start.elapsed() >= timeout {
                return Err(CdpError::Timeout(format!("selector {}", selector)));
            }

            tokio::time::sleep(poll).await;
        }
    }
}
