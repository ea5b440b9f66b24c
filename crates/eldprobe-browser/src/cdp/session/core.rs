//! Core PageSession struct and basic operations.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{CdpResponse, ScreenshotFormat};
use crate::cdp::rpc::RpcChannel;

use super::events::EventState;

/// Session attached to one page target.
pub struct PageSession {
    target_id: String,
    session_id: String,
    rpc: RpcChannel,
    pub(super) events: Mutex<EventState>,
}

impl std::fmt::Debug for PageSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSession")
            .field("target_id", &self.target_id)
            .field("session_id", &self.session_id)
            .finish_non_exhaustive()
    }
}

impl PageSession {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        rpc: RpcChannel,
        event_rx: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            rpc,
            events: Mutex::new(EventState::new(event_rx)),
        }
    }

    /// Target id of the page.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// CDP session id.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a command scoped to this page.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.rpc.call(method, params, Some(&self.session_id)).await
    }

    /// Send a command scoped to this page, waiting up to `timeout` for the reply.
    pub async fn call_with_timeout(
        &self,
        method: &str,
        params: Option<Value>,
        timeout: Duration,
    ) -> Result<Value, CdpError> {
        self.rpc
            .call_with_timeout(method, params, Some(&self.session_id), timeout)
            .await
    }

    /// Enable the domains whose events the session tracks.
    pub async fn enable_domains(&self) -> Result<(), CdpError> {
        for domain in ["Page", "DOM", "Runtime", "Network", "Log"] {
            self.call(&format!("{}.enable", domain), None).await?;
        }
        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Full serialized HTML of the document.
    pub async fn get_content(&self) -> Result<String, CdpError> {
        let value = self
            .evaluate("document.documentElement ? document.documentElement.outerHTML : ''")
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Visible text of the document body.
    pub async fn body_text(&self) -> Result<String, CdpError> {
        let value = self
            .evaluate("document.body ? document.body.innerText : ''")
            .await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    /// Capture a screenshot as raw image bytes.
    ///
    /// With `full_page`, the capture is clipped to the full scrollable
    /// content size rather than the viewport.
    pub async fn screenshot(
        &self,
        format: ScreenshotFormat,
        full_page: bool,
    ) -> Result<Vec<u8>, CdpError> {
        let mut params = json!({ "format": format });

        if full_page {
            let metrics = self.call("Page.getLayoutMetrics", None).await?;
            let size = &metrics["cssContentSize"];
            let width = size["width"].as_f64().unwrap_or(0.0);
            let height = size["height"].as_f64().unwrap_or(0.0);
            if width > 0.0 && height > 0.0 {
                params["captureBeyondViewport"] = json!(true);
                params["clip"] = json!({
                    "x": 0, "y": 0, "width": width, "height": height, "scale": 1
                });
            }
        }

        let result = self.call("Page.captureScreenshot", Some(params)).await?;
        let data = result["data"]
            .as_str()
            .ok_or_else(|| CdpError::InvalidResponse("captureScreenshot: no data".to_string()))?;

        BASE64
            .decode(data)
            .map_err(|e| CdpError::InvalidResponse(format!("screenshot base64: {}", e)))
    }
}
