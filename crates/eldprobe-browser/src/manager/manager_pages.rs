//! Page lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{BrowserError, BrowserManager};
use crate::cdp::{CdpError, DeviceMetrics, PageSession};

impl BrowserManager {
    /// Open a fresh tab at the configured viewport and navigate it to `url`.
    ///
    /// The tab is closed again when navigation fails, so the caller only
    /// owns pages that actually loaded.
    pub async fn open_page(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<Arc<PageSession>, BrowserError> {
        let client = self.client().await?;
        let session = client.new_page().await?;

        let loaded: Result<String, CdpError> = async {
            session
                .set_device_metrics(DeviceMetrics::desktop(
                    self.config.viewport_width,
                    self.config.viewport_height,
                ))
                .await?;
            session.navigate(url, timeout).await
        }
        .await;

        match loaded {
            Ok(frame) => {
                debug!("Opened {} (frame {})", url, frame);
                Ok(Arc::new(session))
            }
            Err(e) => {
                if let Err(close_err) = client.close_page(&session).await {
                    warn!("Failed to close tab after load failure: {}", close_err);
                }
                Err(e.into())
            }
        }
    }

    /// Close a tab opened by [`open_page`](BrowserManager::open_page).
    pub async fn close_page(&self, session: &PageSession) -> Result<(), BrowserError> {
        let client = self.client().await?;
        client.close_page(session).await?;
        Ok(())
    }
}
