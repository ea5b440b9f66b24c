//! Viewport emulation.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::DeviceMetrics;

use super::core::PageSession;

impl PageSession {
    /// Emulate a device viewport.
    pub async fn set_device_metrics(&self, metrics: DeviceMetrics) -> Result<(), CdpError> {
        self.call(
            "Emulation.setDeviceMetricsOverride",
            Some(serde_json::to_value(metrics)?),
        )
        .await?;
        self.call(
            "Emulation.setTouchEmulationEnabled",
            Some(json!({ "enabled": metrics.mobile })),
        )
        .await?;
        Ok(())
    }

    /// Drop any viewport override.
    pub async fn clear_device_metrics(&self) -> Result<(), CdpError> {
        self.call("Emulation.clearDeviceMetricsOverride", None)
            .await?;
        self.call(
            "Emulation.setTouchEmulationEnabled",
            Some(json!({ "enabled": false })),
        )
        .await?;
        Ok(())
    }
}
