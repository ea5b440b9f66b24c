//! Input operations for CDP page session.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{MouseButton, MouseEventType};

use super::core::PageSession;

impl PageSession {
    async fn mouse_event(
        &self,
        event: MouseEventType,
        x: f64,
        y: f64,
        button: MouseButton,
    ) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": event,
                "x": x,
                "y": y,
                "button": button,
                "clickCount": 1,
            })),
        )
        .await?;
        Ok(())
    }

    /// Left-click at viewport coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse_event(MouseEventType::MouseMoved, x, y, MouseButton::None)
            .await?;
        self.mouse_event(MouseEventType::MousePressed, x, y, MouseButton::Left)
            .await?;
        self.mouse_event(MouseEventType::MouseReleased, x, y, MouseButton::Left)
            .await
    }

    /// Type text into the focused element.
    pub async fn insert_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({ "text": text })))
            .await?;
        Ok(())
    }
}
