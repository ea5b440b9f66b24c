//! Browser control for eldprobe.
//!
//! Drives Chrome/Chromium through the Chrome DevTools Protocol (CDP) over a
//! WebSocket. Pure Rust, no Node.js or WebDriver in between.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │    eldprobe     │ ◄──────────────► │  Chrome/Chromium │
//! │  (this crate)   │       CDP        │  (headless)      │
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! [`BrowserManager`] launches Chrome with `--remote-debugging-port` when
//! nothing is listening yet, then hands out one [`PageSession`] per site.
//! Sessions track console errors and in-flight network requests from CDP
//! events so callers can wait for conditions instead of sleeping.

pub mod cdp;
pub mod manager;

pub use cdp::{CdpClient, CdpError, DeviceMetrics, PageSession, ScreenshotFormat};
pub use manager::{BrowserError, BrowserManager, BrowserManagerConfig};
