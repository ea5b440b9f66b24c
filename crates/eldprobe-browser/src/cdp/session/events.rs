//! Page event tracking: console errors and in-flight network requests.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::trace;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

use super::core::PageSession;

/// Accumulated state derived from a session's event stream.
pub(crate) struct EventState {
    rx: mpsc::UnboundedReceiver<CdpResponse>,
    pub(crate) console_errors: Vec<String>,
    pub(crate) inflight: HashSet<String>,
    pub(crate) last_network_activity: Instant,
}

impl EventState {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<CdpResponse>) -> Self {
        Self {
            rx,
            console_errors: Vec::new(),
            inflight: HashSet::new(),
            last_network_activity: Instant::now(),
        }
    }

    /// Drain every queued event.
    pub(crate) fn pump(&mut self) {
        while let Ok(event) = self.rx.try_recv() {
            self.apply(&event);
        }
    }

    pub(crate) fn apply(&mut self, event: &CdpResponse) {
        let Some(method) = event.method.as_deref() else {
            return;
        };
        let params = event.params.as_ref().unwrap_or(&Value::Null);

        match method {
            "Network.requestWillBeSent" => {
                if let Some(id) = params["requestId"].as_str() {
                    self.inflight.insert(id.to_string());
                    self.last_network_activity = Instant::now();
                }
            }
            "Network.loadingFinished" | "Network.loadingFailed" => {
                if let Some(id) = params["requestId"].as_str() {
                    self.inflight.remove(id);
                    self.last_network_activity = Instant::now();
                }
            }
            "Page.frameNavigated" if params["frame"]["parentId"].is_null() => {
                // Requests from the previous document never finish.
                self.inflight.clear();
            }
            _ => {
                if let Some(text) = console_error_text(method, params) {
                    trace!("console error: {}", text);
                    self.console_errors.push(text);
                }
            }
        }
    }
}

/// Extract the message of an error-level console event, if it is one.
pub(crate) fn console_error_text(method: &str, params: &Value) -> Option<String> {
    match method {
        "Runtime.consoleAPICalled" if params["type"] == "error" => {
            let parts: Vec<String> = params["args"]
                .as_array()
                .map(|args| {
                    args.iter()
                        .map(|arg| match &arg["value"] {
                            Value::String(s) => s.clone(),
                            Value::Null => arg["description"].as_str().unwrap_or_default().to_string(),
                            other => other.to_string(),
                        })
                        .collect()
                })
                .unwrap_or_default();
            Some(parts.join(" "))
        }
        "Runtime.exceptionThrown" => {
            let details = &params["exceptionDetails"];
            let text = details["exception"]["description"]
                .as_str()
                .or_else(|| details["text"].as_str())
                .unwrap_or("Uncaught exception");
            Some(text.to_string())
        }
        "Log.entryAdded" if params["entry"]["level"] == "error" => Some(
            params["entry"]["text"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
        ),
        _ => None,
    }
}

impl PageSession {
    /// Error-level console messages and uncaught exceptions seen so far.
    pub fn console_errors(&self) -> Vec<String> {
        let mut events = self.events.lock();
        events.pump();
        events.console_errors.clone()
    }

    /// Wait until no request has been in flight for `idle`.
    ///
    /// Returns `CdpError::Timeout` if that never happens within `timeout`.
    pub async fn wait_for_network_idle(
        &self,
        idle: Duration,
        timeout: Duration,
        poll: Duration,
    ) -> Result<(), CdpError> {
        let start = Instant::now();
        loop {
            let quiet = {
                let mut events = self.events.lock();
                events.pump();
                events.inflight.is_empty() && events.last_network_activity.elapsed() >= idle
            };
            if quiet {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(CdpError::Timeout("network idle".to_string()));
            }
            tokio::time::sleep(poll).await;
        }
    }
}
