//! Probe error types.

use thiserror::Error;

/// Errors raised while probing, persisting or reporting.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The site could not be loaded (DNS, refused connection, TLS).
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A bounded operation did not finish in time.
    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// A page script threw or returned an unexpected shape.
    #[error("Script error: {0}")]
    Script(String),

    /// Any other browser-side failure.
    #[error("Browser error: {0}")]
    Browser(String),

    /// The page or browser connection went away.
    #[error("Page session closed")]
    SessionClosed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProbeError {
    /// Whether opening the site failed before any probing could start.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, ProbeError::Navigation(_) | ProbeError::Timeout(_))
    }

    /// Whether the page is gone and probing cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProbeError::SessionClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failure_classification() {
        assert!(ProbeError::Navigation("net::ERR_NAME_NOT_RESOLVED".into()).is_load_failure());
        assert!(ProbeError::Timeout("navigation".into()).is_load_failure());
        assert!(!ProbeError::Script("boom".into()).is_load_failure());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(ProbeError::SessionClosed.is_fatal());
        assert!(!ProbeError::ElementNotFound("button".into()).is_fatal());
    }

    #[test]
    fn test_display() {
        let err = ProbeError::Script("ReferenceError".to_string());
        assert_eq!(err.to_string(), "Script error: ReferenceError");
    }
}
