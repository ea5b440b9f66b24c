//! Browser instance manager.
//!
//! Connects to a Chrome already listening on the debug port, or launches a
//! headless one with its own profile, and opens one page per evaluated site.

mod manager_core;
mod manager_pages;
mod manager_types;

pub use manager_core::BrowserManager;
pub use manager_types::{BrowserError, BrowserManagerConfig};

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
