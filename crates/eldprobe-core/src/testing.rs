//! In-memory [`PageDriver`] for tests.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::driver::{ElementRef, PageDriver, PageLauncher, PageScript, WaitCondition, WaitOutcome};
use crate::error::ProbeError;

#[derive(Default)]
struct FakeState {
    counts: HashMap<String, usize>,
    texts: HashMap<String, Vec<String>>,
    body_text: String,
    html: String,
    scripts: HashMap<PageScript, Value>,
    overflow_at: HashSet<(u32, u32)>,
    console_errors: Vec<String>,
    failing_selectors: HashSet<String>,
    failing_scripts: HashSet<PageScript>,
    closed: bool,
    network_idle: Option<WaitOutcome>,
    after_click_body: Option<String>,
    after_click_counts: HashMap<String, usize>,

    fills: Vec<(ElementRef, String)>,
    clicks: Vec<ElementRef>,
    viewport: Option<(u32, u32)>,
    viewports: Vec<Option<(u32, u32)>>,
    reloads: usize,
    screenshots: Vec<PathBuf>,
    close_calls: usize,
}

/// Scriptable fake page. Builders configure what the page "contains";
/// accessors report what the probe did to it.
#[derive(Default)]
pub struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_count(mut self, selector: &str, n: usize) -> Self {
        self.state.get_mut().counts.insert(selector.to_string(), n);
        self
    }

    /// Texts of the `button` elements, in document order.
    pub fn with_buttons(mut self, texts: &[&str]) -> Self {
        self.state.get_mut().texts.insert(
            "button".to_string(),
            texts.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    pub fn with_body_text(mut self, text: &str) -> Self {
        self.state.get_mut().body_text = text.to_string();
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.state.get_mut().html = html.to_string();
        self
    }

    pub fn with_script(mut self, script: PageScript, value: Value) -> Self {
        self.state.get_mut().scripts.insert(script, value);
        self
    }

    /// Report horizontal overflow while the viewport is `size`.
    pub fn with_overflow_at(mut self, size: (u32, u32)) -> Self {
        self.state.get_mut().overflow_at.insert(size);
        self
    }

    pub fn with_console_errors(mut self, errors: &[&str]) -> Self {
        self.state.get_mut().console_errors = errors.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn with_failing_selector(mut self, selector: &str) -> Self {
        self.state
            .get_mut()
            .failing_selectors
            .insert(selector.to_string());
        self
    }

    pub fn with_failing_script(mut self, script: PageScript) -> Self {
        self.state.get_mut().failing_scripts.insert(script);
        self
    }

    pub fn with_network_idle(mut self, outcome: WaitOutcome) -> Self {
        self.state.get_mut().network_idle = Some(outcome);
        self
    }

    /// Body text shown after any click.
    pub fn with_after_click_body(mut self, text: &str) -> Self {
        self.state.get_mut().after_click_body = Some(text.to_string());
        self
    }

    /// Element counts that change after any click.
    pub fn with_after_click_count(mut self, selector: &str, n: usize) -> Self {
        self.state
            .get_mut()
            .after_click_counts
            .insert(selector.to_string(), n);
        self
    }

    /// Every operation fails as if the tab had been closed.
    pub fn closed(mut self) -> Self {
        self.state.get_mut().closed = true;
        self
    }

    pub fn fills(&self) -> Vec<(ElementRef, String)> {
        self.state.lock().fills.clone()
    }

    pub fn clicks(&self) -> Vec<ElementRef> {
        self.state.lock().clicks.clone()
    }

    pub fn viewports(&self) -> Vec<Option<(u32, u32)>> {
        self.state.lock().viewports.clone()
    }

    pub fn reloads(&self) -> usize {
        self.state.lock().reloads
    }

    pub fn screenshots(&self) -> Vec<PathBuf> {
        self.state.lock().screenshots.clone()
    }

    pub fn close_calls(&self) -> usize {
        self.state.lock().close_calls
    }

    fn guard(&self) -> Result<parking_lot::MutexGuard<'_, FakeState>, ProbeError> {
        let state = self.state.lock();
        if state.closed {
            return Err(ProbeError::SessionClosed);
        }
        Ok(state)
    }

    fn check_selector(state: &FakeState, selector: &str) -> Result<(), ProbeError> {
        if state.failing_selectors.contains(selector) {
            return Err(ProbeError::Script(format!(
                "SyntaxError: '{}' is not a valid selector",
                selector
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn count(&self, selector: &str) -> Result<usize, ProbeError> {
        let state = self.guard()?;
        Self::check_selector(&state, selector)?;
        Ok(state.counts.get(selector).copied().unwrap_or(0))
    }

    async fn find_by_text(
        &self,
        selector: &str,
        needles: &[&str],
    ) -> Result<Option<usize>, ProbeError> {
        let state = self.guard()?;
        Self::check_selector(&state, selector)?;
        let Some(texts) = state.texts.get(selector) else {
            return Ok(None);
        };
        let needles: Vec<String> = needles.iter().map(|n| n.to_lowercase()).collect();
        Ok(texts.iter().position(|text| {
            let text = text.to_lowercase();
            needles.iter().any(|n| text.contains(n.as_str()))
        }))
    }

    async fn fill(&self, element: &ElementRef, value: &str) -> Result<(), ProbeError> {
        let mut state = self.guard()?;
        Self::check_selector(&state, &element.selector)?;
        state.fills.push((element.clone(), value.to_string()));
        Ok(())
    }

    async fn click(&self, element: &ElementRef) -> Result<(), ProbeError> {
        let mut state = self.guard()?;
        Self::check_selector(&state, &element.selector)?;
        state.clicks.push(element.clone());
        if let Some(body) = state.after_click_body.clone() {
            state.body_text = body;
        }
        let changed: Vec<(String, usize)> = state
            .after_click_counts
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        state.counts.extend(changed);
        Ok(())
    }

    async fn body_text(&self) -> Result<String, ProbeError> {
        Ok(self.guard()?.body_text.clone())
    }

    async fn html(&self) -> Result<String, ProbeError> {
        Ok(self.guard()?.html.clone())
    }

    async fn run_script(&self, script: PageScript) -> Result<Value, ProbeError> {
        let state = self.guard()?;
        if state.failing_scripts.contains(&script) {
            return Err(ProbeError::Script(format!("{} threw", script.name())));
        }
        if script == PageScript::HorizontalOverflow {
            let overflow = state
                .viewport
                .map(|size| state.overflow_at.contains(&size))
                .unwrap_or(false);
            return Ok(json!(overflow));
        }
        Ok(state.scripts.get(&script).cloned().unwrap_or(Value::Null))
    }

    async fn set_viewport(&self, size: Option<(u32, u32)>) -> Result<(), ProbeError> {
        let mut state = self.guard()?;
        state.viewport = size;
        state.viewports.push(size);
        Ok(())
    }

    async fn reload(&self) -> Result<(), ProbeError> {
        self.guard()?.reloads += 1;
        Ok(())
    }

    async fn screenshot(&self, path: &Path, _full_page: bool) -> Result<(), ProbeError> {
        self.guard()?.screenshots.push(path.to_path_buf());
        Ok(())
    }

    async fn wait_until(
        &self,
        condition: &WaitCondition,
        _timeout: Duration,
    ) -> Result<WaitOutcome, ProbeError> {
        let state = self.guard()?;
        Ok(match condition {
            WaitCondition::NetworkIdle { .. } => {
                state.network_idle.unwrap_or(WaitOutcome::Satisfied)
            }
            WaitCondition::SelectorPresent(selector) => {
                if state.counts.get(selector).copied().unwrap_or(0) > 0 {
                    WaitOutcome::Satisfied
                } else {
                    WaitOutcome::TimedOut
                }
            }
        })
    }

    async fn console_errors(&self) -> Result<Vec<String>, ProbeError> {
        Ok(self.guard()?.console_errors.clone())
    }

    async fn close(&self) -> Result<(), ProbeError> {
        self.state.lock().close_calls += 1;
        Ok(())
    }
}

/// Launcher handing out fake pages by URL. Unknown URLs fail to load.
#[derive(Default)]
pub struct FakeLauncher {
    pages: Mutex<HashMap<String, FakePage>>,
    errors: Mutex<HashMap<String, String>>,
    opened: Mutex<Vec<String>>,
}

impl FakeLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, page: FakePage) -> Self {
        self.pages.lock().insert(url.to_string(), page);
        self
    }

    /// Opening `url` fails with a non-load error.
    pub fn with_open_error(self, url: &str, message: &str) -> Self {
        self.errors
            .lock()
            .insert(url.to_string(), message.to_string());
        self
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().clone()
    }
}

#[async_trait]
impl PageLauncher for FakeLauncher {
    async fn open(&self, url: &str, _timeout: Duration) -> Result<Box<dyn PageDriver>, ProbeError> {
        self.opened.lock().push(url.to_string());
        if let Some(message) = self.errors.lock().get(url) {
            return Err(ProbeError::Browser(message.clone()));
        }
        match self.pages.lock().remove(url) {
            Some(page) => Ok(Box::new(page)),
            None => Err(ProbeError::Navigation(format!(
                "{}: net::ERR_NAME_NOT_RESOLVED",
                url
            ))),
        }
    }
}
