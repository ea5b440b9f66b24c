//! The page-driver seam between probing logic and a real browser.
//!
//! Everything the probe needs from a page goes through [`PageDriver`], so
//! checks and form filling run unchanged against Chrome or an in-memory fake.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ProbeError;

/// The `index`-th element matching a CSS selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub selector: String,
    pub index: usize,
}

impl ElementRef {
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self {
            selector: selector.into(),
            index,
        }
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.selector, self.index)
    }
}

/// A condition to wait for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitCondition {
    /// No request in flight for at least `idle`.
    NetworkIdle { idle: Duration },
    /// At least one element matches the selector.
    SelectorPresent(String),
}

/// How a bounded wait ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Satisfied,
    TimedOut,
}

impl WaitOutcome {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, WaitOutcome::Satisfied)
    }
}

/// Canned in-page measurements. Each evaluates to JSON of a fixed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageScript {
    /// Array of distinct `font-family` values used by text elements.
    FontFamilies,
    /// Number of distinct non-transparent colours in use.
    ColorPalette,
    /// Whether any text colour differs from the body background.
    TextContrast,
    /// Whether the document is wider than the viewport.
    HorizontalOverflow,
    /// Number of rendered elements that sit off-screen or are half-faded.
    VisualGlitches,
    /// Number of images that failed to decode.
    BrokenImages,
    /// `{ "total": n, "labeled": m }` over visible form controls.
    LabeledFormControls,
}

impl PageScript {
    /// JavaScript expression implementing the measurement.
    pub fn source(&self) -> &'static str {
        match self {
            PageScript::FontFamilies => {
                r#"(() => {
    const fonts = new Set();
    document.querySelectorAll('p, h1, h2, h3, span, a').forEach(el => {
        fonts.add(window.getComputedStyle(el).fontFamily);
    });
    return Array.from(fonts);
})()"#
            }
            PageScript::ColorPalette => {
                r#"(() => {
    const colors = new Set();
    const transparent = c => !c || c === 'transparent' || c === 'rgba(0, 0, 0, 0)';
    document.querySelectorAll('*').forEach(el => {
        const style = window.getComputedStyle(el);
        [style.color, style.backgroundColor, style.borderColor].forEach(c => {
            if (!transparent(c)) colors.add(c);
        });
    });
    return colors.size;
})()"#
            }
            PageScript::TextContrast => {
                r#"(() => {
    if (!document.body) return false;
    const bodyBg = window.getComputedStyle(document.body).backgroundColor;
    return Array.from(document.querySelectorAll('p, h1, h2, h3, span, a'))
        .some(el => window.getComputedStyle(el).color !== bodyBg);
})()"#
            }
            PageScript::HorizontalOverflow => {
                r#"(() => {
    const width = Math.max(
        document.documentElement ? document.documentElement.scrollWidth : 0,
        document.body ? document.body.scrollWidth : 0
    );
    return width > window.innerWidth;
})()"#
            }
            PageScript::VisualGlitches => {
                r#"(() => {
    let glitches = 0;
    const textTags = new Set(['P', 'SPAN', 'DIV', 'H1', 'H2']);
    document.querySelectorAll('*').forEach(el => {
        const rect = el.getBoundingClientRect();
        if (rect.width <= 0 || rect.height <= 0) return;
        if (rect.right < 0 || rect.bottom < 0 || rect.left > window.innerWidth || rect.top > window.innerHeight) {
            glitches++;
        }
        if (textTags.has(el.tagName)) {
            const opacity = parseFloat(window.getComputedStyle(el).opacity);
            if (opacity > 0 && opacity < 0.5) glitches++;
        }
    });
    return glitches;
})()"#
            }
            PageScript::BrokenImages => {
                r#"(() => Array.from(document.images)
    .filter(img => img.getAttribute('src') && img.complete && img.naturalWidth === 0)
    .length)()"#
            }
            PageScript::LabeledFormControls => {
                r#"(() => {
    const controls = Array.from(document.querySelectorAll('input, select, textarea'))
        .filter(el => el.type !== 'hidden');
    const labeled = controls.filter(el => {
        if (el.id && document.querySelector('label[for="' + CSS.escape(el.id) + '"]')) return true;
        if (el.closest('label')) return true;
        return el.hasAttribute('placeholder') || el.hasAttribute('aria-label') || el.hasAttribute('aria-labelledby');
    });
    return { total: controls.length, labeled: labeled.length };
})()"#
            }
        }
    }

    /// Short name used in notes and logs.
    pub fn name(&self) -> &'static str {
        match self {
            PageScript::FontFamilies => "font_families",
            PageScript::ColorPalette => "color_palette",
            PageScript::TextContrast => "text_contrast",
            PageScript::HorizontalOverflow => "horizontal_overflow",
            PageScript::VisualGlitches => "visual_glitches",
            PageScript::BrokenImages => "broken_images",
            PageScript::LabeledFormControls => "labeled_form_controls",
        }
    }
}

/// A loaded page the probe can inspect and interact with.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Number of elements matching `selector`.
    async fn count(&self, selector: &str) -> Result<usize, ProbeError>;

    /// Index of the first `selector` match whose text contains any needle
    /// (case-insensitive).
    async fn find_by_text(&self, selector: &str, needles: &[&str])
    -> Result<Option<usize>, ProbeError>;

    /// Replace the element's value with `value`.
    async fn fill(&self, element: &ElementRef, value: &str) -> Result<(), ProbeError>;

    async fn click(&self, element: &ElementRef) -> Result<(), ProbeError>;

    /// Rendered text of the body.
    async fn body_text(&self) -> Result<String, ProbeError>;

    /// Serialized document HTML.
    async fn html(&self) -> Result<String, ProbeError>;

    async fn run_script(&self, script: PageScript) -> Result<Value, ProbeError>;

    /// Emulate a `(width, height)` viewport, or restore the default with `None`.
    async fn set_viewport(&self, size: Option<(u32, u32)>) -> Result<(), ProbeError>;

    /// Reload and wait for the document to load.
    async fn reload(&self) -> Result<(), ProbeError>;

    async fn screenshot(&self, path: &Path, full_page: bool) -> Result<(), ProbeError>;

    /// Wait for `condition` for at most `timeout`.
    async fn wait_until(
        &self,
        condition: &WaitCondition,
        timeout: Duration,
    ) -> Result<WaitOutcome, ProbeError>;

    /// Console errors and uncaught exceptions seen since the page opened.
    async fn console_errors(&self) -> Result<Vec<String>, ProbeError>;

    /// Close the page.
    async fn close(&self) -> Result<(), ProbeError>;
}

/// Opens pages for sites.
#[async_trait]
pub trait PageLauncher: Send + Sync {
    /// Open `url` in a fresh page. Fails with a load-failure error
    /// ([`ProbeError::is_load_failure`]) when the site does not load within
    /// `timeout`.
    async fn open(&self, url: &str, timeout: Duration) -> Result<Box<dyn PageDriver>, ProbeError>;
}
