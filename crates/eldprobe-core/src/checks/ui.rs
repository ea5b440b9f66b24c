//! UI aesthetics checks.

use async_trait::async_trait;

use super::common::SelectorPresence;
use super::{Check, CheckContext, CheckPhase, script_count, script_flag, unexpected};
use crate::driver::{PageDriver, PageScript};
use crate::error::ProbeError;
use crate::model::{Category, CheckOutcome};

/// Logo, header, footer and navigation landmarks.
const LAYOUT_SELECTORS: [&str; 4] = [
    "[class*=\"logo\" i], [id*=\"logo\" i], img[alt*=\"logo\" i]",
    "header",
    "footer",
    "nav",
];

/// Viewports probed for horizontal overflow: a phone and a tablet.
pub const RESPONSIVE_VIEWPORTS: [(u32, u32); 2] = [(375, 667), (768, 1024)];

/// Layout landmarks present, one point each up to two.
pub struct LayoutElements;

#[async_trait]
impl Check for LayoutElements {
    fn name(&self) -> &'static str {
        "layout_elements"
    }

    fn category(&self) -> Category {
        Category::UiAesthetics
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Initial
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let mut present = 0u8;
        for selector in LAYOUT_SELECTORS {
            if ctx.page.count(selector).await? > 0 {
                present += 1;
            }
        }
        let outcome = CheckOutcome::new(self.name(), self.category()).with_points(present.min(2));
        Ok(if present > 0 {
            outcome.with_note(format!(
                "Professional layout elements: {}/{}",
                present,
                LAYOUT_SELECTORS.len()
            ))
        } else {
            outcome.with_note("No header, footer, logo or navigation landmarks")
        })
    }
}

/// Some text is coloured differently from the page background.
pub struct TextContrast;

#[async_trait]
impl Check for TextContrast {
    fn name(&self) -> &'static str {
        "text_contrast"
    }

    fn category(&self) -> Category {
        Category::UiAesthetics
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Initial
    }

    fn max_points(&self) -> u8 {
        1
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let outcome = CheckOutcome::new(self.name(), self.category());
        Ok(if script_flag(ctx.page, PageScript::TextContrast).await? {
            outcome.with_points(1)
        } else {
            outcome.with_note("Text colour matches the background")
        })
    }
}

/// At most three font families across text elements.
pub struct FontConsistency;

#[async_trait]
impl Check for FontConsistency {
    fn name(&self) -> &'static str {
        "font_consistency"
    }

    fn category(&self) -> Category {
        Category::UiAesthetics
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Initial
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let value = ctx.page.run_script(PageScript::FontFamilies).await?;
        let families = value
            .as_array()
            .ok_or_else(|| unexpected(PageScript::FontFamilies, &value))?
            .len();
        let outcome = CheckOutcome::new(self.name(), self.category());

        Ok(match families {
            0 => outcome.with_note("No text elements to measure fonts on"),
            1..=3 => outcome
                .with_points(2)
                .with_note(format!("Consistent typography ({} font families)", families)),
            n => outcome.with_note(format!("Inconsistent typography ({} font families)", n)),
        })
    }
}

/// A palette of three to ten colours.
pub struct ColorPalette;

#[async_trait]
impl Check for ColorPalette {
    fn name(&self) -> &'static str {
        "color_palette"
    }

    fn category(&self) -> Category {
        Category::UiAesthetics
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Initial
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let colors = script_count(ctx.page, PageScript::ColorPalette).await?;
        let outcome = CheckOutcome::new(self.name(), self.category());

        Ok(match colors {
            3..=10 => outcome.with_points(2),
            0..=2 => outcome.with_note(format!("Very limited colour palette ({} colours)", colors)),
            _ => outcome
                .with_points(1)
                .with_note(format!("Busy colour palette ({} colours)", colors)),
        })
    }
}

/// Viewports from [`RESPONSIVE_VIEWPORTS`] at which the page overflows
/// horizontally.
async fn overflowing_viewports(page: &dyn PageDriver) -> Result<Vec<(u32, u32)>, ProbeError> {
    let mut overflowing = Vec::new();
    for size in RESPONSIVE_VIEWPORTS {
        page.set_viewport(Some(size)).await?;
        if script_flag(page, PageScript::HorizontalOverflow).await? {
            overflowing.push(size);
        }
    }
    Ok(overflowing)
}

/// No horizontal overflow at phone and tablet widths. The default viewport
/// is restored afterwards, also on failure.
pub struct Responsive;

#[async_trait]
impl Check for Responsive {
    fn name(&self) -> &'static str {
        "responsive"
    }

    fn category(&self) -> Category {
        Category::UiAesthetics
    }

    fn phase(&self) -> CheckPhase {
        CheckPhase::Interactive
    }

    fn max_points(&self) -> u8 {
        2
    }

    async fn run(&self, ctx: &CheckContext<'_>) -> Result<CheckOutcome, ProbeError> {
        let measured = overflowing_viewports(ctx.page).await;
        let restored = ctx.page.set_viewport(None).await;
        let overflowing = measured?;
        restored?;

        let fitting = RESPONSIVE_VIEWPORTS.len() - overflowing.len();
        let mut outcome =
            CheckOutcome::new(self.name(), self.category()).with_points(fitting as u8);
        for (width, height) in overflowing {
            outcome = outcome.with_note(format!("Horizontal overflow at {}x{}", width, height));
        }
        Ok(outcome)
    }
}

pub(super) fn checks() -> Vec<Box<dyn Check>> {
    vec![
        Box::new(LayoutElements),
        Box::new(SelectorPresence {
            name: "headings",
            category: Category::UiAesthetics,
            phase: CheckPhase::Initial,
            selector: "h1, h2, h3",
            points: 1,
            found: "Clear headings present",
            missing: "No headings found",
        }),
        Box::new(TextContrast),
        Box::new(FontConsistency),
        Box::new(ColorPalette),
        Box::new(Responsive),
    ]
}
