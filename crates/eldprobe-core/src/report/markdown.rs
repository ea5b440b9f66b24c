//! Markdown reports: the ranked evaluation report and the top-3 analysis.

use std::fmt::Write;

use super::{BatchSummary, RankedSite};
use crate::model::Category;

/// Scores at or above this are strengths.
const STRENGTH_THRESHOLD: u8 = 8;
/// Scores at or below this are weaknesses.
const WEAKNESS_THRESHOLD: u8 = 6;

/// Category order used in the markdown tables.
const TABLE_ORDER: [Category; 5] = [
    Category::EldAccuracy,
    Category::RequiredFeatures,
    Category::UiAesthetics,
    Category::UxIntuitiveness,
    Category::Bugs,
];

fn strength(category: Category) -> &'static str {
    match category {
        Category::EldAccuracy => "Excellent ELD log accuracy and representation",
        Category::RequiredFeatures => "Complete implementation of required features",
        Category::UiAesthetics => "Outstanding UI design and visual appeal",
        Category::UxIntuitiveness => "Highly intuitive user experience",
        Category::Bugs => "Very few bugs or technical issues",
    }
}

fn weakness(category: Category) -> &'static str {
    match category {
        Category::EldAccuracy => "ELD log accuracy needs improvement",
        Category::RequiredFeatures => "Missing some required features",
        Category::UiAesthetics => "UI design could be more polished",
        Category::UxIntuitiveness => "User experience could be more intuitive",
        Category::Bugs => "Contains noticeable bugs or technical issues",
    }
}

fn improvement(category: Category) -> &'static str {
    match category {
        Category::EldAccuracy => {
            "Enhance ELD log visualization to better represent Hours of Service regulations"
        }
        Category::RequiredFeatures => {
            "Complete all required features, especially route visualization and daily log sheets"
        }
        Category::UiAesthetics => {
            "Refine the UI with consistent styling, a coherent colour scheme and professional visual elements"
        }
        Category::UxIntuitiveness => {
            "Improve the experience with clearer navigation, form validation and helpful guidance"
        }
        Category::Bugs => "Fix the detected errors and test the application for stability",
    }
}

/// One-clause commentary on a category score.
fn commentary(category: Category, score: u8) -> &'static str {
    let band = match score {
        9..=10 => 0,
        7..=8 => 1,
        5..=6 => 2,
        3..=4 => 3,
        _ => 4,
    };
    let lines: [&str; 5] = match category {
        Category::EldAccuracy => [
            "is exceptional, with clear duty statuses and HOS details",
            "is very good, showing most HOS information and status changes",
            "is adequate but lacks some HOS details",
            "needs significant improvement",
            "is largely missing",
        ],
        Category::RequiredFeatures => [
            "are completely implemented",
            "are mostly complete with minor omissions",
            "cover the basics but miss important elements",
            "are only partially implemented",
            "are largely incomplete",
        ],
        Category::UiAesthetics => [
            "is professionally designed",
            "looks polished and consistent",
            "is reasonable but could use refinement",
            "has noticeable design issues",
            "has a poor visual design",
        ],
        Category::UxIntuitiveness => [
            "highly intuitive",
            "mostly intuitive",
            "acceptable but sometimes confusing",
            "frequently confusing",
            "hard to follow",
        ],
        Category::Bugs => [
            "runs without observable errors",
            "is stable with minor issues",
            "shows some errors",
            "shows numerous errors",
            "is unstable",
        ],
    };
    lines[band]
}

pub(super) fn strengths(site: &RankedSite) -> Vec<&'static str> {
    let mut out: Vec<&str> = TABLE_ORDER
        .iter()
        .filter(|c| site.scores.get(**c) >= STRENGTH_THRESHOLD)
        .map(|c| strength(*c))
        .collect();
    if out.len() < 2 {
        if site.final_score >= 7.0 {
            out.push("Good overall implementation of requirements");
        }
        out.push("Functional core features");
    }
    out
}

pub(super) fn weaknesses(site: &RankedSite) -> Vec<&'static str> {
    let mut out: Vec<&str> = TABLE_ORDER
        .iter()
        .filter(|c| site.scores.get(**c) <= WEAKNESS_THRESHOLD)
        .map(|c| weakness(*c))
        .collect();
    if out.len() < 2 {
        out.push("Could benefit from additional optimization");
        out.push("Further refinement needed for production readiness");
    }
    out
}

pub(super) fn improvements(site: &RankedSite) -> Vec<&'static str> {
    let mut out: Vec<&str> = TABLE_ORDER
        .iter()
        .filter(|c| site.scores.get(**c) < 10)
        .map(|c| improvement(*c))
        .collect();
    out.push("Collect user feedback to guide future improvements");
    out.push("Add features like trip history, driver profiles or weather integration");
    out
}

fn bullet_list(out: &mut String, items: &[impl AsRef<str>]) {
    for item in items {
        let _ = writeln!(out, "- {}", item.as_ref());
    }
}

fn ranking_table(out: &mut String, summary: &BatchSummary) {
    out.push_str(
        "| Rank | Website | Overall Score | ELD Accuracy | Required Features | UI Aesthetics | UX Intuitiveness | Bugs |\n",
    );
    out.push_str(
        "|------|---------|---------------|--------------|-------------------|---------------|------------------|------|\n",
    );
    for site in &summary.ranking {
        let _ = write!(
            out,
            "| {} | [{}]({}) | {:.1} |",
            site.rank, site.name, site.url, site.final_score
        );
        for category in TABLE_ORDER {
            let _ = write!(out, " {} |", site.scores.get(category));
        }
        out.push('\n');
    }
}

/// `evaluation_report.md`: ranking table, top-3 review and methodology.
pub fn render_evaluation_report(summary: &BatchSummary) -> String {
    let mut out = String::from("# ELD Trip Planner Evaluation Report\n\n");
    let _ = writeln!(
        out,
        "Evaluation Date: {}\n",
        summary.generated_at.format("%Y-%m-%d")
    );

    out.push_str("## Overall Rankings\n\n");
    ranking_table(&mut out, summary);

    let _ = writeln!(out, "\n## Top {} Websites Detailed Review\n", summary.top().len());
    for site in summary.top() {
        let _ = writeln!(out, "### {}. {}\n", site.rank, site.name);
        let _ = writeln!(out, "URL: {}\n", site.url);
        let _ = writeln!(out, "**Overall Score:** {:.1}/10\n", site.final_score);

        out.push_str("#### Strengths:\n");
        bullet_list(&mut out, &strengths(site));
        out.push_str("\n#### Weaknesses:\n");
        bullet_list(&mut out, &weaknesses(site));
        out.push_str("\n#### Improvement Suggestions:\n");
        bullet_list(&mut out, &improvements(site));
        out.push_str("\n#### Notes:\n");
        bullet_list(&mut out, &site.notes);
        out.push('\n');
    }

    if !summary.failures.is_empty() {
        out.push_str("## Failed Evaluations\n\n");
        for site in &summary.failures {
            let _ = writeln!(out, "- {} ({}): {} - {}", site.name, site.url, site.status, site.error);
        }
        out.push('\n');
    }

    out.push_str("## Testing Methodology\n\n");
    out.push_str(
        "Each application was opened in a headless Chromium browser and evaluated automatically:\n\n",
    );
    out.push_str("1. **Input Field Verification**: locating the current, pickup and dropoff location fields and the current cycle hours field\n");
    out.push_str("2. **Route Generation Testing**: submitting a fixed trip and waiting for map or log output\n");
    out.push_str("3. **ELD Log Generation**: looking for log sheets, Hours of Service details, duty statuses, drive time and breaks\n");
    out.push_str("4. **UI/UX Assessment**: layout landmarks, typography, colour palette, responsiveness, labels, navigation and help text\n");
    out.push_str("5. **Bug Detection**: console errors, broken images, visual glitches and handling of invalid input\n\n");
    out.push_str("Each category is scored from 0 to 10. The final score is the weighted average of the categories.\n");
    out
}

/// `top3_detailed_analysis.md`: score breakdown and commentary for the top
/// sites.
pub fn render_top3_analysis(summary: &BatchSummary) -> String {
    let mut out = format!(
        "# Top {} ELD Trip Planner Websites - Detailed Analysis\n\n",
        summary.top().len()
    );

    for site in summary.top() {
        let s = &site.scores;
        let _ = writeln!(out, "## {}. {} ({})\n", site.rank, site.name, site.url);
        let _ = writeln!(out, "**Overall Score:** {:.1}/10\n", site.final_score);

        out.push_str("### Category Scores\n");
        for category in TABLE_ORDER {
            let _ = writeln!(out, "- {}: {}/10", category.label(), s.get(category));
        }

        out.push_str("\n### Detailed Reasoning\n");
        let _ = writeln!(
            out,
            "The ELD log output {}, and the required features {}. \
             The interface {}, with {} interactions. \
             In terms of stability, the application {}.\n",
            commentary(Category::EldAccuracy, s.eld_accuracy),
            commentary(Category::RequiredFeatures, s.required_features),
            commentary(Category::UiAesthetics, s.ui_aesthetics),
            commentary(Category::UxIntuitiveness, s.ux_intuitiveness),
            commentary(Category::Bugs, s.bugs),
        );

        out.push_str("### Strengths\n");
        bullet_list(&mut out, &strengths(site));
        out.push_str("\n### Weaknesses\n");
        bullet_list(&mut out, &weaknesses(site));
        out.push_str("\n### Product Improvement Recommendations\n");
        bullet_list(&mut out, &improvements(site));
        out.push_str("\n### Notes\n");
        bullet_list(&mut out, &site.notes);
        out.push('\n');
    }
    out
}
