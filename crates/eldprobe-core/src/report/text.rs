//! Plain-text summary report.

use std::fmt::Write;

use super::BatchSummary;
use crate::model::Category;

fn average_label(category: Category) -> &'static str {
    match category {
        Category::UiAesthetics => "UI Aesthetics Average",
        Category::UxIntuitiveness => "UX Intuitiveness Average",
        Category::Bugs => "Bug-Free Score Average",
        Category::RequiredFeatures => "Required Features Average",
        Category::EldAccuracy => "ELD Accuracy Average",
    }
}

fn winner_label(category: Category) -> &'static str {
    match category {
        Category::UiAesthetics => "Best UI Design",
        Category::UxIntuitiveness => "Best UX Design",
        Category::Bugs => "Most Bug-Free",
        Category::RequiredFeatures => "Most Complete Features",
        Category::EldAccuracy => "Best ELD Implementation",
    }
}

/// Rankings, averages, category winners and failures.
pub fn render_text(summary: &BatchSummary) -> String {
    let mut out = String::from("=== WEBSITE EVALUATION SUMMARY REPORT ===\n\n");
    let _ = writeln!(out, "Date: {}", summary.generated_at.to_rfc3339());
    let _ = writeln!(out, "Total websites evaluated: {}", summary.total_websites);
    let _ = writeln!(out, "Successful evaluations: {}", summary.successful_evaluations);
    let _ = writeln!(out, "Failed evaluations: {}\n", summary.failed_evaluations);

    out.push_str("=== WEBSITE RANKINGS ===\n\n");
    for site in &summary.ranking {
        let s = &site.scores;
        let _ = writeln!(
            out,
            "{}. {} - Final Score: {:.1}/10",
            site.rank, site.name, site.final_score
        );
        let _ = writeln!(out, "   URL: {}", site.url);
        let _ = writeln!(
            out,
            "   UI: {}/10 | UX: {}/10 | Bugs: {}/10",
            s.ui_aesthetics, s.ux_intuitiveness, s.bugs
        );
        let _ = writeln!(
            out,
            "   Features: {}/10 | ELD: {}/10\n",
            s.required_features, s.eld_accuracy
        );
    }

    out.push_str("=== AVERAGE SCORES ===\n\n");
    let _ = writeln!(out, "Overall Average: {:.1}/10", summary.averages.overall);
    for category in Category::ALL {
        let _ = writeln!(
            out,
            "{}: {:.1}/10",
            average_label(category),
            summary.averages.get(category)
        );
    }
    out.push('\n');

    if !summary.category_winners.is_empty() {
        out.push_str("=== CATEGORY WINNERS ===\n\n");
        for winner in &summary.category_winners {
            let _ = writeln!(
                out,
                "{}: {} ({}/10)",
                winner_label(winner.category),
                winner.name,
                winner.score
            );
        }
        out.push('\n');
    }

    if !summary.failures.is_empty() {
        out.push_str("=== FAILED EVALUATIONS ===\n\n");
        for site in &summary.failures {
            let _ = writeln!(out, "{} ({}): {}", site.name, site.url, site.status);
            let _ = writeln!(out, "   Error: {}\n", site.error);
        }
    }
    out
}
