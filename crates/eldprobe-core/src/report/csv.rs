//! Spreadsheet export.

use std::fmt::Write;

use super::BatchSummary;
use crate::model::Category;

pub const CSV_HEADER: &str =
    "Name,URL,Status,Final Score,UI Score,UX Score,Bugs Score,Features Score,ELD Score";

/// Quote a text field, doubling embedded quotes.
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One row per result in load order; `N/A` for sites without scores.
pub fn render_csv(summary: &BatchSummary) -> String {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for result in &summary.results {
        let _ = write!(
            out,
            "{},{},{}",
            quoted(&result.website),
            quoted(&result.url),
            quoted(result.status.as_str())
        );
        if result.is_complete() {
            let _ = write!(out, ",{:.1}", result.final_score);
            for category in Category::ALL {
                let _ = write!(out, ",{}", result.scores.get(category));
            }
        } else {
            out.push_str(&",N/A".repeat(1 + Category::ALL.len()));
        }
        out.push('\n');
    }
    out
}
