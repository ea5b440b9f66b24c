//! Report compilation and site listing commands.

use chrono::Utc;

use eldprobe_config::Config;
use eldprobe_core::{FileResultStore, ReportCompiler};

/// Compile reports from the result files already on disk.
pub(crate) async fn handle_report(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let results_dir = &config.run.results_dir;
    let store = FileResultStore::new(results_dir);
    let compiler = ReportCompiler::new(results_dir);

    let (summary, files) = compiler.compile(&store, Utc::now()).await?;

    println!(
        "Compiled {} results ({} successful, {} failed)",
        summary.total_websites, summary.successful_evaluations, summary.failed_evaluations
    );
    for site in summary.top() {
        println!("  {}. {} - {:.1}/10", site.rank, site.name, site.final_score);
    }
    println!();
    for path in files.all() {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Print the configured site list.
pub(crate) fn handle_sites(config: &Config) {
    let width = config
        .sites
        .iter()
        .map(|s| s.name.len())
        .max()
        .unwrap_or(0);
    for site in &config.sites {
        println!("{:width$}  {}", site.name, site.url, width = width);
    }
    println!("\n{} sites", config.sites.len());
}
