//! CLI definitions for eldprobe.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// eldprobe CLI.
#[derive(Parser)]
#[command(name = "eldprobe")]
#[command(about = "Automated evaluation of ELD trip planner web applications")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Results directory (overrides run.results_dir)
    #[arg(short, long, env = "ELDPROBE_RESULTS_DIR", global = true)]
    pub results_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Evaluate every configured site, then compile reports
    Batch,

    /// Evaluate a single URL
    Single {
        /// Site URL
        url: String,
    },

    /// Compile reports from existing evaluation results
    Report,

    /// Print the configured site list
    Sites,
}
