use std::path::PathBuf;

use clap::Parser;

/// Submit an inquiry batch, follow it to completion, and show the results.
#[derive(Debug, Parser)]
#[command(name = "inquiry_app", version)]
pub struct Cli {
    /// CSV or JSON file of inquiries to process.
    pub file: PathBuf,

    /// RON configuration file.
    #[arg(long, default_value = "inquiry.ron")]
    pub config: PathBuf,

    /// Service base URL; overrides the config file.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Results page to print once the job completes.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Also print every field of result number N (1-based).
    #[arg(long, value_name = "N")]
    pub detail: Option<usize>,

    /// Write the results to a dated CSV in the export directory.
    #[arg(long)]
    pub export: bool,

    /// Disable ANSI colours in terminal output.
    #[arg(long)]
    pub no_color: bool,

    /// Log level (error, warn, info, debug, trace); overrides the config file.
    #[arg(long)]
    pub log_level: Option<String>,
}
