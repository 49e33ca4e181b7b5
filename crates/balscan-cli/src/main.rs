//! balscan CLI tool.
//!
//! Usage:
//! ```bash
//! balscan scan [OPTIONS] [PATH]
//! balscan scan --list-rules
//! ```

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Static analyzer for Ballerina projects
#[derive(Parser)]
#[command(name = "balscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to Scan.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project snapshot
    Scan(ScanArgs),
}

/// Arguments of `balscan scan`.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Snapshot file, or a directory containing scan-project.json
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Only run these rules (comma-separated qualified ids)
    #[arg(long, value_delimiter = ',')]
    pub include_rules: Vec<String>,

    /// Skip these rules (comma-separated qualified ids)
    #[arg(long, value_delimiter = ',')]
    pub exclude_rules: Vec<String>,

    /// List available rules and exit
    #[arg(long)]
    pub list_rules: bool,

    /// Directory the reports are written to (default: <project>/target/report)
    #[arg(long)]
    pub target_dir: Option<PathBuf>,

    /// Also write the HTML report
    #[arg(long)]
    pub scan_report: bool,

    /// Platforms to forward results to (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// The scan was started by a platform
    #[arg(long)]
    pub platform_triggered: bool,
}

/// Output format for scan results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Scan(args) => commands::scan::run(&args, cli.config.as_deref()),
    }
}
