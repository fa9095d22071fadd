//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Extracts Adyen settlement, payment accounting and dispute reports
#[derive(Parser, Debug)]
#[command(name = "tap-adyen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Inline config JSON, takes precedence over --config
    #[arg(long, global = true)]
    pub config_json: Option<String>,

    /// State file (JSON), rewritten after every checkpoint
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Inline state JSON
    #[arg(long, global = true)]
    pub state_json: Option<String>,

    /// Output format of discover, streams and check
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Verify the report user's credentials
    Check,

    /// Print the stream catalog
    Discover,

    /// List available stream names
    Streams,

    /// Extract new reports from every selected stream
    Sync {
        /// Streams to sync (comma-separated, empty = all)
        #[arg(long)]
        streams: Option<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
