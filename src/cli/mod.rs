//! CLI module
//!
//! Command-line interface of the tap.
//!
//! # Commands
//!
//! - `check` - Verify credentials against the reporting API
//! - `discover` - Print the stream catalog
//! - `streams` - List stream names
//! - `sync` - Extract new reports as protocol messages on stdout

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
