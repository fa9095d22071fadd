// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # tap-adyen
//!
//! Incremental extractor for Adyen reports. Settlement details, payment
//! accounting and dispute transaction details are downloaded as CSV, cleaned
//! into typed records and written as protocol messages on stdout.
//!
//! ## Features
//!
//! - **Report discovery**: probes dated and batch numbered report URLs until
//!   the first missing one
//! - **Typed records**: decimals, integers and timezone aware timestamps
//!   from report text
//! - **Incremental sync**: bookmark per stream, persisted after every report
//! - **Stable ids**: synthetic record ids ordered by report key and row
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_adyen::{JsonLinesSink, StateManager, StreamKind, SyncEngine, TapConfig};
//!
//! #[tokio::main]
//! async fn main() -> tap_adyen::Result<()> {
//!     let config = TapConfig::from_file("config.json")?;
//!     let state = StateManager::from_file("state.json")?;
//!
//!     let mut engine = SyncEngine::from_config(config, state)?;
//!     let mut sink = JsonLinesSink::stdout();
//!     engine.sync(&StreamKind::ALL, &mut sink).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                          SyncEngine                            │
//! │  Pending → Discovering → (Emitting → Checkpointed)* → Done     │
//! └────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┼──────────────┬─────────────────┐
//! │   Locator    │   Retriever   │   Cleaner    │      Sink       │
//! ├──────────────┼───────────────┼──────────────┼─────────────────┤
//! │ HEAD probes  │ GET + CSV     │ record id    │ SCHEMA          │
//! │ date / batch │ strictness    │ timezones    │ RECORD          │
//! │ keys         │               │ field types  │ STATE           │
//! └──────────────┴───────────────┴──────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Timezone abbreviation lookup and timestamp normalization
pub mod timezone;

/// Stream definitions, schemas and field mapping
pub mod schema;

/// Basic auth credentials
pub mod auth;

/// HTTP client with rate limiting
pub mod http;

/// CSV decoding
pub mod decode;

/// Report discovery and download
pub mod report;

/// Report row cleaning
pub mod clean;

/// State management and checkpointing
pub mod state;

/// Protocol messages and sinks
pub mod output;

/// Main execution engine
pub mod engine;

/// Tap configuration
pub mod config;

/// Discovery catalog
pub mod catalog;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use catalog::Catalog;
pub use config::TapConfig;
pub use engine::{SyncEngine, SyncStats};
pub use output::{JsonLinesSink, MemorySink, Sink};
pub use schema::StreamKind;
pub use state::StateManager;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
