//! State management module
//!
//! Handles bookmark tracking and checkpointing.
//! State is persisted between sync runs to enable incremental syncs.
//!
//! # Overview
//!
//! The state module provides:
//! - `State` - Bookmarks per stream plus the stream currently syncing
//! - `StateManager` - Shared state with atomic file persistence
//!
//! ```json
//! {"bookmarks": {"settlement_details": {"batch_number": 7}}, "currently_syncing": null}
//! ```

mod manager;
mod types;

pub use manager::StateManager;
pub use types::State;
