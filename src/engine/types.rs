//! Engine types

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Sync Phase
// ============================================================================

/// Where a stream is in its sync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// Schema written, nothing probed yet
    #[default]
    Pending,
    /// Looking for the next artifact
    Discovering,
    /// Draining an artifact into the sink
    Emitting,
    /// Bookmark advanced past the last drained artifact
    Checkpointed,
    /// Stream finished
    Done,
}

impl fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SyncPhase::Pending => "pending",
            SyncPhase::Discovering => "discovering",
            SyncPhase::Emitting => "emitting",
            SyncPhase::Checkpointed => "checkpointed",
            SyncPhase::Done => "done",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Sync Statistics
// ============================================================================

/// Statistics of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStats {
    /// Streams that reached `Done`
    pub streams_synced: usize,
    /// Report files downloaded and drained
    pub artifacts_processed: usize,
    /// RECORD messages written
    pub records_emitted: usize,
    /// Malformed CSV rows dropped in lenient mode
    pub rows_skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stream(&mut self) {
        self.streams_synced += 1;
    }

    pub fn add_artifact(&mut self) {
        self.artifacts_processed += 1;
    }

    pub fn add_records(&mut self, count: usize) {
        self.records_emitted += count;
    }

    pub fn add_skipped(&mut self, count: usize) {
        self.rows_skipped += count;
    }

    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}
