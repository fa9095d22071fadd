//! State manager implementation
//!
//! Provides file-based state persistence with atomic writes.

use super::types::State;
use crate::error::{Error, Result, ResultExt};
use crate::types::JsonValue;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// State manager for persisting and loading state
#[derive(Debug, Clone)]
pub struct StateManager {
    /// Path to the state file; empty in memory mode
    path: PathBuf,
    /// Current state (cached)
    state: Arc<RwLock<State>>,
}

impl StateManager {
    /// Create a state manager writing to `path`, starting from empty state
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_state(path.as_ref().to_path_buf(), State::new())
    }

    /// Create an in-memory state manager (no file persistence)
    pub fn in_memory() -> Self {
        Self::with_state(PathBuf::new(), State::new())
    }

    fn with_state(path: PathBuf, state: State) -> Self {
        Self {
            path,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Create a state manager from a file, loading existing state if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .context(format!("Failed to read state file {}", path.display()))?;
            parse_state(&contents, "state file")?
        } else {
            State::new()
        };

        Ok(Self::with_state(path, state))
    }

    /// Create an in-memory state manager from inline JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::with_state(PathBuf::new(), parse_state(json, "state JSON")?))
    }

    /// Save current state to file
    pub async fn save(&self) -> Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }

        let contents = self.to_json_pretty().await?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .context(format!("Failed to write state file {}", temp_path.display()))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .context(format!("Failed to rename state file to {}", self.path.display()))?;

        debug!("State saved to {}", self.path.display());
        Ok(())
    }

    /// Get a read lock on the current state
    pub async fn state(&self) -> tokio::sync::RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Get a write lock on the current state
    pub async fn state_mut(&self) -> tokio::sync::RwLockWriteGuard<'_, State> {
        self.state.write().await
    }

    /// Export state as JSON string
    pub async fn to_json(&self) -> Result<String> {
        let state = self.state.read().await;
        serde_json::to_string(&*state).map_err(|e| Error::State {
            message: format!("Failed to serialize state: {e}"),
        })
    }

    /// Export state as pretty-printed JSON string
    pub async fn to_json_pretty(&self) -> Result<String> {
        let state = self.state.read().await;
        serde_json::to_string_pretty(&*state).map_err(|e| Error::State {
            message: format!("Failed to serialize state: {e}"),
        })
    }

    /// Get a bookmark value for a stream
    pub async fn get_bookmark(&self, stream: &str, field: &str) -> Option<JsonValue> {
        let state = self.state.read().await;
        state.get_bookmark(stream, field).cloned()
    }

    /// Set a bookmark value for a stream (not saved until the next checkpoint)
    pub async fn set_bookmark(&self, stream: &str, field: &str, value: JsonValue) {
        let mut state = self.state.write().await;
        state.set_bookmark(stream, field, value);
    }

    /// Record which stream is being synced
    pub async fn set_currently_syncing(&self, stream: Option<&str>) {
        let mut state = self.state.write().await;
        state.set_currently_syncing(stream);
    }

    /// Get the state file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str().is_empty()
    }

    /// Create a checkpoint (alias for save)
    pub async fn checkpoint(&self) -> Result<()> {
        self.save().await
    }
}

fn parse_state(contents: &str, source: &str) -> Result<State> {
    if contents.trim().is_empty() {
        return Ok(State::new());
    }
    serde_json::from_str(contents).map_err(|e| Error::State {
        message: format!("Failed to parse {source}: {e}"),
    })
}
