//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs.

use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state of the tap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmark values, keyed by bookmark field
    #[serde(default)]
    pub bookmarks: BTreeMap<String, JsonObject>,

    /// Stream being synced when the state was written
    #[serde(default)]
    pub currently_syncing: Option<String>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a bookmark value for a stream
    pub fn get_bookmark(&self, stream: &str, field: &str) -> Option<&JsonValue> {
        self.bookmarks.get(stream)?.get(field)
    }

    /// Set a bookmark value for a stream
    pub fn set_bookmark(&mut self, stream: &str, field: &str, value: JsonValue) {
        self.bookmarks
            .entry(stream.to_string())
            .or_default()
            .insert(field.to_string(), value);
    }

    pub fn set_currently_syncing(&mut self, stream: Option<&str>) {
        self.currently_syncing = stream.map(ToString::to_string);
    }

    /// Convert to JSON value
    pub fn to_json(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or_default()
    }
}
