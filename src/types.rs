//! Common types used throughout tap-adyen
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

/// One CSV line keyed by its header name
pub type RawRow = StringMap;

// ============================================================================
// Replication Method
// ============================================================================

/// How a stream is replicated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplicationMethod {
    /// Only new artifacts since the last checkpoint
    #[default]
    Incremental,
}

impl ReplicationMethod {
    /// Protocol name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            ReplicationMethod::Incremental => "INCREMENTAL",
        }
    }
}

// ============================================================================
// Strictness
// ============================================================================

/// What to do with a CSV line whose column count differs from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsvStrictness {
    /// Abort the stream
    #[default]
    Strict,
    /// Skip the line and log a warning
    Lenient,
}

/// What to do with a typed field whose value does not parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionMode {
    /// Abort the stream
    #[default]
    Strict,
    /// Null the field and log a warning
    Lenient,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
