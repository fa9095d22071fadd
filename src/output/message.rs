//! Record protocol messages

use crate::types::JsonValue;
use serde::{Deserialize, Serialize};

/// One line of tap output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Describes the records that follow for a stream
    Schema {
        stream: String,
        schema: JsonValue,
        key_properties: Vec<String>,
        bookmark_properties: Vec<String>,
    },
    /// One extracted record
    Record {
        stream: String,
        record: JsonValue,
        time_extracted: String,
    },
    /// Resumable progress
    State { value: JsonValue },
}

impl Message {
    /// Stream the message belongs to, `None` for state
    pub fn stream(&self) -> Option<&str> {
        match self {
            Message::Schema { stream, .. } | Message::Record { stream, .. } => Some(stream),
            Message::State { .. } => None,
        }
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a state message
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}
