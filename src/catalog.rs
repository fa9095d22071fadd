//! Discovery catalog
//!
//! The catalog lists every stream the tap can extract with its record
//! schema and replication settings. It is generated from the static stream
//! definitions, so discovery never touches the network.

use crate::error::Result;
use crate::schema::{StreamDefinition, StreamKind};
use crate::types::{JsonValue, ReplicationMethod};
use serde::{Deserialize, Serialize};

/// One stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub tap_stream_id: String,
    pub stream: String,
    pub schema: JsonValue,
    pub key_properties: Vec<String>,
    pub replication_method: ReplicationMethod,
    pub replication_key: String,
    pub bookmark_field: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

impl CatalogEntry {
    pub fn from_definition(definition: &StreamDefinition) -> Self {
        Self {
            tap_stream_id: definition.name().to_string(),
            stream: definition.name().to_string(),
            schema: definition.json_schema().to_json(),
            key_properties: definition.key_properties(),
            replication_method: definition.replication_method,
            replication_key: definition.replication_key.to_string(),
            bookmark_field: definition.bookmark_field.to_string(),
            selected: true,
        }
    }
}

/// Catalog of extractable streams
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub streams: Vec<CatalogEntry>,
}

impl Catalog {
    /// Catalog of every known stream
    pub fn discover() -> Self {
        Self::for_streams(&StreamKind::ALL)
    }

    pub fn for_streams(kinds: &[StreamKind]) -> Self {
        Self {
            streams: kinds
                .iter()
                .map(|kind| CatalogEntry::from_definition(kind.definition()))
                .collect(),
        }
    }

    /// Look up a stream by name
    pub fn entry(&self, stream: &str) -> Option<&CatalogEntry> {
        self.streams.iter().find(|e| e.stream == stream)
    }

    /// Streams marked as selected, in catalog order
    pub fn selected(&self) -> Result<Vec<StreamKind>> {
        self.streams
            .iter()
            .filter(|e| e.selected)
            .map(|e| e.stream.parse())
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
