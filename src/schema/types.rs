//! JSON Schema types for stream catalogs
//!
//! Record schemas are flat objects: every field is a scalar, optionally
//! nullable, and timestamps carry the `date-time` format.

use super::definition::{FieldMapping, ScalarKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Null,
}

impl JsonType {
    /// Type a converted column is published as
    pub fn for_scalar(kind: Option<ScalarKind>) -> Self {
        match kind {
            None | Some(ScalarKind::Timestamp) => JsonType::String,
            Some(ScalarKind::Integer) => JsonType::Integer,
            Some(ScalarKind::Decimal) => JsonType::Number,
            Some(ScalarKind::Boolean) => JsonType::Boolean,
        }
    }
}

/// `"integer"` or `["integer", "null"]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonTypeOrArray {
    Single(JsonType),
    Multiple(Vec<JsonType>),
}

impl JsonTypeOrArray {
    pub fn single(t: JsonType) -> Self {
        JsonTypeOrArray::Single(t)
    }

    /// The type plus `null`
    pub fn nullable(t: JsonType) -> Self {
        match t {
            JsonType::Null => JsonTypeOrArray::Single(JsonType::Null),
            other => JsonTypeOrArray::Multiple(vec![other, JsonType::Null]),
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            JsonTypeOrArray::Single(t) => *t == JsonType::Null,
            JsonTypeOrArray::Multiple(types) => types.contains(&JsonType::Null),
        }
    }

    /// The non-null type
    pub fn primary_type(&self) -> Option<JsonType> {
        match self {
            JsonTypeOrArray::Single(t) => Some(*t),
            JsonTypeOrArray::Multiple(types) => {
                types.iter().copied().find(|t| *t != JsonType::Null)
            }
        }
    }
}

/// Schema of one record field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub json_type: JsonTypeOrArray,

    /// `date-time` for timestamps
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl SchemaProperty {
    /// Property describing a mapped report column
    pub fn for_field(field: &FieldMapping) -> Self {
        let json_type = JsonType::for_scalar(field.kind);
        Self {
            json_type: if field.nullable {
                JsonTypeOrArray::nullable(json_type)
            } else {
                JsonTypeOrArray::single(json_type)
            },
            format: (field.kind == Some(ScalarKind::Timestamp)).then(|| "date-time".to_string()),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.json_type.is_nullable()
    }
}

/// Record schema of one stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object`
    #[serde(rename = "type")]
    pub json_type: JsonType,

    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Records carry exactly the mapped fields
    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: bool,
}

impl Default for JsonSchema {
    fn default() -> Self {
        Self {
            json_type: JsonType::Object,
            properties: BTreeMap::new(),
            required: Vec::new(),
            additional_properties: false,
        }
    }
}

impl JsonSchema {
    /// Schema with one property per mapped field
    pub fn from_fields<'a>(
        fields: impl IntoIterator<Item = &'a FieldMapping>,
        required: &[&str],
    ) -> Self {
        let properties = fields
            .into_iter()
            .map(|field| (field.target.to_string(), SchemaProperty::for_field(field)))
            .collect();
        Self {
            properties,
            required: required.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
