//! Row to record conversion
//!
//! Turns one [`RawRow`] of report text into a [`CleanRecord`] following a
//! stream's field mapping.

use super::definition::{FieldMapping, ScalarKind};
use crate::error::{Error, Result};
use crate::timezone;
use crate::types::{ConversionMode, JsonObject, JsonValue, RawRow};
use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::warn;

/// A typed record value
#[derive(Debug, Clone, PartialEq)]
pub enum CleanValue {
    Null,
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
    /// RFC 3339 timestamp with offset
    Timestamp(String),
}

impl CleanValue {
    /// JSON representation; decimals become JSON numbers
    pub fn to_json(&self) -> JsonValue {
        match self {
            CleanValue::Null => JsonValue::Null,
            CleanValue::String(s) | CleanValue::Timestamp(s) => JsonValue::String(s.clone()),
            CleanValue::Integer(i) => JsonValue::from(*i),
            CleanValue::Decimal(d) => serde_json::Number::from_str(&d.to_string())
                .map_or_else(|_| JsonValue::String(d.to_string()), JsonValue::Number),
            CleanValue::Boolean(b) => JsonValue::Bool(*b),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CleanValue::Null)
    }
}

/// Typed record in field mapping order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanRecord {
    fields: Vec<(&'static str, CleanValue)>,
}

impl CleanRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing an earlier value of the same name
    pub fn insert(&mut self, name: &'static str, value: CleanValue) {
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CleanValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// The synthetic record id
    pub fn id(&self) -> Option<i64> {
        match self.get("id") {
            Some(CleanValue::Integer(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(n, _)| *n)
    }

    /// Convert to a JSON object
    pub fn to_json(&self) -> JsonValue {
        let map: JsonObject = self
            .fields
            .iter()
            .map(|(n, v)| ((*n).to_string(), v.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}

/// Convert one raw value
///
/// Empty values of nullable fields become null, non-empty values of typed
/// fields are parsed, everything else is kept as text.
pub fn to_type_or_null(
    field: &str,
    value: &str,
    kind: Option<ScalarKind>,
    nullable: bool,
) -> Result<CleanValue> {
    match kind {
        Some(kind) if !value.is_empty() => {
            convert(value, kind).ok_or_else(|| Error::conversion(field, value, kind.name()))
        }
        _ if value.is_empty() && nullable => Ok(CleanValue::Null),
        _ => Ok(CleanValue::String(value.to_string())),
    }
}

fn convert(value: &str, kind: ScalarKind) -> Option<CleanValue> {
    let trimmed = value.trim();
    match kind {
        ScalarKind::Integer => trimmed.parse().ok().map(CleanValue::Integer),
        ScalarKind::Decimal => Decimal::from_str(trimmed).ok().map(CleanValue::Decimal),
        ScalarKind::Boolean => parse_bool(trimmed).map(CleanValue::Boolean),
        ScalarKind::Timestamp => timezone::resolve(trimmed).ok().map(CleanValue::Timestamp),
    }
}

/// Values accepted for [`ScalarKind::Boolean`]
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Applies a field mapping to raw rows
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldMapper {
    mode: ConversionMode,
}

impl FieldMapper {
    pub fn new(mode: ConversionMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ConversionMode {
        self.mode
    }

    /// Build a record holding exactly the mapped fields
    ///
    /// Columns missing from the row are read as empty values.
    pub fn map_row(&self, fields: &[FieldMapping], row: &RawRow) -> Result<CleanRecord> {
        let mut record = CleanRecord::new();
        for field in fields {
            let raw = row.get(field.source).map_or("", String::as_str);
            let value = match to_type_or_null(field.target, raw, field.kind, field.nullable) {
                Ok(value) => value,
                Err(e) if self.mode == ConversionMode::Lenient => {
                    warn!("{e}; writing null");
                    CleanValue::Null
                }
                Err(e) => return Err(e),
            };
            record.insert(field.target, value);
        }
        Ok(record)
    }
}
