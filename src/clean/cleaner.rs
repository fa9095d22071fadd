//! Stream specific row transform

use crate::error::Result;
use crate::report::ProbeKey;
use crate::schema::{CleanRecord, FieldMapper, StreamDefinition};
use crate::types::RawRow;

/// Turns raw report rows of one stream into records
#[derive(Debug, Clone, Copy)]
pub struct RowCleaner {
    definition: &'static StreamDefinition,
    mapper: FieldMapper,
}

impl RowCleaner {
    pub fn new(definition: &'static StreamDefinition, mapper: FieldMapper) -> Self {
        Self { definition, mapper }
    }

    pub fn definition(&self) -> &'static StreamDefinition {
        self.definition
    }

    /// Clean the row at `ordinal` (0-based) of the artifact at `key`
    pub fn clean(&self, mut row: RawRow, ordinal: u64, key: ProbeKey) -> Result<CleanRecord> {
        let id = key.record_id(ordinal)?;
        row.insert(self.definition.replication_key.to_string(), id.to_string());

        merge_timezone_columns(&mut row, self.definition.timezone_columns);

        self.mapper.map_row(self.definition.fields, &row)
    }
}

/// Append each timezone column to its date column as `"{date} {zone}"`
///
/// An empty date stays empty so that it maps to null.
pub fn merge_timezone_columns(row: &mut RawRow, pairs: &[(&str, &str)]) {
    for (date_column, tz_column) in pairs {
        let zone = row.get(*tz_column).map_or("", |z| z.trim()).to_string();
        if let Some(value) = row.get_mut(*date_column) {
            let date = value.trim();
            *value = if date.is_empty() {
                String::new()
            } else {
                format!("{date} {zone}").trim().to_string()
            };
        }
    }
}
