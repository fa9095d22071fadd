//! CSV decoder

use crate::error::{Error, Result};
use crate::types::{CsvStrictness, RawRow};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::io::Cursor;
use tracing::warn;

const BOM: &[u8] = b"\xef\xbb\xbf";

/// Rows of one report body, decoded as they are pulled
pub struct ReportRows {
    records: StringRecordsIntoIter<Cursor<Vec<u8>>>,
    headers: Vec<String>,
    strictness: CsvStrictness,
    /// Malformed lines dropped in lenient mode
    skipped: usize,
}

impl std::fmt::Debug for ReportRows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportRows")
            .field("headers", &self.headers)
            .field("strictness", &self.strictness)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

impl ReportRows {
    /// Trimmed header names
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Lines dropped so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn to_row(&self, record: &StringRecord) -> RawRow {
        self.headers
            .iter()
            .cloned()
            .zip(record.iter().map(str::to_string))
            .collect()
    }
}

impl Iterator for ReportRows {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.headers.is_empty() {
            return None;
        }

        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };
            if is_blank(&record) {
                continue;
            }

            if record.len() != self.headers.len() {
                let line = record.position().map_or(0, csv::Position::line);
                let err = Error::MalformedRow {
                    line,
                    expected: self.headers.len(),
                    found: record.len(),
                };
                match self.strictness {
                    CsvStrictness::Strict => return Some(Err(err)),
                    CsvStrictness::Lenient => {
                        warn!("{err}; skipping line");
                        self.skipped += 1;
                        continue;
                    }
                }
            }

            return Some(Ok(self.to_row(&record)));
        }
    }
}

/// Comma separated decoder with configurable strictness
#[derive(Debug, Clone, Default)]
pub struct CsvDecoder {
    /// Handling of lines whose width differs from the header
    strictness: CsvStrictness,
}

impl CsvDecoder {
    /// Create a new CSV decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strictness
    #[must_use]
    pub fn with_strictness(mut self, strictness: CsvStrictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn strictness(&self) -> CsvStrictness {
        self.strictness
    }

    /// Start decoding a body whose first line is the header
    ///
    /// Only the header is read here. An empty or header-only body yields no
    /// rows and blank lines are ignored.
    pub fn rows(&self, body: impl Into<Vec<u8>>) -> Result<ReportRows> {
        let body = body.into();
        let mut cursor = Cursor::new(body);
        if cursor.get_ref().starts_with(BOM) {
            cursor.set_position(BOM.len() as u64);
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(cursor);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        Ok(ReportRows {
            records: reader.into_records(),
            headers,
            strictness: self.strictness,
            skipped: 0,
        })
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
