//! Response decoder module
//!
//! # Overview
//!
//! Reports are delivered as comma separated text with a header line.
//! [`CsvDecoder`] turns one downloaded body into [`RawRow`](crate::types::RawRow)s
//! keyed by header name, in file order, one row at a time.

mod decoder;

pub use decoder::{CsvDecoder, ReportRows};

#[cfg(test)]
mod tests;
