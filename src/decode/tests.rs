//! Tests for decoder module

use super::*;
use crate::error::{Error, Result};
use crate::types::{CsvStrictness, RawRow};
use pretty_assertions::assert_eq;

#[derive(Debug)]
struct Decoded {
    rows: Vec<RawRow>,
    skipped: usize,
}

/// Drain a whole body
trait DecodeAll {
    fn decode(&self, body: &str) -> Result<Decoded>;
}

impl DecodeAll for CsvDecoder {
    fn decode(&self, body: &str) -> Result<Decoded> {
        let mut rows = self.rows(body)?;
        let collected = rows.by_ref().collect::<Result<Vec<_>>>()?;
        Ok(Decoded {
            rows: collected,
            skipped: rows.skipped(),
        })
    }
}

const REPORT: &str = "Company Account,Merchant Account,Psp Reference,Gross Debit (GC)\n\
AcmeCorp,AcmeEU,8515,10.00\n\
AcmeCorp,AcmeEU,8516,\n";

#[test]
fn test_csv_decoder_basic() {
    let decoded = CsvDecoder::new().decode(REPORT).unwrap();

    assert_eq!(decoded.rows.len(), 2);
    assert_eq!(decoded.skipped, 0);
    assert_eq!(decoded.rows[0]["Psp Reference"], "8515");
    assert_eq!(decoded.rows[0]["Gross Debit (GC)"], "10.00");
    assert_eq!(decoded.rows[1]["Gross Debit (GC)"], "");
}

#[test]
fn test_csv_decoder_quoted_fields() {
    let body = "Merchant Reference,Shopper Name\n\"order, 1\",\"Doe, \"\"J\"\"\"\n";
    let decoded = CsvDecoder::new().decode(body).unwrap();

    assert_eq!(decoded.rows[0]["Merchant Reference"], "order, 1");
    assert_eq!(decoded.rows[0]["Shopper Name"], "Doe, \"J\"");
}

#[test]
fn test_csv_decoder_empty_body() {
    let decoded = CsvDecoder::new().decode("").unwrap();
    assert!(decoded.rows.is_empty());
}

#[test]
fn test_csv_decoder_header_only() {
    let decoded = CsvDecoder::new().decode("A,B,C\n").unwrap();
    assert!(decoded.rows.is_empty());
}

#[test]
fn test_csv_decoder_skips_blank_lines() {
    let body = "A,B\n1,2\n\n3,4\n\n";
    let decoded = CsvDecoder::new().decode(body).unwrap();
    assert_eq!(decoded.rows.len(), 2);
    assert_eq!(decoded.rows[1]["A"], "3");
}

#[test]
fn test_csv_decoder_strips_bom() {
    let body = "\u{feff}Company Account,Type\nAcmeCorp,Settled\n";
    let decoded = CsvDecoder::new().decode(body).unwrap();
    assert_eq!(decoded.rows[0]["Company Account"], "AcmeCorp");
}

#[test]
fn test_csv_decoder_crlf() {
    let body = "A,B\r\n1,2\r\n";
    let decoded = CsvDecoder::new().decode(body).unwrap();
    assert_eq!(decoded.rows[0]["B"], "2");
}

#[test]
fn test_strict_rejects_malformed_row() {
    let body = "A,B,C\n1,2,3\n4,5\n";
    let err = CsvDecoder::new().decode(body).unwrap_err();

    match err {
        Error::MalformedRow {
            line,
            expected,
            found,
        } => {
            assert_eq!(line, 3);
            assert_eq!(expected, 3);
            assert_eq!(found, 2);
        }
        other => panic!("expected malformed row, got {other:?}"),
    }
}

#[test]
fn test_lenient_skips_malformed_row() {
    let body = "A,B,C\n1,2,3\n4,5\n6,7,8,9\n10,11,12\n";
    let decoded = CsvDecoder::new()
        .with_strictness(CsvStrictness::Lenient)
        .decode(body)
        .unwrap();

    assert_eq!(decoded.rows.len(), 2);
    assert_eq!(decoded.skipped, 2);
    assert_eq!(decoded.rows[1]["A"], "10");
}

#[test]
fn test_rows_are_decoded_on_demand() {
    let body = "A,B\n1,2\n3\n4,5\n";
    let mut rows = CsvDecoder::new().rows(body).unwrap();

    assert_eq!(rows.headers(), ["A", "B"]);
    assert_eq!(rows.next().unwrap().unwrap()["A"], "1");
    assert!(matches!(
        rows.next(),
        Some(Err(Error::MalformedRow { line: 3, .. }))
    ));
}

#[test]
fn test_lenient_skip_count_grows_while_draining() {
    let mut rows = CsvDecoder::new()
        .with_strictness(CsvStrictness::Lenient)
        .rows("A,B\n1\n2,3\n4\n")
        .unwrap();

    assert_eq!(rows.skipped(), 0);
    assert_eq!(rows.next().unwrap().unwrap()["B"], "3");
    assert_eq!(rows.skipped(), 1);
    assert!(rows.next().is_none());
    assert_eq!(rows.skipped(), 2);
}
