//! Tests for the timezone module

use super::*;
use test_case::test_case;

#[test]
fn test_table_lookup() {
    assert_eq!(offset_seconds("CET"), Some(3600));
    assert_eq!(offset_seconds("PST"), Some(-8 * 3600));
    assert_eq!(offset_seconds("ACWST"), Some(31_500));
    assert_eq!(offset_seconds("ChST"), Some(36_000));
    assert_eq!(offset_seconds("cet"), None);
    assert_eq!(offset_seconds("XYZT"), None);
}

#[test]
fn test_table_has_unique_abbreviations() {
    let mut names: Vec<&str> = TIMEZONE_OFFSETS.iter().map(|(name, _)| *name).collect();
    let total = names.len();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), total);
}

#[test_case("2021-01-01 CET", "2021-01-01T00:00:00+01:00" ; "date with abbreviation")]
#[test_case("2021-03-15 13:45:10 CET", "2021-03-15T13:45:10+01:00" ; "datetime with abbreviation")]
#[test_case("2021-07-01 08:00:00 PDT", "2021-07-01T08:00:00-07:00" ; "negative offset")]
#[test_case("2021-07-01 08:00:00 ACWST", "2021-07-01T08:00:00+08:45" ; "fractional offset")]
#[test_case("2021-07-01 08:00:00 UTC", "2021-07-01T08:00:00+00:00" ; "utc")]
#[test_case("2021-07-01 08:00:00 +0530", "2021-07-01T08:00:00+05:30" ; "numeric offset token")]
#[test_case("2021-07-01 08:00:00 -03:00", "2021-07-01T08:00:00-03:00" ; "numeric offset with colon")]
#[test_case("2021-07-01T08:00:00+02:00", "2021-07-01T08:00:00+02:00" ; "rfc3339 passthrough")]
#[test_case("2021-07-01 08:00:00", "2021-07-01T08:00:00+00:00" ; "no zone means utc")]
#[test_case("2021-07-01", "2021-07-01T00:00:00+00:00" ; "bare date")]
#[test_case("2021-07-01 08:00:00.250 CET", "2021-07-01T08:00:00.250+01:00" ; "fractional seconds")]
#[test_case("2021/07/01 08:00:00 GMT", "2021-07-01T08:00:00+00:00" ; "slash date")]
fn test_resolve(input: &str, expected: &str) {
    assert_eq!(resolve(input).unwrap(), expected);
}

#[test]
fn test_unknown_abbreviation_falls_back_to_utc() {
    assert_eq!(
        resolve("2021-07-01 08:00:00 QQQ").unwrap(),
        "2021-07-01T08:00:00+00:00"
    );
}

#[test]
fn test_parse_keeps_offset() {
    let dt = parse("2021-01-01 12:00:00 CET").unwrap();
    assert_eq!(dt.offset().local_minus_utc(), 3600);
    assert_eq!(dt.naive_utc().to_string(), "2021-01-01 11:00:00");
}

#[test_case("" ; "empty")]
#[test_case("   " ; "whitespace")]
#[test_case("not a date" ; "garbage")]
#[test_case("2021-13-45 CET" ; "impossible date")]
fn test_resolve_rejects(input: &str) {
    assert!(matches!(
        resolve(input),
        Err(crate::error::Error::Timestamp { .. })
    ));
}
