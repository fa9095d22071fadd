//! Date/time parsing with trailing timezone abbreviations

use super::table::offset_seconds;
use crate::error::{Error, Result};
use chrono::{
    DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, SecondsFormat, TimeZone, Utc,
};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Layouts with a time component, tried in order
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts, resolved to midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Layouts that already carry a numeric offset
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%:z", "%Y-%m-%d %H:%M:%S%z"];

static NUMERIC_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:UTC|GMT)?([+-])(\d{1,2}):?(\d{2})?$").unwrap());

static ZONE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z]{1,6}$").unwrap());

/// Parse a report timestamp into an ISO-8601 string with offset
///
/// `"2021-01-01 CET"` becomes `"2021-01-01T00:00:00+01:00"`.
pub fn resolve(input: &str) -> Result<String> {
    let parsed = parse(input)?;
    Ok(parsed.to_rfc3339_opts(SecondsFormat::AutoSi, false))
}

/// Parse a report timestamp into an absolute instant
///
/// The last whitespace separated token is looked up in the abbreviation
/// table, then tried as a numeric offset. Anything else that looks like a zone
/// name is ignored and the instant is taken as UTC.
pub fn parse(input: &str) -> Result<DateTime<FixedOffset>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::timestamp(input));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt);
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, fmt) {
            return Ok(dt);
        }
    }

    let (text, offset) = split_zone(trimmed)?;
    let naive = parse_naive(text).ok_or_else(|| Error::timestamp(input))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| Error::timestamp(input))
}

/// Separate the datetime text from its trailing zone token
fn split_zone(input: &str) -> Result<(&str, FixedOffset)> {
    let utc = Utc.fix();

    let Some((rest, token)) = input.rsplit_once(char::is_whitespace) else {
        return Ok((input, utc));
    };
    let rest = rest.trim_end();

    if let Some(seconds) = offset_seconds(token) {
        let offset = FixedOffset::east_opt(seconds).ok_or_else(|| Error::timestamp(input))?;
        return Ok((rest, offset));
    }

    if let Some(offset) = numeric_offset(token) {
        return Ok((rest, offset));
    }

    if ZONE_WORD.is_match(token) {
        debug!("Unknown timezone abbreviation '{token}', assuming UTC");
        return Ok((rest, utc));
    }

    Ok((input, utc))
}

/// Parse `+01:00`, `-0530`, `UTC+2` style offsets
fn numeric_offset(token: &str) -> Option<FixedOffset> {
    let caps = NUMERIC_OFFSET.captures(token)?;
    let hours: i32 = caps.get(2)?.as_str().parse().ok()?;
    let minutes: i32 = caps
        .get(3)
        .map_or(Some(0), |m| m.as_str().parse().ok())?;
    let seconds = hours * 3600 + minutes * 60;
    if &caps[1] == "-" {
        FixedOffset::west_opt(seconds)
    } else {
        FixedOffset::east_opt(seconds)
    }
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(ndt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(nd) = NaiveDate::parse_from_str(text, fmt) {
            return nd.and_hms_opt(0, 0, 0);
        }
    }
    None
}
