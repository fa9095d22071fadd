//! Report addressing types

use crate::error::{Error, Result};
use crate::schema::{AccountScope, KeyStyle, StreamDefinition};
use crate::types::JsonValue;
use chrono::{DateTime, Datelike, NaiveDate};
use std::fmt;
use url::Url;

/// Multiplier separating the report key from the row ordinal in record ids
pub const ID_KEY_FACTOR: i64 = 10_000_000_000;

/// Date or batch number identifying one report artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProbeKey {
    Batch(u64),
    Date(NaiveDate),
}

impl ProbeKey {
    /// The key one step ahead, `None` past the end of the key space
    pub fn next(self) -> Option<ProbeKey> {
        match self {
            ProbeKey::Batch(n) => n.checked_add(1).map(ProbeKey::Batch),
            ProbeKey::Date(d) => d.succ_opt().map(ProbeKey::Date),
        }
    }

    pub fn style(self) -> KeyStyle {
        match self {
            ProbeKey::Batch(_) => KeyStyle::Batch,
            ProbeKey::Date(_) => KeyStyle::Date,
        }
    }

    /// Key as it appears in report file names (`42`, `2021_01_31`)
    pub fn url_fragment(self) -> String {
        match self {
            ProbeKey::Batch(n) => n.to_string(),
            ProbeKey::Date(d) => d.format("%Y_%m_%d").to_string(),
        }
    }

    /// Leading part of record ids (`42`, `20210131`)
    pub fn id_component(self) -> i64 {
        match self {
            ProbeKey::Batch(n) => i64::try_from(n).unwrap_or(i64::MAX),
            ProbeKey::Date(d) => {
                i64::from(d.year()) * 10_000 + i64::from(d.month()) * 100 + i64::from(d.day())
            }
        }
    }

    /// Record id of the row at `ordinal` in this artifact
    pub fn record_id(self, ordinal: u64) -> Result<i64> {
        let overflow = || Error::RecordId {
            key: self.to_string(),
            ordinal,
        };
        let ordinal = i64::try_from(ordinal).map_err(|_| overflow())?;
        if ordinal >= ID_KEY_FACTOR {
            return Err(overflow());
        }
        self.id_component()
            .checked_mul(ID_KEY_FACTOR)
            .and_then(|base| base.checked_add(ordinal))
            .ok_or_else(overflow)
    }

    /// Recover the artifact key from a record id
    pub fn from_record_id(style: KeyStyle, id: i64) -> Result<ProbeKey> {
        let component = id / ID_KEY_FACTOR;
        let invalid = || Error::state(format!("record id {id} does not encode a report key"));
        match style {
            KeyStyle::Batch => u64::try_from(component)
                .map(ProbeKey::Batch)
                .map_err(|_| invalid()),
            KeyStyle::Date => {
                let year = i32::try_from(component / 10_000).map_err(|_| invalid())?;
                let month = (component / 100 % 100) as u32;
                let day = (component % 100) as u32;
                NaiveDate::from_ymd_opt(year, month, day)
                    .map(ProbeKey::Date)
                    .ok_or_else(invalid)
            }
        }
    }

    /// Bookmark value: a number for batches, `YYYY-MM-DD` for dates
    pub fn to_checkpoint(self) -> JsonValue {
        match self {
            ProbeKey::Batch(n) => JsonValue::from(n),
            ProbeKey::Date(d) => JsonValue::String(d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Read a bookmark value written by [`ProbeKey::to_checkpoint`]
    ///
    /// Batch numbers are also accepted as numeric strings, dates as full
    /// RFC 3339 timestamps.
    pub fn from_checkpoint(style: KeyStyle, value: &JsonValue) -> Result<ProbeKey> {
        match (style, value) {
            (KeyStyle::Batch, JsonValue::Number(n)) => n
                .as_u64()
                .map(ProbeKey::Batch)
                .ok_or_else(|| Error::state(format!("invalid batch number bookmark: {n}"))),
            (KeyStyle::Batch, JsonValue::String(s)) => s
                .trim()
                .parse()
                .map(ProbeKey::Batch)
                .map_err(|_| Error::state(format!("invalid batch number bookmark: {s}"))),
            (KeyStyle::Date, JsonValue::String(s)) => parse_start_date(s).map(ProbeKey::Date),
            (_, other) => Err(Error::state(format!("unsupported bookmark value: {other}"))),
        }
    }
}

impl fmt::Display for ProbeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeKey::Batch(n) => write!(f, "batch {n}"),
            ProbeKey::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// Parse a start date given as `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_start_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .ok_or_else(|| Error::invalid_value("start_date", format!("'{value}' is not a date")))
}

/// Reporting API environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Live,
    Test,
}

impl Environment {
    pub fn from_test_flag(test: bool) -> Self {
        if test {
            Environment::Test
        } else {
            Environment::Live
        }
    }

    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Live => "https://ca-live.adyen.com",
            Environment::Test => "https://ca-test.adyen.com",
        }
    }
}

/// Where one stream's reports are published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLocation {
    base_url: Url,
    scope: AccountScope,
    account: String,
    report_type: &'static str,
}

impl ReportLocation {
    pub fn new(
        base_url: &str,
        scope: AccountScope,
        account: impl Into<String>,
        report_type: &'static str,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::invalid_value(
                "base_url",
                format!("'{base_url}' cannot be a base URL"),
            ));
        }
        Ok(Self {
            base_url,
            scope,
            account: account.into(),
            report_type,
        })
    }

    /// Location of a stream's reports, picking the account its scope needs
    pub fn for_stream(
        base_url: &str,
        definition: &StreamDefinition,
        company_account: &str,
        merchant_account: &str,
    ) -> Result<Self> {
        let account = match definition.account_scope {
            AccountScope::Company => company_account,
            AccountScope::Merchant => merchant_account,
        };
        Self::new(
            base_url,
            definition.account_scope,
            account,
            definition.report_type,
        )
    }

    /// `{base}/reports/download/{scope}/{account}/{report_type}_{key}.csv`
    pub fn url_for(&self, key: ProbeKey) -> Result<Url> {
        let file = format!("{}_{}.csv", self.report_type, key.url_fragment());
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::invalid_value("base_url", "cannot be a base URL"))?
            .pop_if_empty()
            .extend([
                "reports",
                "download",
                self.scope.path_segment(),
                self.account.as_str(),
                file.as_str(),
            ]);
        Ok(url)
    }

    pub fn report_type(&self) -> &'static str {
        self.report_type
    }
}

/// A located report artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHandle {
    pub url: Url,
    pub key: ProbeKey,
}
