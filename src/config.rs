//! Tap configuration
//!
//! Loaded from a JSON file (`--config`) or inline JSON (`--config-json`):
//!
//! ```json
//! {
//!   "start_date": "2021-01-01",
//!   "report_user": "report_123456@Company.Acme",
//!   "user_password": "...",
//!   "company_account": "AcmeCorp",
//!   "merchant_account": "AcmeEU",
//!   "test": true
//! }
//! ```

use crate::auth::Credentials;
use crate::decode::CsvDecoder;
use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::report::{parse_start_date, Environment, ProbeKey};
use crate::schema::{FieldMapper, KeyStyle};
use crate::types::{ConversionMode, CsvStrictness, OptionStringExt};
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Keys that must be present and non-empty
pub const REQUIRED_KEYS: [&str; 5] = [
    "start_date",
    "report_user",
    "user_password",
    "company_account",
    "merchant_account",
];

// ============================================================================
// Tap Config
// ============================================================================

/// Runtime configuration of the tap
#[derive(Clone, Serialize, Deserialize)]
pub struct TapConfig {
    /// First report date for date keyed streams
    #[serde(default)]
    pub start_date: String,

    /// Report user name for basic auth
    #[serde(default)]
    pub report_user: String,

    /// Report user password
    #[serde(default)]
    pub user_password: String,

    /// Company account of company scoped reports
    #[serde(default)]
    pub company_account: String,

    /// Merchant account of merchant scoped reports
    #[serde(default)]
    pub merchant_account: String,

    /// Use the test environment
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub test: bool,

    /// First settlement batch to probe
    #[serde(default = "default_start_batch_number", deserialize_with = "deserialize_count")]
    pub start_batch_number: u64,

    /// Overrides the environment host
    #[serde(default)]
    pub base_url: Option<String>,

    /// Request timeout
    #[serde(default = "default_timeout_seconds", deserialize_with = "deserialize_count")]
    pub timeout_seconds: u64,

    /// Throttle for probes and downloads
    #[serde(default)]
    pub max_requests_per_second: Option<u32>,

    #[serde(default)]
    pub csv_strictness: CsvStrictness,

    #[serde(default)]
    pub conversion_mode: ConversionMode,

    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_start_batch_number() -> u64 {
    1
}

fn default_timeout_seconds() -> u64 {
    300
}

/// Accept `true`, `"true"`, `"1"` style flags
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "1" => Ok(true),
            "false" | "no" | "0" | "" => Ok(false),
            other => Err(de::Error::custom(format!("invalid boolean '{other}'"))),
        },
    }
}

/// Accept `5` or `"5"`
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(u64),
        Text(String),
    }

    match Count::deserialize(deserializer)? {
        Count::Number(n) => Ok(n),
        Count::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid number '{s}'"))),
    }
}

impl TapConfig {
    /// Parse and validate inline JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&contents)
    }

    /// Check required keys and value formats
    pub fn validate(&self) -> Result<()> {
        for key in REQUIRED_KEYS {
            if self.required_value(key).is_none() {
                return Err(Error::missing_field(key));
            }
        }

        self.start_date()?;

        if self.start_batch_number == 0 {
            return Err(Error::invalid_value(
                "start_batch_number",
                "batch numbers start at 1",
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(Error::invalid_value("timeout_seconds", "must be positive"));
        }
        if let Some(base_url) = self.base_url.clone().none_if_empty() {
            url::Url::parse(&base_url)
                .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        }
        Ok(())
    }

    fn required_value(&self, key: &str) -> Option<String> {
        let value = match key {
            "start_date" => &self.start_date,
            "report_user" => &self.report_user,
            "user_password" => &self.user_password,
            "company_account" => &self.company_account,
            "merchant_account" => &self.merchant_account,
            _ => return None,
        };
        value.trim().to_string().none_if_empty()
    }

    /// Configured start date
    pub fn start_date(&self) -> Result<NaiveDate> {
        parse_start_date(&self.start_date)
    }

    pub fn environment(&self) -> Environment {
        Environment::from_test_flag(self.test)
    }

    /// Reporting API root, the override if one is set
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .none_if_empty()
            .unwrap_or_else(|| self.environment().base_url().to_string())
    }

    /// Probe key a stream starts from when it has no bookmark
    pub fn default_start_key(&self, style: KeyStyle) -> Result<ProbeKey> {
        Ok(match style {
            KeyStyle::Batch => ProbeKey::Batch(self.start_batch_number),
            KeyStyle::Date => ProbeKey::Date(self.start_date()?),
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.report_user.trim(), &self.user_password)
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder =
            HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(rps) = self.max_requests_per_second {
            builder = builder.rate_limit(RateLimiterConfig::per_second(rps));
        }
        if let Some(agent) = self.user_agent.clone().none_if_empty() {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    pub fn decoder(&self) -> CsvDecoder {
        CsvDecoder::new().with_strictness(self.csv_strictness)
    }

    pub fn mapper(&self) -> FieldMapper {
        FieldMapper::new(self.conversion_mode)
    }
}

impl std::fmt::Debug for TapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapConfig")
            .field("start_date", &self.start_date)
            .field("report_user", &self.report_user)
            .field("user_password", &"***")
            .field("company_account", &self.company_account)
            .field("merchant_account", &self.merchant_account)
            .field("test", &self.test)
            .field("start_batch_number", &self.start_batch_number)
            .field("base_url", &self.base_url)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_requests_per_second", &self.max_requests_per_second)
            .field("csv_strictness", &self.csv_strictness)
            .field("conversion_mode", &self.conversion_mode)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
