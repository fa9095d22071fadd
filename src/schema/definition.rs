//! Stream definitions
//!
//! Each report type is one stream. Everything that differs between them
//! (where the report lives, how it is keyed, which columns it carries) is
//! static data on [`StreamDefinition`]; the code paths are shared.

use super::streams::{DISPUTE_TRANSACTION_DETAILS, PAYMENT_ACCOUNTING, SETTLEMENT_DETAILS};
use super::types::JsonSchema;
use crate::error::{Error, Result};
use crate::types::ReplicationMethod;
use std::fmt;
use std::str::FromStr;

/// Scalar type a report column is converted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Decimal,
    /// `true`/`false`, `yes`/`no` or `1`/`0`, any case; other text is a
    /// conversion error
    Boolean,
    /// Date/time with a timezone abbreviation, resolved to ISO-8601
    Timestamp,
}

impl ScalarKind {
    /// Name used in conversion errors
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Integer => "integer",
            ScalarKind::Decimal => "decimal",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Timestamp => "timestamp",
        }
    }
}

/// Mapping of one source column to one record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    /// Column header in the report
    pub source: &'static str,
    /// Field name in the emitted record
    pub target: &'static str,
    /// Conversion to apply; `None` keeps the text
    pub kind: Option<ScalarKind>,
    /// Whether an empty value becomes null
    pub nullable: bool,
}

impl FieldMapping {
    /// Untyped column that becomes null when empty
    pub const fn text(source: &'static str, target: &'static str) -> Self {
        Self {
            source,
            target,
            kind: None,
            nullable: true,
        }
    }

    /// Untyped column kept verbatim, even when empty
    pub const fn required(source: &'static str, target: &'static str) -> Self {
        Self {
            source,
            target,
            kind: None,
            nullable: false,
        }
    }

    /// Typed column that becomes null when empty
    pub const fn typed(source: &'static str, target: &'static str, kind: ScalarKind) -> Self {
        Self {
            source,
            target,
            kind: Some(kind),
            nullable: true,
        }
    }
}

/// How a report artifact is addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// Sequential batch numbers
    Batch,
    /// One report per calendar day
    Date,
}

/// Account level a report is published under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountScope {
    Company,
    Merchant,
}

impl AccountScope {
    /// URL path segment for this scope
    pub fn path_segment(self) -> &'static str {
        match self {
            AccountScope::Company => "Company",
            AccountScope::Merchant => "MerchantAccount",
        }
    }
}

/// Static description of one report stream
#[derive(Debug)]
pub struct StreamDefinition {
    pub kind: StreamKind,
    pub replication_method: ReplicationMethod,
    /// Field holding the synthetic record id
    pub replication_key: &'static str,
    /// Name of the checkpoint value inside the stream's bookmark
    pub bookmark_field: &'static str,
    /// Report file name prefix on the reporting API
    pub report_type: &'static str,
    pub account_scope: AccountScope,
    pub key_style: KeyStyle,
    /// `(date column, timezone column)` pairs merged before mapping
    pub timezone_columns: &'static [(&'static str, &'static str)],
    /// Ordered column mapping
    pub fields: &'static [FieldMapping],
}

impl StreamDefinition {
    /// Stream name
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Primary key of emitted records
    pub fn key_properties(&self) -> Vec<String> {
        vec![self.replication_key.to_string()]
    }

    /// Record schema derived from the field mapping
    pub fn json_schema(&self) -> JsonSchema {
        JsonSchema::from_fields(self.fields, &[self.replication_key])
    }
}

/// The closed set of streams this tap can extract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StreamKind {
    SettlementDetails,
    PaymentAccounting,
    DisputeTransactionDetails,
}

impl StreamKind {
    /// All streams, in sync order
    pub const ALL: [StreamKind; 3] = [
        StreamKind::SettlementDetails,
        StreamKind::PaymentAccounting,
        StreamKind::DisputeTransactionDetails,
    ];

    /// Stream name as used in catalogs and state
    pub fn name(self) -> &'static str {
        match self {
            StreamKind::SettlementDetails => "settlement_details",
            StreamKind::PaymentAccounting => "payment_accounting",
            StreamKind::DisputeTransactionDetails => "dispute_transaction_details",
        }
    }

    /// Static definition of this stream
    pub fn definition(self) -> &'static StreamDefinition {
        match self {
            StreamKind::SettlementDetails => &SETTLEMENT_DETAILS,
            StreamKind::PaymentAccounting => &PAYMENT_ACCOUNTING,
            StreamKind::DisputeTransactionDetails => &DISPUTE_TRANSACTION_DETAILS,
        }
    }

    /// Parse a comma separated selection; an empty list selects every stream
    pub fn parse_list(list: &str) -> Result<Vec<StreamKind>> {
        let mut selected = Vec::new();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let kind: StreamKind = name.parse()?;
            if !selected.contains(&kind) {
                selected.push(kind);
            }
        }
        if selected.is_empty() {
            return Ok(Self::ALL.to_vec());
        }
        selected.sort();
        Ok(selected)
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StreamKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| Error::stream_not_found(s))
    }
}
