//! Report discovery and retrieval
//!
//! # Overview
//!
//! Every stream reads CSV reports published under a predictable URL, keyed
//! by either a calendar date or a sequential batch number:
//!
//! ```text
//! https://ca-live.adyen.com/reports/download/MerchantAccount/AcmeEU/payments_accounting_report_2021_01_31.csv
//! ```
//!
//! [`ReportLocator`] probes that key space with `HEAD` requests and
//! [`ReportRetriever`] downloads what it finds.

mod locator;
mod retriever;
mod types;

pub use locator::ReportLocator;
pub use retriever::ReportRetriever;
pub use types::{
    parse_start_date, Environment, ProbeKey, ReportHandle, ReportLocation, ID_KEY_FACTOR,
};

#[cfg(test)]
mod tests;
