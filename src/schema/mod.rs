//! Stream schemas and field mapping
//!
//! # Overview
//!
//! Every stream is described by a static [`StreamDefinition`]: where its
//! reports live, how they are keyed and how each CSV column maps onto a
//! record field. [`FieldMapper`] applies that mapping to raw rows and the
//! definition renders the JSON Schema published in the catalog.

mod definition;
mod mapper;
mod streams;
mod types;

pub use definition::{
    AccountScope, FieldMapping, KeyStyle, ScalarKind, StreamDefinition, StreamKind,
};
pub use mapper::{to_type_or_null, CleanRecord, CleanValue, FieldMapper};
pub use streams::{DISPUTE_TRANSACTION_DETAILS, PAYMENT_ACCOUNTING, SETTLEMENT_DETAILS};
pub use types::{JsonSchema, JsonType, JsonTypeOrArray, SchemaProperty};
