//! Output module
//!
//! Record protocol messages and the sinks that receive them.
//!
//! # Overview
//!
//! A sync writes, per stream, one `SCHEMA` message, the stream's `RECORD`
//! messages and a `STATE` message after every checkpoint:
//!
//! ```text
//! {"type":"SCHEMA","stream":"settlement_details","schema":{...},"key_properties":["id"],"bookmark_properties":["id"]}
//! {"type":"RECORD","stream":"settlement_details","record":{"id":50000000000,...},"time_extracted":"2021-01-02T03:04:05Z"}
//! {"type":"STATE","value":{"bookmarks":{"settlement_details":{"batch_number":6}},"currently_syncing":"settlement_details"}}
//! ```

mod message;
mod sink;

pub use message::Message;
pub use sink::{JsonLinesSink, MemorySink, Sink};
