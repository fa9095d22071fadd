//! Message sinks

use super::message::Message;
use crate::error::Result;
use crate::schema::{CleanRecord, JsonSchema};
use crate::state::State;
use crate::types::JsonValue;
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::{self, Stdout, Write};

/// Receiver of schemas, records and state
pub trait Sink {
    /// Announce a stream and its record schema
    fn write_schema(
        &mut self,
        stream: &str,
        schema: &JsonSchema,
        key_properties: &[String],
    ) -> Result<()>;

    /// Emit one record
    fn write_record(
        &mut self,
        stream: &str,
        record: &CleanRecord,
        extracted_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Emit the current state
    fn write_state(&mut self, state: &State) -> Result<()>;

    /// Move a stream's bookmark forward
    fn write_bookmark(
        &mut self,
        state: &mut State,
        stream: &str,
        field: &str,
        value: JsonValue,
    ) -> Result<()> {
        state.set_bookmark(stream, field, value);
        Ok(())
    }
}

fn schema_message(stream: &str, schema: &JsonSchema, key_properties: &[String]) -> Message {
    Message::Schema {
        stream: stream.to_string(),
        schema: schema.to_json(),
        key_properties: key_properties.to_vec(),
        bookmark_properties: key_properties.to_vec(),
    }
}

fn record_message(stream: &str, record: &CleanRecord, extracted_at: DateTime<Utc>) -> Message {
    Message::Record {
        stream: stream.to_string(),
        record: record.to_json(),
        time_extracted: extracted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn state_message(state: &State) -> Message {
    Message::State {
        value: state.to_json(),
    }
}

/// Writes one JSON message per line
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl JsonLinesSink<Stdout> {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_message(&mut self, message: &Message) -> Result<()> {
        serde_json::to_writer(&mut self.writer, message)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn write_schema(
        &mut self,
        stream: &str,
        schema: &JsonSchema,
        key_properties: &[String],
    ) -> Result<()> {
        self.write_message(&schema_message(stream, schema, key_properties))
    }

    fn write_record(
        &mut self,
        stream: &str,
        record: &CleanRecord,
        extracted_at: DateTime<Utc>,
    ) -> Result<()> {
        self.write_message(&record_message(stream, record, extracted_at))
    }

    fn write_state(&mut self, state: &State) -> Result<()> {
        self.write_message(&state_message(state))?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects messages in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    messages: Vec<Message>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    /// Records emitted for a stream, in order
    pub fn records(&self, stream: &str) -> Vec<&JsonValue> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::Record {
                    stream: s, record, ..
                } if s == stream => Some(record),
                _ => None,
            })
            .collect()
    }

    /// State values emitted, in order
    pub fn states(&self) -> Vec<&JsonValue> {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::State { value } => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Last state value emitted
    pub fn last_state(&self) -> Option<&JsonValue> {
        self.states().pop()
    }
}

impl Sink for MemorySink {
    fn write_schema(
        &mut self,
        stream: &str,
        schema: &JsonSchema,
        key_properties: &[String],
    ) -> Result<()> {
        self.messages
            .push(schema_message(stream, schema, key_properties));
        Ok(())
    }

    fn write_record(
        &mut self,
        stream: &str,
        record: &CleanRecord,
        extracted_at: DateTime<Utc>,
    ) -> Result<()> {
        self.messages
            .push(record_message(stream, record, extracted_at));
        Ok(())
    }

    fn write_state(&mut self, state: &State) -> Result<()> {
        self.messages.push(state_message(state));
        Ok(())
    }
}
