//! Error types for tap-adyen
//!
//! This module defines the error hierarchy for the whole tap.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! A report that is simply absent (HTTP 404 while probing) is not an error:
//! it ends discovery. Everything below aborts the stream that raised it.

use thiserror::Error;

/// The main error type for tap-adyen
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Malformed CSV row at line {line}: expected {expected} columns, found {found}")]
    MalformedRow {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("Could not convert field '{field}' value '{value}' to {target}")]
    Conversion {
        field: String,
        value: String,
        target: String,
    },

    #[error("Unparseable timestamp '{value}'")]
    Timestamp { value: String },

    #[error("Record id overflow for report key {key}, row {ordinal}")]
    RecordId { key: String, ordinal: u64 },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // Connector Errors
    // ============================================================================
    #[error("Stream '{stream}' not found in catalog")]
    StreamNotFound { stream: String },

    #[error("Connection check failed: {message}")]
    ConnectionCheck { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an unexpected status error
    pub fn unexpected_status(url: impl Into<String>, status: u16) -> Self {
        Self::UnexpectedStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a conversion error
    pub fn conversion(
        field: impl Into<String>,
        value: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self::Conversion {
            field: field.into(),
            value: value.into(),
            target: target.into(),
        }
    }

    /// Create a timestamp error
    pub fn timestamp(value: impl Into<String>) -> Self {
        Self::Timestamp {
            value: value.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// Create a stream-not-found error
    pub fn stream_not_found(stream: impl Into<String>) -> Self {
        Self::StreamNotFound {
            stream: stream.into(),
        }
    }

    /// Whether this error came from the network layer rather than the server
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(e) if e.status().is_none())
    }
}

/// Result type alias for tap-adyen
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
