//! Sink trait interfaces and error type

use crate::output::{ExtractedRecord, UsageEvent};
use thiserror::Error;

/// Errors that can occur while writing to a sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Append-only destination for extracted records
///
/// One call per completed detail request that produced a record. Ordering
/// across records is not guaranteed to match discovery order.
pub trait RecordSink: Send {
    fn emit(&mut self, record: &ExtractedRecord) -> Result<(), SinkError>;
}

/// Append-only destination for billable usage events
///
/// Called at most once per detail request that produced a non-null content
/// field, after the corresponding record emission.
pub trait UsageSink: Send {
    fn record_usage(&mut self, event: &UsageEvent) -> Result<(), SinkError>;
}
