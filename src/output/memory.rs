//! In-memory sink for tests and dry runs

use crate::output::traits::{RecordSink, SinkError, UsageSink};
use crate::output::{ExtractedRecord, UsageEvent};

/// Collects records and usage events in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub records: Vec<ExtractedRecord>,
    pub usage_events: Vec<UsageEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordSink for MemorySink {
    fn emit(&mut self, record: &ExtractedRecord) -> Result<(), SinkError> {
        self.records.push(record.clone());
        Ok(())
    }
}

impl UsageSink for MemorySink {
    fn record_usage(&mut self, event: &UsageEvent) -> Result<(), SinkError> {
        self.usage_events.push(event.clone());
        Ok(())
    }
}
