//! JSON-lines file sinks
//!
//! One serialized object per line, flushed after every write so a partial
//! run still leaves a readable file behind.

use crate::output::traits::{RecordSink, SinkError, UsageSink};
use crate::output::{ExtractedRecord, UsageEvent};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends extracted records to a JSON-lines file
pub struct JsonLinesSink {
    writer: BufWriter<File>,
}

impl JsonLinesSink {
    /// Opens (or creates) the records file in append mode
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl RecordSink for JsonLinesSink {
    fn emit(&mut self, record: &ExtractedRecord) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Appends usage events to a JSON-lines file
pub struct JsonLinesUsageLog {
    writer: BufWriter<File>,
}

impl JsonLinesUsageLog {
    /// Opens (or creates) the usage-event file in append mode
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl UsageSink for JsonLinesUsageLog {
    fn record_usage(&mut self, event: &UsageEvent) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_record() -> ExtractedRecord {
        ExtractedRecord {
            title: Some("A Title".to_string()),
            content: Some("Body text".to_string()),
            url: "https://example.com/story/a-title".to_string(),
            summary: None,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_emit_writes_one_line_per_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        let mut sink = JsonLinesSink::open(&path).unwrap();
        sink.emit(&sample_record()).unwrap();
        sink.emit(&sample_record()).unwrap();
        drop(sink);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["title"], "A Title");
    }

    #[test]
    fn test_append_preserves_existing_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.jsonl");

        {
            let mut sink = JsonLinesSink::open(&path).unwrap();
            sink.emit(&sample_record()).unwrap();
        }
        {
            let mut sink = JsonLinesSink::open(&path).unwrap();
            sink.emit(&sample_record()).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_usage_log_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("usage.jsonl");

        let mut log = JsonLinesUsageLog::open(&path).unwrap();
        log.record_usage(&UsageEvent::article_summary(
            "https://example.com/story/a-title",
        ))
        .unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed["kind"], "article_summary");
        assert_eq!(parsed["url"], "https://example.com/story/a-title");
    }
}
