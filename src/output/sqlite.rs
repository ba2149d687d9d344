//! SQLite sink implementation
//!
//! A single connection backs both the record and usage-event tables, so one
//! `SqliteSink` wrapped in an `Arc<Mutex<_>>` can serve as either sink.

use crate::output::traits::{RecordSink, SinkError, UsageSink};
use crate::output::{ExtractedRecord, UsageEvent, UsageEventKind};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQL schema for the sink database
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    url TEXT NOT NULL,
    title TEXT,
    content TEXT,
    summary TEXT,
    fetched_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_records_url ON records(url);

CREATE TABLE IF NOT EXISTS usage_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    url TEXT NOT NULL,
    occurred_at TEXT NOT NULL
);
"#;

/// SQLite-backed record and usage sink
pub struct SqliteSink {
    conn: Connection,
}

impl SqliteSink {
    /// Opens (or creates) the sink database at the given path
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Creates an in-memory sink (for testing)
    pub fn open_in_memory() -> Result<Self, SinkError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Counts emitted records
    pub fn count_records(&self) -> Result<u64, SinkError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Counts recorded usage events
    pub fn count_usage_events(&self) -> Result<u64, SinkError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM usage_events", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

impl RecordSink for SqliteSink {
    fn emit(&mut self, record: &ExtractedRecord) -> Result<(), SinkError> {
        self.conn.execute(
            "INSERT INTO records (url, title, content, summary, fetched_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.url,
                record.title,
                record.content,
                record.summary,
                record.fetched_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

impl UsageSink for SqliteSink {
    fn record_usage(&mut self, event: &UsageEvent) -> Result<(), SinkError> {
        let kind = match event.kind {
            UsageEventKind::ArticleSummary => "article_summary",
        };
        self.conn.execute(
            "INSERT INTO usage_events (kind, url, occurred_at) VALUES (?1, ?2, ?3)",
            params![kind, event.url, event.occurred_at.to_rfc3339()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_record(url: &str) -> ExtractedRecord {
        ExtractedRecord {
            title: Some("A Title".to_string()),
            content: Some("Body text".to_string()),
            url: url.to_string(),
            summary: Some("Short summary.".to_string()),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_emit_and_count() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        sink.emit(&sample_record("https://example.com/story/a"))
            .unwrap();
        sink.emit(&sample_record("https://example.com/story/b"))
            .unwrap();

        assert_eq!(sink.count_records().unwrap(), 2);
        assert_eq!(sink.count_usage_events().unwrap(), 0);
    }

    #[test]
    fn test_null_fields_stored_as_null() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        let record = ExtractedRecord {
            title: None,
            content: None,
            url: "https://example.com/story/a".to_string(),
            summary: None,
            fetched_at: Utc::now(),
        };
        sink.emit(&record).unwrap();

        let (title, summary): (Option<String>, Option<String>) = sink
            .conn
            .query_row("SELECT title, summary FROM records", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert!(title.is_none());
        assert!(summary.is_none());
    }

    #[test]
    fn test_usage_event_row() {
        let mut sink = SqliteSink::open_in_memory().unwrap();
        sink.record_usage(&UsageEvent::article_summary("https://example.com/story/a"))
            .unwrap();

        assert_eq!(sink.count_usage_events().unwrap(), 1);
        let kind: String = sink
            .conn
            .query_row("SELECT kind FROM usage_events", [], |row| row.get(0))
            .unwrap();
        assert_eq!(kind, "article_summary");
    }
}
