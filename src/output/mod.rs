//! Output sinks for extracted records and usage events
//!
//! Records and usage events leave the crawl through two narrow trait
//! interfaces. Three backends are provided: JSON-lines files (the default),
//! SQLite, and an in-memory sink used by tests.

mod json_lines;
mod memory;
mod sqlite;
mod traits;

pub use json_lines::{JsonLinesSink, JsonLinesUsageLog};
pub use memory::MemorySink;
pub use sqlite::SqliteSink;
pub use traits::{RecordSink, SinkError, UsageSink};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One structured record extracted from a detail page
///
/// Missing selectors yield `None` fields, never a failure. Immutable once
/// emitted.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedRecord {
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub summary: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Kinds of billable usage events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageEventKind {
    /// One content-bearing article record was produced
    ArticleSummary,
}

/// One billable usage event, appended after the record it meters
#[derive(Debug, Clone, Serialize)]
pub struct UsageEvent {
    pub kind: UsageEventKind,
    pub url: String,
    pub occurred_at: DateTime<Utc>,
}

impl UsageEvent {
    /// Creates an `article_summary` event for the given record URL
    pub fn article_summary(url: &str) -> Self {
        Self {
            kind: UsageEventKind::ArticleSummary,
            url: url.to_string(),
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_null_fields() {
        let record = ExtractedRecord {
            title: None,
            content: None,
            url: "https://example.com/story/x".to_string(),
            summary: None,
            fetched_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert!(json["title"].is_null());
        assert!(json["content"].is_null());
        assert!(json["summary"].is_null());
        assert_eq!(json["url"], "https://example.com/story/x");
    }

    #[test]
    fn test_usage_event_kind_name() {
        let event = UsageEvent::article_summary("https://example.com/story/x");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["kind"], "article_summary");
    }
}
