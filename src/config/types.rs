use serde::Deserialize;

/// Main configuration structure for storycrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub selectors: SelectorConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Base URL of the listing page (page 1); page N appends `?page=N`
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of content-bearing records to emit (1..=500)
    #[serde(rename = "max-items", default = "default_max_items")]
    pub max_items: u32,

    /// Maximum number of concurrently executing request handlers
    #[serde(rename = "max-concurrent-requests", default = "default_concurrency")]
    pub max_concurrent_requests: u32,

    /// Path prefix identifying article detail pages on the listing site
    #[serde(rename = "detail-path-prefix", default = "default_detail_prefix")]
    pub detail_path_prefix: String,
}

/// CSS selectors used to extract fields from detail pages.
///
/// Both selectors target stable content attributes rather than class names,
/// which churn across site redeploys. A selector that matches nothing yields
/// a null field, never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_title_selector")]
    pub title: String,

    #[serde(default = "default_content_selector")]
    pub content: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: default_title_selector(),
            content: default_content_selector(),
        }
    }
}

/// Summarization API configuration (OpenAI-compatible chat completions)
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// Whether records are enriched with summaries at all
    #[serde(default)]
    pub enabled: bool,

    /// Full URL of the chat-completions endpoint
    #[serde(default = "default_summarizer_endpoint")]
    pub endpoint: String,

    /// Model name passed in the request body
    #[serde(default = "default_summarizer_model")]
    pub model: String,

    /// Bearer token, if the endpoint requires one
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    /// Upper bound on summary length, passed in the prompt
    #[serde(rename = "max-sentences", default = "default_max_sentences")]
    pub max_sentences: u32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_summarizer_endpoint(),
            model: default_summarizer_model(),
            api_key: None,
            max_sentences: default_max_sentences(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Where emitted records and usage events go
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Sink backend for records and usage events
    #[serde(default)]
    pub format: OutputFormat,

    /// Path to the JSON-lines records file (format = "jsonl")
    #[serde(rename = "records-path", default = "default_records_path")]
    pub records_path: String,

    /// Path to the JSON-lines usage-event file (format = "jsonl")
    #[serde(rename = "usage-path", default = "default_usage_path")]
    pub usage_path: String,

    /// Path to the SQLite database file (format = "sqlite")
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

/// Supported output sink backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Sqlite,
}

fn default_max_items() -> u32 {
    // One full listing page worth of articles
    crate::crawler::ARTICLES_PER_PAGE
}

fn default_concurrency() -> u32 {
    5
}

fn default_detail_prefix() -> String {
    "/story/".to_string()
}

fn default_title_selector() -> String {
    r#"h1[data-testid="ContentHeaderHed"]"#.to_string()
}

fn default_content_selector() -> String {
    r#"div[data-testid="ArticlePageChunks"]"#.to_string()
}

fn default_summarizer_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_summarizer_model() -> String {
    "gpt-4.1-mini".to_string()
}

fn default_max_sentences() -> u32 {
    3
}

fn default_records_path() -> String {
    "./records.jsonl".to_string()
}

fn default_usage_path() -> String {
    "./usage.jsonl".to_string()
}

fn default_database_path() -> String {
    "./records.db".to_string()
}
