use crate::config::types::{
    Config, CrawlConfig, OutputConfig, OutputFormat, SelectorConfig, SummarizerConfig,
    UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Hard upper bound on the requested item count
pub const MAX_ITEMS_CEILING: u32 = 500;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_selector_config(&config.selectors)?;
    validate_summarizer_config(&config.summarizer)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_items < 1 || config.max_items > MAX_ITEMS_CEILING {
        return Err(ConfigError::Validation(format!(
            "max-items must be between 1 and {}, got {}",
            MAX_ITEMS_CEILING, config.max_items
        )));
    }

    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    let base_url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base_url.scheme() != "http" && base_url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use HTTP or HTTPS, got '{}'",
            base_url.scheme()
        )));
    }

    if base_url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(
            "base-url has no host".to_string(),
        ));
    }

    if !config.detail_path_prefix.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "detail-path-prefix must start with '/', got '{}'",
            config.detail_path_prefix
        )));
    }

    Ok(())
}

/// Validates that the configured CSS selectors actually parse
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (name, selector) in [("title", &config.title), ("content", &config.content)] {
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("selectors.{} '{}': {}", name, selector, e))
        })?;
    }
    Ok(())
}

/// Validates summarizer configuration (only when enabled)
fn validate_summarizer_config(config: &SummarizerConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid summarizer endpoint: {}", e)))?;

    if config.model.is_empty() {
        return Err(ConfigError::Validation(
            "summarizer model cannot be empty".to_string(),
        ));
    }

    if config.max_sentences < 1 {
        return Err(ConfigError::Validation(
            "summarizer max-sentences must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    // Validate contact URL
    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    // Validate contact email (basic validation)
    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    match config.format {
        OutputFormat::Jsonl => {
            if config.records_path.is_empty() {
                return Err(ConfigError::Validation(
                    "records-path cannot be empty".to_string(),
                ));
            }
            if config.usage_path.is_empty() {
                return Err(ConfigError::Validation(
                    "usage-path cannot be empty".to_string(),
                ));
            }
        }
        OutputFormat::Sqlite => {
            if config.database_path.is_empty() {
                return Err(ConfigError::Validation(
                    "database-path cannot be empty".to_string(),
                ));
            }
        }
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact-email cannot be empty".to_string(),
        ));
    }

    // Basic email format check: must contain @ and have text on both sides
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    // Domain part should contain at least one dot
    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            crawl: CrawlConfig {
                base_url: "https://www.wired.com/tag/programming".to_string(),
                max_items: 24,
                max_concurrent_requests: 5,
                detail_path_prefix: "/story/".to_string(),
            },
            selectors: SelectorConfig::default(),
            summarizer: SummarizerConfig::default(),
            user_agent: UserAgentConfig {
                crawler_name: "TestCrawler".to_string(),
                crawler_version: "1.0".to_string(),
                contact_url: "https://example.com/about".to_string(),
                contact_email: "admin@example.com".to_string(),
            },
            output: OutputConfig {
                format: OutputFormat::Jsonl,
                records_path: "./records.jsonl".to_string(),
                usage_path: "./usage.jsonl".to_string(),
                database_path: "./records.db".to_string(),
            },
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_max_items_bounds() {
        let mut config = valid_config();
        config.crawl.max_items = 0;
        assert!(validate(&config).is_err());

        config.crawl.max_items = 500;
        assert!(validate(&config).is_ok());

        config.crawl.max_items = 501;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_base_url_must_have_http_scheme() {
        let mut config = valid_config();
        config.crawl.base_url = "ftp://example.com/listing".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_detail_prefix_requires_leading_slash() {
        let mut config = valid_config();
        config.crawl.detail_path_prefix = "story/".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let mut config = valid_config();
        config.selectors.title = "h1[".to_string();
        let result = validate(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidSelector(_)
        ));
    }

    #[test]
    fn test_summarizer_checks_only_when_enabled() {
        let mut config = valid_config();
        config.summarizer.model = String::new();
        assert!(validate(&config).is_ok());

        config.summarizer.enabled = true;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_sqlite_format_requires_database_path() {
        let mut config = valid_config();
        config.output.format = OutputFormat::Sqlite;
        config.output.database_path = String::new();
        assert!(validate(&config).is_err());

        // Empty jsonl paths are fine when format is sqlite
        config.output.database_path = "./records.db".to_string();
        config.output.records_path = String::new();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("admin@sub.example.com").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@domain").is_err());
    }
}
