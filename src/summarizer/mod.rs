//! Article summarization via an OpenAI-compatible chat-completions API
//!
//! Summarization is enrichment only: a failed call degrades the record to a
//! null summary and never blocks it. Requests are not retried.

use crate::config::SummarizerConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;

/// Errors from the summarization API
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("Summarization request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Summarization API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Summarization API returned no choices")]
    EmptyResponse,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for the summarization endpoint
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_sentences: u32,
}

impl Summarizer {
    /// Builds a summarizer from configuration
    pub fn from_config(config: &SummarizerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            max_sentences: config.max_sentences,
        })
    }

    /// Summarizes article content
    ///
    /// The sentence cap is a fixed parameter of the request, carried in the
    /// prompt rather than negotiated with the API.
    ///
    /// # Arguments
    ///
    /// * `content` - The full article text
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The summary text, trimmed
    /// * `Err(SummarizeError)` - The request failed or the response was unusable
    pub async fn summarize(&self, content: &str) -> Result<String, SummarizeError> {
        let prompt = build_prompt(content, self.max_sentences);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let t0 = Instant::now();
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "summarization API returned an error"
            );
            return Err(SummarizeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        let summary = parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(SummarizeError::EmptyResponse)?;

        tracing::debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "summarization succeeded"
        );
        Ok(summary)
    }
}

/// Builds the summarization prompt with the sentence cap embedded
fn build_prompt(content: &str, max_sentences: u32) -> String {
    format!(
        "Your task is to summarize the content of the article in at most {max_sentences} sentences.\n\
         The original content of the article is:\n\
         {content}\n\n\
         Keep the answer simple and concise. Focus on the main points of the article, \
         and avoid unnecessary details."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_sentence_cap() {
        let prompt = build_prompt("some article text", 3);
        assert!(prompt.contains("at most 3 sentences"));
        assert!(prompt.contains("some article text"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "  A short summary.  "}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.trim(),
            "A short summary."
        );
    }

    #[test]
    fn test_empty_choices_is_error() {
        let json = r#"{"choices": []}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let body = ChatRequest {
            model: "gpt-4.1-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "prompt".to_string(),
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4.1-mini");
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
