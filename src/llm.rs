//! Suggestion client used for related-query generation.
//!
//! The resolver only needs one capability from a language model: given a
//! topic, propose a handful of related search phrases. That capability is
//! behind [`SuggestionClient`] so callers can inject any backend (or none
//! at all) instead of the crate owning a hardwired provider.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::SourceError;

const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Generates related search phrases for a topic.
///
/// Implementations should return at most `count` phrases, most relevant
/// first. An error is acceptable and callers degrade gracefully.
#[async_trait]
pub trait SuggestionClient: Send + Sync {
    async fn related_queries(&self, topic: &str, count: usize)
        -> Result<Vec<String>, SourceError>;
}

/// [`SuggestionClient`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl GeminiClient {
    /// Build a client for the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Build a client for a specific model name, e.g. `gemini-1.5-pro`.
    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, SourceError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(SourceError::Config("Gemini API key is empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()?;
        Ok(Self {
            api_key,
            model: model.into(),
            client,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, SourceError> {
        let url = format!(
            "{GEMINI_ENDPOINT}/{model}:generateContent",
            model = self.model
        );
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        let payload: serde_json::Value = response.json().await?;
        payload
            .pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| SourceError::Llm("response carried no candidate text".into()))
    }
}

#[async_trait]
impl SuggestionClient for GeminiClient {
    async fn related_queries(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<Vec<String>, SourceError> {
        let prompt = format!(
            "List {count} short YouTube search phrases closely related to the study topic \
             \"{topic}\". One phrase per line, no numbering, no commentary."
        );
        let text = self.generate(&prompt).await?;
        Ok(clean_suggestions(&text, count))
    }
}

/// Turn raw model output into usable search phrases.
///
/// Strips list markers and surrounding quotes, drops blanks, and caps the
/// result at `count` entries.
pub(crate) fn clean_suggestions(text: &str, count: usize) -> Vec<String> {
    text.lines()
        .map(|line| {
            line.trim()
                .trim_start_matches(['-', '*', '•'])
                .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')')
                .trim()
                .trim_matches('"')
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .take(count)
        .collect()
}
