//! LLM (Gemini) API client module
//!
//! Encapsulates the single HTTP call used to turn a prompt into summary text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, error, info};

use crate::errors::SummarizationError;

pub const MAX_OUTPUT_TOKENS: u32 = 2048;
pub const TEMPERATURE: f64 = 0.7;

/// Anything that can turn a prompt into text.
///
/// The pipeline only depends on this trait, so the provider wire format stays
/// an implementation detail of [`GeminiClient`].
#[async_trait]
pub trait Summarize: Send + Sync {
    /// # Errors
    ///
    /// Returns an error when the provider fails or answers without text.
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizationError>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, SummarizationError> {
        let http = Client::builder().timeout(timeout).build().map_err(|e| {
            SummarizationError::new(format!("Failed to build Gemini HTTP client: {e}"))
        })?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    #[must_use]
    pub fn request_body(prompt: &str) -> Value {
        json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ],
            "generationConfig": {
                "maxOutputTokens": MAX_OUTPUT_TOKENS,
                "temperature": TEMPERATURE
            }
        })
    }
}

#[async_trait]
impl Summarize for GeminiClient {
    async fn summarize(&self, prompt: &str) -> Result<String, SummarizationError> {
        #[cfg(feature = "debug-logs")]
        debug!("Using Gemini prompt:\n{}", prompt);

        info!(
            "Calling Gemini API with a {} character prompt",
            prompt.chars().count()
        );

        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&Self::request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                SummarizationError::from(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            SummarizationError::new(format!("Failed to read Gemini response body: {e}"))
                .with_status(status.as_u16())
        })?;
        debug!("Gemini API response: status={} body_len={}", status, body.len());

        if !status.is_success() {
            error!("Gemini API error (status {}): {}", status, body);
            return Err(SummarizationError::new(format!("Gemini API error (status {status})"))
                .with_status(status.as_u16())
                .with_body(body));
        }

        let response_json: Value = serde_json::from_str(&body).map_err(|e| {
            SummarizationError::new(format!("Failed to parse Gemini response: {e}"))
                .with_status(status.as_u16())
                .with_body(body.clone())
        })?;

        let text = extract_candidate_text(&response_json).ok_or_else(|| {
            error!("Gemini response had no candidate text: {}", body);
            SummarizationError::new("No candidate text in Gemini response")
                .with_status(status.as_u16())
                .with_body(body.clone())
        })?;

        info!("Gemini API call completed");
        Ok(text.trim().to_string())
    }
}

/// Pulls `candidates[0].content.parts[*].text` out of a `generateContent`
/// response, joining multiple parts.
#[must_use]
pub fn extract_candidate_text(response: &Value) -> Option<String> {
    let parts = response
        .get("candidates")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())?;

    let collected: Vec<&str> = parts
        .iter()
        .filter_map(|p| p.get("text").and_then(|t| t.as_str()))
        .collect();

    if collected.is_empty() {
        None
    } else {
        Some(collected.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = GeminiClient::request_body("hello");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(body["generationConfig"]["temperature"], 0.7);
    }

    #[test]
    fn test_extract_candidate_text_joins_parts() {
        let response = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Hello " }, { "text": "world" } ] } }
            ]
        });
        assert_eq!(extract_candidate_text(&response).as_deref(), Some("Hello world"));
    }

    #[test]
    fn test_extract_candidate_text_missing() {
        assert!(extract_candidate_text(&json!({ "candidates": [] })).is_none());
        assert!(extract_candidate_text(&json!({ "promptFeedback": {} })).is_none());
        assert!(
            extract_candidate_text(&json!({ "candidates": [ { "finishReason": "SAFETY" } ] }))
                .is_none()
        );
    }
}
