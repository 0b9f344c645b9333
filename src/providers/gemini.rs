//! Native Gemini client speaking the `generateContent` REST API.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::TextGenerator;
use crate::error::{MemoError, Result};

/// Gemini v1beta REST API base.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Thin client around one model of the Gemini REST API.
///
/// Carries no deadline of its own: callers needing bounded latency wrap
/// the call in their own timeout.
pub struct GeminiClient {
    api_key: String,
    model: String,
    client: Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: Client::new(),
        }
    }

    /// Model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the `generateContent` request body for a single prompt.
    pub fn build_request_body(prompt: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        })
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", GEMINI_API_BASE, self.model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Value> {
        debug!(model = %self.model, "Gemini generateContent request");

        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", self.api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&Self::build_request_body(prompt))
            .send()
            .await
            .map_err(|e| MemoError::Provider(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|e| {
                MemoError::Provider(format!("Failed to parse Gemini response: {}", e))
            });
        }

        let error_text = response.text().await.unwrap_or_default();
        // Surface the service's own message when the error body is JSON.
        let message = serde_json::from_str::<Value>(&error_text)
            .ok()
            .and_then(|v| {
                v["error"]["message"]
                    .as_str()
                    .map(|s| format!("Gemini API error: {}", s))
            })
            .unwrap_or_else(|| {
                format!("Gemini API error ({}): {}", status.as_u16(), error_text)
            });
        Err(MemoError::Provider(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_format() {
        let client = GeminiClient::new("key", "gemini-2.0-flash-exp");
        let url = client.api_url();
        assert!(url.contains("generativelanguage.googleapis.com"));
        assert!(url.contains("gemini-2.0-flash-exp"));
        assert!(url.ends_with(":generateContent"));
    }

    #[test]
    fn test_request_body_wraps_prompt() {
        let body = GeminiClient::build_request_body("Hello, how are you?");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Hello, how are you?"
        );
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = GeminiClient::new("super-secret", "gemini-2.0-flash-exp");
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_model_accessor() {
        let client = GeminiClient::new("key", "gemini-2.5-pro");
        assert_eq!(client.model(), "gemini-2.5-pro");
    }
}
