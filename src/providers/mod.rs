//! Remote text-generation service boundary.
//!
//! [`TextGenerator`] is the seam the memoized client calls through: one
//! prompt in, one raw structured result out. No retry, no streaming, no
//! timeout beyond what the transport imposes. [`extract_text`] turns the
//! raw result into the string the client returns and caches.

pub mod gemini;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// The single network call of the system.
///
/// Implementations make exactly one request per invocation and surface
/// every failure as [`crate::MemoError::Provider`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Value>;
}

/// Ordered extraction strategies, tried in sequence. Each returns the
/// response text if its shape matches and the text is non-empty.
const STRATEGIES: &[fn(&Value) -> Option<String>] = &[
    joined_candidate_parts,
    first_candidate_content,
    top_level_text,
];

/// Extract response text from a raw service result.
///
/// First matching strategy wins. When none matches — empty parts, an
/// unfamiliar payload shape — the whole result is rendered as compact
/// JSON, so a structurally successful call never yields an empty string.
/// The rendered fallback can look like debug output; that imprecision is
/// accepted in exchange for the non-empty guarantee.
pub fn extract_text(response: &Value) -> String {
    for strategy in STRATEGIES {
        if let Some(text) = strategy(response) {
            return text;
        }
    }
    response.to_string()
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Canonical shape: join of `candidates[0].content.parts[*].text`.
fn joined_candidate_parts(response: &Value) -> Option<String> {
    let parts = response["candidates"][0]["content"]["parts"].as_array()?;
    let joined: String = parts
        .iter()
        .filter_map(|p| p["text"].as_str())
        .collect();
    non_empty(joined)
}

/// Older shape: `candidates[0].content` as a bare string.
fn first_candidate_content(response: &Value) -> Option<String> {
    response["candidates"][0]["content"]
        .as_str()
        .map(str::to_owned)
        .and_then(non_empty)
}

/// Some payloads carry the answer in a top-level `text` field.
fn top_level_text(response: &Value) -> Option<String> {
    response["text"].as_str().map(str::to_owned).and_then(non_empty)
}
