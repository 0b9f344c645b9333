//! Memoized remote call client.
//!
//! The one lifecycle in this crate: audit the prompt, check the store for
//! an exact-prompt hit, otherwise make the single remote call, extract the
//! response text, remember it, and return it. Store failures degrade to
//! warnings; provider failures propagate after being audited.

use std::collections::HashMap;

use serde_json::Value;
use tracing::{debug, warn};

use crate::audit::{AuditSink, DailyLogFile};
use crate::config::Config;
use crate::error::{MemoError, Result};
use crate::providers::{extract_text, GeminiClient, TextGenerator};
use crate::store::{JsonFileStore, PromptStore};

/// Client that memoizes calls to a text-generation service.
///
/// The store is re-read per call rather than held in memory, so multiple
/// processes can share one cache file. Writers race; the last successful
/// writer wins.
pub struct MemoizedClient {
    generator: Option<Box<dyn TextGenerator>>,
    store: Box<dyn PromptStore>,
    audit: Box<dyn AuditSink>,
}

impl MemoizedClient {
    /// Assemble a client from explicit parts.
    ///
    /// `generator` is `None` when no credential is available: cached
    /// prompts still resolve, and misses fail with a configuration error
    /// before any network attempt.
    pub fn new(
        generator: Option<Box<dyn TextGenerator>>,
        store: Box<dyn PromptStore>,
        audit: Box<dyn AuditSink>,
    ) -> Self {
        Self {
            generator,
            store,
            audit,
        }
    }

    /// Wire the Gemini client, JSON file store, and daily audit log from
    /// configuration.
    pub fn from_config(config: &Config) -> Self {
        let generator = config.api_key.as_deref().map(|key| {
            Box::new(GeminiClient::new(key, &config.model)) as Box<dyn TextGenerator>
        });
        Self::new(
            generator,
            Box::new(JsonFileStore::new(&config.cache_path)),
            Box::new(DailyLogFile::new(&config.log_dir)),
        )
    }

    /// Return the response for `prompt`, from the store when possible.
    ///
    /// With `use_cache` set, an exact-prompt hit short-circuits everything
    /// including the remote call; a miss makes the one remote call and
    /// persists the result before returning it. With `use_cache` unset the
    /// store is never read or written.
    ///
    /// A failure to persist is audited and swallowed: the freshly computed
    /// response is still returned.
    pub async fn call(&self, prompt: &str, use_cache: bool) -> Result<String> {
        self.audit.info(&format!("PROMPT: {}", prompt));

        if use_cache {
            let entries = self.load_store();
            if let Some(cached) = entries.get(prompt) {
                debug!("Cache hit");
                self.audit.info("Cache hit");
                self.audit.info(&format!("RESPONSE: {}", cached));
                return Ok(cached.clone());
            }
        }

        let Some(generator) = self.generator.as_deref() else {
            let message = "GEMINI_API_KEY is not set in .env file or environment.";
            self.audit.error(message);
            return Err(MemoError::Config(message.to_string()));
        };

        let raw = match generator.generate(prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                self.audit.error(&format!("LLM call failed: {}", e));
                return Err(e);
            }
        };

        let response = extract_text(&raw);
        self.audit.info(&format!("RESPONSE: {}", response));

        if use_cache {
            // Reload rather than reuse the pre-call snapshot to narrow the
            // window for clobbering a concurrent writer.
            let mut entries = self.load_store();
            entries.insert(prompt.to_string(), response.clone());
            if let Err(e) = self.store.save(&entries) {
                self.audit.warn(&format!("Failed to save cache: {}", e));
                warn!("Failed to save cache: {}", e);
            }
        }

        Ok(response)
    }

    /// Dynamically-typed entry point mirroring [`Self::call`].
    ///
    /// Anything but a JSON string fails with `InvalidArgument` before any
    /// logging, store access, or network I/O.
    pub async fn call_value(&self, prompt: &Value, use_cache: bool) -> Result<String> {
        match prompt.as_str() {
            Some(text) => self.call(text, use_cache).await,
            None => Err(MemoError::InvalidArgument(
                "prompt must be a string".to_string(),
            )),
        }
    }

    fn load_store(&self) -> HashMap<String, String> {
        match self.store.load() {
            Ok(entries) => entries,
            Err(e) => {
                self.audit
                    .warn("Failed to load cache - starting with an empty cache");
                warn!("Failed to load cache: {}", e);
                HashMap::new()
            }
        }
    }
}
