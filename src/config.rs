//! Environment-sourced configuration.
//!
//! Everything the client needs is carried in an explicit [`Config`] value
//! rather than read from ambient process state, so tests can substitute
//! values without mutating the environment.

use std::path::PathBuf;

/// Model invoked when `GEMINI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-exp";

/// Audit log directory when `LOG_DIR` is not set.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Prompt store path when `LLM_CACHE_FILE` is not set.
pub const DEFAULT_CACHE_PATH: &str = "llm_cache.json";

/// Configuration for [`crate::MemoizedClient`].
#[derive(Debug, Clone)]
pub struct Config {
    /// API credential. `None` means remote calls fail with a
    /// configuration error; cached prompts still resolve.
    pub api_key: Option<String>,
    /// Model identifier passed to the `generateContent` endpoint.
    pub model: String,
    /// Directory receiving the per-day audit log files.
    pub log_dir: PathBuf,
    /// Path of the JSON prompt store.
    pub cache_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::resolve(None, None, None, None)
    }
}

impl Config {
    /// Load from a `.env` file (if present) and the process environment.
    ///
    /// Recognized variables: `GEMINI_API_KEY`, `GEMINI_MODEL`, `LOG_DIR`,
    /// `LLM_CACHE_FILE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::resolve(
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("GEMINI_MODEL").ok(),
            std::env::var("LOG_DIR").ok(),
            std::env::var("LLM_CACHE_FILE").ok(),
        )
    }

    /// Resolve a config from explicit values, applying defaults.
    ///
    /// Empty and whitespace-only strings count as unset, so a blank
    /// `GEMINI_API_KEY=` line in `.env` does not look like a credential.
    pub fn resolve(
        api_key: Option<String>,
        model: Option<String>,
        log_dir: Option<String>,
        cache_path: Option<String>,
    ) -> Self {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };
        Self {
            api_key: clean(api_key),
            model: clean(model).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            log_dir: clean(log_dir)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            cache_path: clean(cache_path)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH)),
        }
    }
}
