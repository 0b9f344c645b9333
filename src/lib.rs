//! Memoizing client for the Gemini text-generation API.
//!
//! Given a prompt, [`MemoizedClient::call`] returns a response, serving
//! exact-prompt repeats from a persistent JSON store and delegating to
//! the Gemini `generateContent` endpoint otherwise. The store is a flat
//! prompt→response map rewritten atomically on every update; corrupt or
//! unwritable stores degrade to logged warnings, never failures. Every
//! prompt and outcome lands in a per-day audit log file.
//!
//! ```no_run
//! use memogen::{Config, MemoizedClient};
//!
//! # async fn run() -> memogen::Result<()> {
//! let client = MemoizedClient::from_config(&Config::from_env());
//! let answer = client.call("2+2=", true).await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod client;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod providers;
pub mod store;

pub use client::MemoizedClient;
pub use config::Config;
pub use error::{MemoError, Result};

/// Install a global `tracing` subscriber honoring `RUST_LOG`.
///
/// Optional convenience for embedders; the audit log of [`audit`] is
/// independent of this and always active. Safe to call more than once —
/// later calls are no-ops.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
