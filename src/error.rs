//! Crate-wide error taxonomy.
//!
//! Only three kinds are fatal to a call: [`MemoError::InvalidArgument`],
//! [`MemoError::Config`], and [`MemoError::Provider`]. Store failures are
//! surfaced as `Err` by the [`crate::store::PromptStore`] trait but are
//! absorbed inside the client and degraded to audit-log warnings.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MemoError>;

/// Errors produced by the memoized call client and its collaborators.
#[derive(Debug, Error)]
pub enum MemoError {
    /// The prompt was not a text value. Raised before any logging or I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Required configuration is missing, e.g. the API credential.
    /// Raised before any network attempt.
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote text-generation service failed: transport error,
    /// non-success HTTP status, or an unparseable payload. There is no
    /// automatic retry; callers retry the whole call if they want one.
    #[error("provider error: {0}")]
    Provider(String),

    /// The prompt store's backing file is corrupt or unreadable.
    /// Never escapes `call`; the client treats it as an empty store.
    #[error("store error: {0}")]
    Store(String),

    /// Filesystem failure while persisting the prompt store.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
