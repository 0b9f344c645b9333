//! Persistent prompt/response store.
//!
//! A flat prompt→response map, loaded in full per lookup and rewritten in
//! full on every insert. Keys are verbatim prompt text. No TTL, no
//! eviction, no locking: concurrent writers race and the last successful
//! writer wins.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::collections::HashMap;

use crate::error::Result;

/// Key-value capability backing the response cache.
///
/// Implementations are stateless between calls: `load` re-derives the
/// current contents from the backing medium each time.
pub trait PromptStore: Send + Sync {
    /// Load the full store.
    ///
    /// A missing backing file is an empty store (`Ok`); a corrupt or
    /// unreadable one is an error the caller may degrade to a warning.
    fn load(&self) -> Result<HashMap<String, String>>;

    /// Persist the full store, replacing any previous contents.
    fn save(&self, entries: &HashMap<String, String>) -> Result<()>;
}
