//! In-memory prompt store for tests and cache-less embedding.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use super::PromptStore;
use crate::error::Result;

/// Prompt store held entirely in memory.
///
/// Tracks how many times it was loaded and saved so tests can assert that
/// a code path never touched the store.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given contents.
    pub fn with_entries(entries: HashMap<String, String>) -> Self {
        Self {
            entries: Mutex::new(entries),
            ..Self::default()
        }
    }

    /// Current contents.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.lock().clone()
    }

    /// Number of `load` calls observed.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    /// Number of `save` calls observed.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PromptStore for MemoryStore {
    fn load(&self) -> Result<HashMap<String, String>> {
        self.loads.fetch_add(1, Ordering::Relaxed);
        Ok(self.lock().clone())
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        self.saves.fetch_add(1, Ordering::Relaxed);
        *self.lock() = entries.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_save_round_trip() {
        let store = MemoryStore::new();
        let mut data = HashMap::new();
        data.insert("p".to_string(), "r".to_string());
        store.save(&data).unwrap();
        assert_eq!(store.load().unwrap(), data);
    }

    #[test]
    fn test_counters_track_operations() {
        let store = MemoryStore::new();
        let _ = store.load();
        let _ = store.load();
        let _ = store.save(&HashMap::new());
        assert_eq!(store.load_count(), 2);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_with_entries_seeds_contents() {
        let mut data = HashMap::new();
        data.insert("2+2=".to_string(), "4".to_string());
        let store = MemoryStore::with_entries(data);
        assert_eq!(
            store.load().unwrap().get("2+2=").map(String::as_str),
            Some("4")
        );
    }
}
