//! JSON-file-backed prompt store with atomic replace-on-save.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::PromptStore;
use crate::error::{MemoError, Result};

/// Single JSON object at `path`, rewritten in full on every save.
///
/// Saves write to a temp file in the target's directory and rename it
/// into place, so a crash mid-write never leaves a truncated store
/// visible to readers. The temp file must share a filesystem with the
/// target for the rename to stay atomic, hence `new_in` the parent.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl PromptStore for JsonFileStore {
    fn load(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                MemoError::Store(format!(
                    "cache file {} is corrupt: {}",
                    self.path.display(),
                    e
                ))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(MemoError::Store(format!(
                "failed to read cache file {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        let parent = self.parent_dir();
        std::fs::create_dir_all(&parent)?;
        let tmp = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(tmp.as_file(), entries)
            .map_err(|e| MemoError::Store(format!("failed to serialize cache: {}", e)))?;
        tmp.persist(&self.path).map_err(|e| MemoError::Io(e.error))?;
        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Saved prompt store"
        );
        Ok(())
    }
}
