//! Append-only audit log of prompts and outcomes.
//!
//! One file per day, named `llm_calls_YYYYMMDD.log`, with lines of the
//! form `YYYY-MM-DD HH:MM:SS - LEVEL - MESSAGE`. The format is pinned:
//! downstream tooling greps these files. Diagnostic logging for operators
//! goes through `tracing` instead and is free to change shape.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tracing::warn;

/// Severity recorded on an audit line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditLevel {
    Info,
    Warning,
    Error,
}

impl fmt::Display for AuditLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        })
    }
}

/// Logging collaborator of the memoized client.
///
/// Failures inside a sink must never fail the call that produced the
/// entry; sinks are best-effort by contract.
pub trait AuditSink: Send + Sync {
    fn log(&self, level: AuditLevel, message: &str);

    fn info(&self, message: &str) {
        self.log(AuditLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(AuditLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(AuditLevel::Error, message);
    }
}

/// File sink appending to one log file per day under `dir`.
pub struct DailyLogFile {
    dir: PathBuf,
}

impl DailyLogFile {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of today's log file.
    pub fn current_path(&self) -> PathBuf {
        self.dir
            .join(format!("llm_calls_{}.log", Local::now().format("%Y%m%d")))
    }

    fn format_line(level: AuditLevel, message: &str) -> String {
        format!(
            "{} - {} - {}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            level,
            message
        )
    }

    fn append(&self, level: AuditLevel, message: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.current_path())?;
        writeln!(file, "{}", Self::format_line(level, message))
    }
}

impl AuditSink for DailyLogFile {
    fn log(&self, level: AuditLevel, message: &str) {
        if let Err(e) = self.append(level, message) {
            warn!("Audit log append failed: {}", e);
        }
    }
}

/// Recording sink for tests.
#[derive(Default)]
pub struct MemoryAudit {
    entries: Mutex<Vec<(AuditLevel, String)>>,
}

impl MemoryAudit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything logged so far, in order.
    pub fn entries(&self) -> Vec<(AuditLevel, String)> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// True if any entry at `level` contains `needle`.
    pub fn contains(&self, level: AuditLevel, needle: &str) -> bool {
        self.entries()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl AuditSink for MemoryAudit {
    fn log(&self, level: AuditLevel, message: &str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_file_name_embeds_date() {
        let sink = DailyLogFile::new("logs");
        let name = sink
            .current_path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert!(name.starts_with("llm_calls_"));
        assert!(name.ends_with(".log"));
        // llm_calls_ + YYYYMMDD + .log
        assert_eq!(name.len(), "llm_calls_".len() + 8 + ".log".len());
    }

    #[test]
    fn test_line_format() {
        let line = DailyLogFile::format_line(AuditLevel::Warning, "Failed to load cache");
        // "YYYY-MM-DD HH:MM:SS - WARNING - Failed to load cache"
        assert!(line.ends_with(" - WARNING - Failed to load cache"));
        let timestamp = &line[..19];
        assert_eq!(timestamp.len(), 19);
        assert_eq!(&timestamp[4..5], "-");
        assert_eq!(&timestamp[10..11], " ");
        assert_eq!(&timestamp[13..14], ":");
    }

    #[test]
    fn test_append_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DailyLogFile::new(dir.path().join("logs"));
        sink.info("PROMPT: hello");
        sink.error("LLM call failed: boom");
        let contents = std::fs::read_to_string(sink.current_path()).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" - INFO - PROMPT: hello"));
        assert!(lines[1].contains(" - ERROR - LLM call failed: boom"));
    }

    #[test]
    fn test_memory_audit_records_in_order() {
        let sink = MemoryAudit::new();
        sink.info("first");
        sink.warn("second");
        let entries = sink.entries();
        assert_eq!(entries[0], (AuditLevel::Info, "first".to_string()));
        assert_eq!(entries[1], (AuditLevel::Warning, "second".to_string()));
        assert!(sink.contains(AuditLevel::Warning, "sec"));
        assert!(!sink.contains(AuditLevel::Error, "first"));
    }

    #[test]
    fn test_level_display() {
        assert_eq!(AuditLevel::Info.to_string(), "INFO");
        assert_eq!(AuditLevel::Warning.to_string(), "WARNING");
        assert_eq!(AuditLevel::Error.to_string(), "ERROR");
    }
}
