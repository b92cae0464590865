//! Audit log — persisted history of every recorded session action.
//!
//! Each entry is stored as one formatted line:
//! `"<YYYY-MM-DD HH:MM:SS> - <username>: <description>"`.
//! The storage layout (whole JSON array or JSON lines) is chosen by
//! `Settings::audit_backend`; callers only see `append` and `read_all`.

pub mod storage;

use std::fmt;
use std::path::Path;

use chrono::{Local, NaiveDateTime};

use crate::errors::Result;

pub use storage::{open_storage, AuditStorage, JsonArrayStorage, JsonLinesStorage};

/// Timestamp layout used in every stored line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single audit log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub timestamp: NaiveDateTime,
    pub username: String,
    pub description: String,
}

impl AuditEntry {
    /// Build an entry stamped with the current local time.
    pub fn now(username: &str, description: &str) -> Self {
        Self {
            timestamp: Local::now().naive_local(),
            username: username.to_string(),
            description: description.to_string(),
        }
    }

    /// Parse a stored line back into an entry.
    ///
    /// The username is everything up to the first `": "`, so descriptions
    /// may contain colons but usernames may not contain `": "`.
    pub fn parse(line: &str) -> Option<Self> {
        let (ts, rest) = line.split_once(" - ")?;
        let timestamp = NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok()?;
        let (username, description) = rest.split_once(": ")?;

        Some(Self {
            timestamp,
            username: username.to_string(),
            description: description.to_string(),
        })
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.username,
            self.description
        )
    }
}

/// The session's audit trail.
pub struct AuditLog {
    storage: Box<dyn AuditStorage>,
}

impl AuditLog {
    pub fn new(storage: Box<dyn AuditStorage>) -> Self {
        Self { storage }
    }

    /// Record `description` for `username` with a fresh timestamp.
    pub fn append(&self, description: &str, username: &str) -> Result<AuditEntry> {
        let entry = AuditEntry::now(username, description);
        self.storage.append(&entry.to_string())?;
        Ok(entry)
    }

    /// Every entry in recorded order, or empty if nothing was logged yet.
    ///
    /// Lines that don't match the entry layout (hand-edited files) are
    /// skipped rather than failing the whole read.
    pub fn read_all(&self) -> Result<Vec<AuditEntry>> {
        let lines = self.storage.load()?;
        Ok(lines
            .iter()
            .filter_map(|line| {
                let parsed = AuditEntry::parse(line);
                if parsed.is_none() {
                    tracing::warn!(line = %line, "skipping malformed history line");
                }
                parsed
            })
            .collect())
    }

    /// Path to the history file (tracked for removal at logout).
    pub fn path(&self) -> &Path {
        self.storage.path()
    }
}
