//! On-disk layouts for the audit history.
//!
//! Both layouts store each entry as its formatted line, so a history
//! written by one can be read back exactly as recorded.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::AuditBackend;
use crate::errors::{DarkRelmError, Result};

/// Where and how audit lines are persisted.
pub trait AuditStorage {
    /// Path of the backing file.
    fn path(&self) -> &Path;

    /// Read every stored line in recorded order. A missing file is empty.
    fn load(&self) -> Result<Vec<String>>;

    /// Persist one more line after all existing ones.
    fn append(&self, line: &str) -> Result<()>;
}

/// Build the storage selected in the settings.
pub fn open_storage(backend: AuditBackend, path: PathBuf) -> Box<dyn AuditStorage> {
    match backend {
        AuditBackend::JsonArray => Box::new(JsonArrayStorage::new(path)),
        AuditBackend::JsonLines => Box::new(JsonLinesStorage::new(path)),
    }
}

// ---------------------------------------------------------------------------
// JSON array (read-modify-write)
// ---------------------------------------------------------------------------

/// A single JSON array of strings, rewritten wholesale on every append.
pub struct JsonArrayStorage {
    path: PathBuf,
}

impl JsonArrayStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AuditStorage for JsonArrayStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            DarkRelmError::Serialization(format!("{}: {e}", self.path.display()))
        })
    }

    fn append(&self, line: &str) -> Result<()> {
        let mut lines = self.load()?;
        lines.push(line.to_string());

        let buf = serde_json::to_vec(&lines)
            .map_err(|e| DarkRelmError::Serialization(format!("history: {e}")))?;

        replace_file(&self.path, &buf)
    }
}

/// Write `buf` to a sibling temp file, then rename it over `path`.
/// The temp file never outlives a failed write or rename.
fn replace_file(path: &Path, buf: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let result = fs::write(&tmp_path, buf).and_then(|()| fs::rename(&tmp_path, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// JSON lines (true append)
// ---------------------------------------------------------------------------

/// One JSON-encoded string per line; appends never rewrite earlier lines.
pub struct JsonLinesStorage {
    path: PathBuf,
}

impl JsonLinesStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AuditStorage for JsonLinesStorage {
    fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<String>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        contents
            .lines()
            .filter(|l| !l.trim().is_empty())
            .enumerate()
            .map(|(i, l)| {
                serde_json::from_str::<String>(l).map_err(|e| {
                    DarkRelmError::Serialization(format!(
                        "{} line {}: {e}",
                        self.path.display(),
                        i + 1
                    ))
                })
            })
            .collect()
    }

    fn append(&self, line: &str) -> Result<()> {
        let encoded = serde_json::to_string(line)
            .map_err(|e| DarkRelmError::Serialization(format!("history: {e}")))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{encoded}")?;

        Ok(())
    }
}
