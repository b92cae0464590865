use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{DarkRelmError, Result};

/// Which on-disk layout the audit history uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditBackend {
    /// A single JSON array, rewritten in full on every append.
    JsonArray,
    /// One JSON string per line, appended in place.
    JsonLines,
}

/// Session configuration, loaded from `.darkrelm.toml`.
///
/// Every field has a default, and the defaults reproduce the classic
/// DarkRelm layout, so no config file is needed at all.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Vault directory name, relative to the working directory at startup.
    #[serde(default = "default_vault_dir")]
    pub vault_dir: String,

    /// File name of the audit history, relative to the working directory.
    #[serde(default = "default_history_file")]
    pub history_file: String,

    /// Storage layout for the audit history.
    #[serde(default = "default_audit_backend")]
    pub audit_backend: AuditBackend,

    /// Extensions (without the dot) that "import downloads" never moves.
    #[serde(default = "default_import_skip_extensions")]
    pub import_skip_extensions: Vec<String>,

    /// File name used by `download` when the URL has no path segment.
    #[serde(default = "default_download_fallback_name")]
    pub download_fallback_name: String,

    /// The file these settings were read from, if any.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_dir() -> String {
    "dark-relm-vault".to_string()
}

fn default_history_file() -> String {
    "darkrelm_history.json".to_string()
}

fn default_audit_backend() -> AuditBackend {
    AuditBackend::JsonArray
}

fn default_import_skip_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_download_fallback_name() -> String {
    "downloaded_file".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_dir: default_vault_dir(),
            history_file: default_history_file(),
            audit_backend: default_audit_backend(),
            import_skip_extensions: default_import_skip_extensions(),
            download_fallback_name: default_download_fallback_name(),
            source: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    pub const FILE_NAME: &'static str = ".darkrelm.toml";

    /// Load settings from `<dir>/.darkrelm.toml`, or defaults if absent.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_file(&dir.join(Self::FILE_NAME))
    }

    /// Load settings from an explicit file path.
    ///
    /// A missing file yields defaults; a file that exists but cannot be
    /// parsed is an error.
    pub fn load_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;

        let mut settings: Settings = toml::from_str(&contents).map_err(|e| {
            DarkRelmError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.vault_dir.trim().is_empty() {
            return Err(DarkRelmError::Config("vault_dir cannot be empty".into()));
        }
        if settings.history_file.trim().is_empty() {
            return Err(DarkRelmError::Config("history_file cannot be empty".into()));
        }

        settings.source = Some(config_path.to_path_buf());
        Ok(settings)
    }

    /// Absolute vault root for a given working directory.
    pub fn vault_root(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.vault_dir)
    }

    /// Absolute audit history path for a given working directory.
    pub fn history_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.history_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
