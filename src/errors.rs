use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in DarkRelm.
#[derive(Debug, Error)]
pub enum DarkRelmError {
    // --- Session errors ---
    #[error("Incorrect password, access denied!")]
    AccessDenied,

    // --- Vault errors ---
    #[error("{0} not found in vault")]
    NotFound(String),

    #[error("Invalid item name '{0}': names must stay inside the vault")]
    InvalidName(String),

    // --- Shell errors ---
    #[error("Invalid directory '{path}': {reason}")]
    InvalidDirectory { path: String, reason: String },

    #[error("Download failed: {0}")]
    Download(String),

    #[error("{program} failed: {reason}")]
    Subprocess { program: String, reason: String },

    // --- Cleanup errors ---
    #[error("Error deleting {}: {reason}", path.display())]
    CleanupItem { path: PathBuf, reason: String },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- Prompt errors ---
    #[error("Prompt failed: {0}")]
    Prompt(String),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for DarkRelm results.
pub type Result<T> = std::result::Result<T, DarkRelmError>;
