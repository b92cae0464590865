//! Configuration — optional `.darkrelm.toml` with built-in defaults.

pub mod settings;

pub use settings::{AuditBackend, Settings};
