//! Vault module — the password-gated directory.
//!
//! This module provides:
//! - `VaultEntry`, `EntryKind` and the `list_directory` / `remove_item`
//!   helpers (`entry`)
//! - `VaultStore` for creating, viewing, deleting and importing items (`store`)

pub mod entry;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{list_directory, remove_item, EntryKind, VaultEntry};
pub use store::{ImportReport, VaultStore};
