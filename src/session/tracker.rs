//! In-memory record of paths created during the running session.

use std::path::{Path, PathBuf};

/// Ordered, duplicate-free set of session artifacts.
///
/// Never persisted: a crash mid-session leaves its artifacts behind.
#[derive(Debug, Default)]
pub struct SessionTracker {
    paths: Vec<PathBuf>,
}

impl SessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` unless it is already tracked. Returns whether it was added.
    pub fn register(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if self.contains(&path) {
            return false;
        }
        tracing::debug!(path = %path.display(), "tracking session artifact");
        self.paths.push(path);
        true
    }

    /// Forget `path` if tracked. Returns whether it was present.
    pub fn unregister(&mut self, path: &Path) -> bool {
        let before = self.paths.len();
        self.paths.retain(|p| p != path);
        before != self.paths.len()
    }

    /// Tracked paths in insertion order.
    pub fn all(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
