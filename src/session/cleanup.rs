//! Logout sweep — remove every artifact the session tracked.

use std::fs;
use std::path::PathBuf;

use crate::errors::DarkRelmError;
use crate::vault::{remove_item, EntryKind};

use super::SessionTracker;

/// What happened to one tracked path during the sweep.
#[derive(Debug)]
pub enum CleanupOutcome {
    Removed { path: PathBuf, kind: EntryKind },
    Failed(DarkRelmError),
}

impl CleanupOutcome {
    /// One display line describing the outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Removed { path, kind } => format!("Deleted {}: {}", kind.noun(), path.display()),
            Self::Failed(e) => e.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Delete every tracked path that still exists, in insertion order, then
/// clear the tracker.
///
/// A failure on one path is reported and the sweep moves on. Paths that
/// are already gone (for example children of a removed folder) are
/// skipped without a report, so a second run on the cleared tracker is a
/// no-op.
pub fn run(tracker: &mut SessionTracker) -> Vec<CleanupOutcome> {
    let mut report = Vec::new();

    for path in tracker.all() {
        if fs::symlink_metadata(path).is_err() {
            continue;
        }

        match remove_item(path) {
            Ok(kind) => {
                tracing::debug!(path = %path.display(), "removed session artifact");
                report.push(CleanupOutcome::Removed {
                    path: path.clone(),
                    kind,
                });
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not remove session artifact");
                report.push(CleanupOutcome::Failed(DarkRelmError::CleanupItem {
                    path: path.clone(),
                    reason: e.to_string(),
                }));
            }
        }
    }

    tracker.clear();
    report
}
