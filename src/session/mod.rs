//! Session module — the single authenticated run of the program.
//!
//! This module provides:
//! - `PasswordGate` and single-use `Authorization` tokens (`gate`)
//! - `SessionTracker`, the ordered set of session artifacts (`tracker`)
//! - The logout sweep (`cleanup`)
//! - `SessionContext`, which ties the user, gate, audit log and tracker
//!   together and is handed by `&mut` to every component that mutates

pub mod cleanup;
pub mod gate;
pub mod tracker;

use zeroize::Zeroizing;

use crate::audit::{AuditEntry, AuditLog};
use crate::errors::Result;

pub use cleanup::CleanupOutcome;
pub use gate::{Authorization, PasswordGate};
pub use tracker::SessionTracker;

/// State of one logged-in session.
pub struct SessionContext {
    username: String,
    gate: PasswordGate,
    audit: AuditLog,
    tracker: SessionTracker,
}

impl SessionContext {
    /// Start a session for `username` with the secret entered at login.
    pub fn new(username: &str, secret: Zeroizing<String>, audit: AuditLog) -> Self {
        Self {
            username: username.to_string(),
            gate: PasswordGate::new(secret),
            audit,
            tracker: SessionTracker::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Re-check a freshly entered secret before a gated action.
    pub fn authorize(&self, candidate: &str) -> Result<Authorization> {
        self.gate.authorize(candidate)
    }

    /// Append an audit entry for this user.
    ///
    /// Fire-and-forget: a write failure is logged and swallowed, the
    /// action it describes has already happened. The history file
    /// becomes a session artifact once written.
    pub fn record(&mut self, description: &str) {
        match self.audit.append(description, &self.username) {
            Ok(_) => {
                let path = self.audit.path().to_path_buf();
                self.tracker.register(path);
            }
            Err(e) => {
                tracing::warn!(error = %e, action = description, "audit entry not recorded");
            }
        }
    }

    /// Full audit history in recorded order.
    pub fn history(&self) -> Result<Vec<AuditEntry>> {
        self.audit.read_all()
    }

    pub fn tracker(&self) -> &SessionTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut SessionTracker {
        &mut self.tracker
    }

    /// Run the logout sweep over everything tracked so far.
    pub fn cleanup(&mut self) -> Vec<CleanupOutcome> {
        cleanup::run(&mut self.tracker)
    }
}
