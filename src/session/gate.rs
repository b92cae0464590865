//! Password gate — re-authentication before every gated action.
//!
//! The stored secret is compared byte-for-byte in plaintext. It is not
//! hashed and the comparison is not constant-time; the vault is a
//! role-play, not a secrets store. Zeroizing only wipes the copy in
//! memory when the session ends.

use zeroize::Zeroizing;

use crate::errors::{DarkRelmError, Result};

/// Proof that the secret was re-entered correctly for one action.
///
/// Only `PasswordGate::authorize` can create one, and gated operations
/// take it by value, so each approval covers exactly one call.
#[derive(Debug)]
#[must_use = "an authorization is only useful when passed to a gated operation"]
pub struct Authorization {
    _private: (),
}

/// Holds the session secret captured at login.
pub struct PasswordGate {
    secret: Zeroizing<String>,
}

impl PasswordGate {
    pub fn new(secret: Zeroizing<String>) -> Self {
        Self { secret }
    }

    /// Whether `candidate` matches the stored secret exactly.
    pub fn verify(&self, candidate: &str) -> bool {
        candidate.as_bytes() == self.secret.as_bytes()
    }

    /// Turn a correct candidate into a single-use `Authorization`.
    pub fn authorize(&self, candidate: &str) -> Result<Authorization> {
        if self.verify(candidate) {
            Ok(Authorization { _private: () })
        } else {
            Err(DarkRelmError::AccessDenied)
        }
    }
}
