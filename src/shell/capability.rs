//! Narrow capabilities the shell needs from the outside world.
//!
//! Commands and URLs are passed through uninspected. Any allow-listing
//! or sandboxing belongs in an implementation of these traits, not in
//! the shell's dispatch.

use std::process::Command;

use crate::errors::{DarkRelmError, Result};

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, or `None` if the child was killed by a signal.
    pub status: Option<i32>,
}

/// Runs an external program and captures its output.
pub trait Executor {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput>;
}

/// Retrieves the full body behind a URL.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Spawns real processes directly, without a shell in between.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| DarkRelmError::Subprocess {
                program: program.to_string(),
                reason: e.to_string(),
            })?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}

/// Blocking HTTP(S) GET via `ureq`. No timeout and no body size cap.
#[derive(Debug, Default)]
pub struct HttpFetcher;

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut response = ureq::get(url)
            .call()
            .map_err(|e| DarkRelmError::Download(format!("{url}: {e}")))?;

        response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(|e| DarkRelmError::Download(format!("{url}: {e}")))
    }
}
