//! Shared helpers for the integration tests: a scripted terminal, fake
//! shell capabilities, and a lock for tests that move the process cwd.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Mutex, MutexGuard};

use darkrelm::audit::{open_storage, AuditLog};
use darkrelm::cli::{Line, Terminal, Tone};
use darkrelm::config::Settings;
use darkrelm::errors::{DarkRelmError, Result};
use darkrelm::session::SessionContext;
use darkrelm::shell::{CommandOutput, Executor, Fetcher, UnderworldShell};
use darkrelm::vault::VaultStore;
use zeroize::Zeroizing;

pub const USER: &str = "neo";
pub const SECRET: &str = "follow-the-white-rabbit";

// ---------------------------------------------------------------------------
// Scripted terminal
// ---------------------------------------------------------------------------

/// Answers prompts from a fixed script and records everything shown.
/// Once the script runs out, every read fails like a closed stdin.
#[derive(Default)]
pub struct ScriptedTerminal {
    inputs: VecDeque<String>,
    pub lines: Vec<Line>,
    pub prompts: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn texts(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }

    pub fn errors(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|l| l.tone == Tone::Error)
            .map(|l| l.text.as_str())
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }

    fn next(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| DarkRelmError::Prompt("script exhausted".into()))
    }
}

impl Terminal for ScriptedTerminal {
    fn show(&mut self, line: Line) {
        self.lines.push(line);
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt)
    }
}

// ---------------------------------------------------------------------------
// Fake capabilities
// ---------------------------------------------------------------------------

/// Serves a fixed body for every URL, or fails when `body` is `None`.
pub struct FakeFetcher {
    pub body: Option<Vec<u8>>,
    pub requested: Rc<RefCell<Vec<String>>>,
}

impl Fetcher for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.requested.borrow_mut().push(url.to_string());
        self.body
            .clone()
            .ok_or_else(|| DarkRelmError::Download(format!("{url}: unreachable")))
    }
}

/// Returns canned output for every program, or fails to spawn.
pub struct FakeExecutor {
    pub output: Option<CommandOutput>,
    pub calls: Rc<RefCell<Vec<(String, Vec<String>)>>>,
}

impl Executor for FakeExecutor {
    fn execute(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.calls
            .borrow_mut()
            .push((program.to_string(), args.to_vec()));
        self.output.clone().ok_or_else(|| DarkRelmError::Subprocess {
            program: program.to_string(),
            reason: "No such file or directory".into(),
        })
    }
}

/// Handles onto what the fakes saw.
pub struct FakeLog {
    pub requested: Rc<RefCell<Vec<String>>>,
    pub calls: Rc<RefCell<Vec<(String, Vec<String>)>>>,
}

/// A shell backed by fakes.
pub fn fake_shell(
    body: Option<Vec<u8>>,
    output: Option<CommandOutput>,
) -> (UnderworldShell, FakeLog) {
    let requested = Rc::new(RefCell::new(Vec::new()));
    let calls = Rc::new(RefCell::new(Vec::new()));
    let shell = UnderworldShell::new(
        Box::new(FakeExecutor {
            output,
            calls: Rc::clone(&calls),
        }),
        Box::new(FakeFetcher {
            body,
            requested: Rc::clone(&requested),
        }),
        Settings::default().download_fallback_name,
    );
    (shell, FakeLog { requested, calls })
}

// ---------------------------------------------------------------------------
// Session helpers
// ---------------------------------------------------------------------------

/// A logged-in session rooted at `home` with default settings.
pub fn new_session(home: &Path) -> (VaultStore, SessionContext) {
    let settings = Settings::default();
    let audit = AuditLog::new(open_storage(
        settings.audit_backend,
        settings.history_path(home),
    ));
    let mut ctx = SessionContext::new(USER, Zeroizing::new(SECRET.to_string()), audit);
    let store = VaultStore::from_settings(&settings, home);
    store.initialize(&mut ctx).expect("initialize vault");
    (store, ctx)
}

/// Number of audit entries recorded so far.
pub fn history_len(ctx: &SessionContext) -> usize {
    ctx.history().expect("read history").len()
}

// ---------------------------------------------------------------------------
// Working-directory lock
// ---------------------------------------------------------------------------

static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Serialise tests that change the process working directory.
pub fn cwd_lock() -> MutexGuard<'static, ()> {
    CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Holds the cwd lock with the process inside `dir`; restores the
/// previous directory on drop.
pub struct CwdGuard {
    previous: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

pub fn enter_dir(dir: &Path) -> CwdGuard {
    let lock = cwd_lock();
    let previous = std::env::current_dir().expect("current dir");
    std::env::set_current_dir(dir).expect("enter test dir");
    CwdGuard {
        previous,
        _lock: lock,
    }
}

/// The process cwd, canonicalized for comparison with temp paths.
pub fn cwd() -> PathBuf {
    std::env::current_dir()
        .and_then(|p| p.canonicalize())
        .expect("current dir")
}
