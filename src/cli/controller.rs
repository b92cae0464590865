//! The session controller — login, the menu loop, and logout.
//!
//! ```text
//! login ──▶ MenuLoop ──choice──▶ ExecutingChoice ──▶ MenuLoop ...
//!              │
//!              └──logout──▶ CleaningUp ──▶ Terminated
//! ```
//!
//! Errors from a choice are shown as one line and the loop continues.

use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::audit::{open_storage, AuditLog};
use crate::config::Settings;
use crate::errors::Result;
use crate::session::{Authorization, SessionContext};
use crate::shell::{show_listing, UnderworldShell};
use crate::vault::VaultStore;

use super::menu::{show_menu, MenuChoice};
use super::terminal::{Line, Terminal};

/// Where the controller is in the session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    MenuLoop,
    ExecutingChoice,
    CleaningUp,
    Terminated,
}

/// Owns the one authenticated session and drives every component.
pub struct SessionController {
    state: SessionState,
    store: VaultStore,
    shell: UnderworldShell,
    ctx: SessionContext,
    /// Working directory at startup; downloads are imported from here.
    home: PathBuf,
}

impl SessionController {
    /// Prompt once for username and secret, then set up the vault.
    pub fn login(
        term: &mut dyn Terminal,
        settings: &Settings,
        home: &Path,
        shell: UnderworldShell,
    ) -> Result<Self> {
        term.show(Line::heading("--- Login ---"));
        let username = term.read_line("Enter username")?;
        let secret = Zeroizing::new(term.read_secret("Set your vault password")?);
        term.show(Line::success(format!("Logged in as {username}")));

        let audit = AuditLog::new(open_storage(
            settings.audit_backend,
            settings.history_path(home),
        ));
        let mut ctx = SessionContext::new(&username, secret, audit);

        let store = VaultStore::from_settings(settings, home);
        if store.initialize(&mut ctx)? {
            term.show(Line::success(format!(
                "Vault '{}' created!",
                settings.vault_dir
            )));
        }
        tracing::info!(user = %username, root = %store.root().display(), "session started");

        Ok(Self {
            state: SessionState::MenuLoop,
            store,
            shell,
            ctx,
            home: home.to_path_buf(),
        })
    }

    /// Show the menu and handle choices until logout.
    pub fn run(&mut self, term: &mut dyn Terminal) {
        while self.state != SessionState::Terminated {
            self.step(term);
        }
    }

    /// One menu round: show options, read a choice, handle it.
    ///
    /// If input can no longer be read, the session logs out so that
    /// its artifacts are still cleaned up.
    pub fn step(&mut self, term: &mut dyn Terminal) {
        show_menu(term);
        match term.read_line("Choose an action (1-9)") {
            Ok(input) => self.handle_input(term, &input),
            Err(e) => {
                tracing::warn!(error = %e, "menu input closed");
                term.show(Line::warning("Input closed, logging out."));
                self.logout(term);
            }
        }
    }

    /// Dispatch one line of menu input.
    pub fn handle_input(&mut self, term: &mut dyn Terminal, input: &str) {
        let Some(choice) = MenuChoice::parse(input) else {
            term.show(Line::error("Invalid choice, try again."));
            return;
        };

        if choice == MenuChoice::Logout {
            self.logout(term);
            return;
        }

        self.state = SessionState::ExecutingChoice;
        if let Err(e) = self.execute(term, choice) {
            term.show(Line::error(e.to_string()));
        }
        self.state = SessionState::MenuLoop;
    }

    fn execute(&mut self, term: &mut dyn Terminal, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::CreateFolder => {
                let auth = self.authorize(term)?;
                let name = term.read_line("Enter folder name")?;
                self.store.create_folder(auth, &mut self.ctx, &name)?;
                term.show(Line::success(format!("Folder '{name}' created in vault!")));
            }
            MenuChoice::CreateFile => {
                let auth = self.authorize(term)?;
                let name = term.read_line("Enter file name (e.g., secret.txt)")?;
                let content = term.read_line("Enter file content")?;
                self.store.create_file(auth, &mut self.ctx, &name, &content)?;
                term.show(Line::success(format!("File '{name}' created in vault!")));
            }
            MenuChoice::DeleteItem => {
                let auth = self.authorize(term)?;
                let name = term.read_line("Enter file/folder name to delete")?;
                let kind = self.store.delete_item(auth, &mut self.ctx, &name)?;
                term.show(Line::success(format!(
                    "{} '{name}' deleted from vault!",
                    kind.label()
                )));
            }
            MenuChoice::ViewVault => {
                if !self.store.root().is_dir() {
                    term.show(Line::error("Vault not found! Initializing..."));
                    self.store.initialize(&mut self.ctx)?;
                }
                show_listing(term, "--- Vault Contents ---", self.store.root());
            }
            MenuChoice::ViewFile => {
                let auth = self.authorize(term)?;
                let name = term.read_line("Enter file name to view")?;
                let content = self.store.view_file(auth, &mut self.ctx, &name)?;
                term.show(Line::heading(format!("--- Contents of {name} ---")));
                term.show(Line::plain(content));
            }
            MenuChoice::ImportDownloads => {
                let auth = self.authorize(term)?;
                let report = self
                    .store
                    .import_external_items(auth, &mut self.ctx, &self.home)?;
                if report.moved.is_empty() && report.failed.is_empty() {
                    term.show(Line::info("Nothing to move."));
                }
                for name in &report.moved {
                    term.show(Line::success(format!("Moved '{name}' to vault!")));
                }
                for (name, e) in &report.failed {
                    term.show(Line::error(format!("Could not move '{name}': {e}")));
                }
            }
            MenuChoice::EnterShell => {
                let auth = self.authorize(term)?;
                self.shell.run(auth, &mut self.ctx, term)?;
            }
            MenuChoice::ViewHistory => {
                let entries = self.ctx.history()?;
                term.show(Line::heading("--- History ---"));
                if entries.is_empty() {
                    term.show(Line::plain("No history yet."));
                } else {
                    term.show_history(&entries);
                }
            }
            MenuChoice::Logout => self.logout(term),
        }
        Ok(())
    }

    /// Re-prompt for the secret and check it against the session's.
    fn authorize(&self, term: &mut dyn Terminal) -> Result<Authorization> {
        let candidate = Zeroizing::new(term.read_secret("Re-enter your vault password")?);
        self.ctx.authorize(&candidate)
    }

    /// Record the logout, sweep every tracked artifact, and terminate.
    fn logout(&mut self, term: &mut dyn Terminal) {
        self.state = SessionState::CleaningUp;
        self.ctx.record("Logged out");

        term.show(Line::warning("Cleaning up all traces..."));
        for outcome in self.ctx.cleanup() {
            if outcome.is_failure() {
                term.show(Line::error(outcome.message()));
            } else {
                term.show(Line::info(outcome.message()));
            }
        }
        term.show(Line::warning("All traces removed!"));
        term.show(Line::success("Goodbye!"));

        tracing::info!(user = %self.ctx.username(), "session terminated");
        self.state = SessionState::Terminated;
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    pub fn store(&self) -> &VaultStore {
        &self.store
    }
}
