//! UnderWorld shell — the embedded command loop.
//!
//! Entered from the menu after a password check. Offers directory
//! navigation, listing, downloads and passthrough execution of `git`
//! and arbitrary programs. Effectful commands are audited and
//! downloads are tracked for removal at logout. On leaving, the
//! working directory in effect at entry is restored.

pub mod capability;
pub mod command;

use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::terminal::{Line, Terminal};
use crate::errors::{DarkRelmError, Result};
use crate::session::{Authorization, SessionContext};
use crate::vault::list_directory;

pub use capability::{CommandOutput, Executor, Fetcher, HttpFetcher, SystemExecutor};
pub use command::{filename_from_url, parse, ShellCommand};

/// Help text listed under the banner.
const COMMAND_HELP: &str =
    "Commands: ls (list), cd <dir>, download <url> [filename], git <command>, run <file>, pwd (current path)";

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// The shell and its outside-world capabilities.
pub struct UnderworldShell {
    executor: Box<dyn Executor>,
    fetcher: Box<dyn Fetcher>,
    download_fallback_name: String,
}

impl UnderworldShell {
    pub fn new(
        executor: Box<dyn Executor>,
        fetcher: Box<dyn Fetcher>,
        download_fallback_name: impl Into<String>,
    ) -> Self {
        Self {
            executor,
            fetcher,
            download_fallback_name: download_fallback_name.into(),
        }
    }

    /// A shell that spawns real processes and makes real HTTP requests.
    pub fn system(download_fallback_name: impl Into<String>) -> Self {
        Self::new(
            Box::new(SystemExecutor),
            Box::new(HttpFetcher),
            download_fallback_name,
        )
    }

    /// Run the interactive loop until `exit` or until input ends.
    pub fn run(
        &self,
        _auth: Authorization,
        ctx: &mut SessionContext,
        term: &mut dyn Terminal,
    ) -> Result<()> {
        let original_dir = std::env::current_dir()?;

        term.show_underworld();
        term.show(Line::info("Type 'exit' to return to main menu"));
        term.show(Line::info(COMMAND_HELP));

        let prompt = format!("UnderWorld@{}", ctx.username());
        loop {
            let line = match term.read_line(&prompt) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!(error = %e, "shell input closed");
                    break;
                }
            };
            if self.dispatch(ctx, term, &line) == Flow::Exit {
                break;
            }
        }

        std::env::set_current_dir(&original_dir).map_err(|e| DarkRelmError::InvalidDirectory {
            path: original_dir.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Execute one command line, showing its output or error.
    pub fn dispatch(
        &self,
        ctx: &mut SessionContext,
        term: &mut dyn Terminal,
        line: &str,
    ) -> Flow {
        let result = match parse(line) {
            ShellCommand::Empty => Ok(()),
            ShellCommand::Exit => return Flow::Exit,
            ShellCommand::List => list_current(term),
            ShellCommand::Pwd => std::env::current_dir().map_err(DarkRelmError::from).map(|cwd| {
                term.show(Line::plain(format!("Current path: {}", cwd.display())));
            }),
            ShellCommand::ChangeDir(dir) => self.change_directory(ctx, dir).map(|cwd| {
                term.show(Line::plain(format!("Changed to: {}", cwd.display())));
            }),
            ShellCommand::DownloadUsage => {
                term.show(Line::error("Usage: download <url> [filename]"));
                Ok(())
            }
            ShellCommand::Download { url, filename } => {
                self.download(ctx, url, filename).map(|path| {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    term.show(Line::success(format!("Downloaded {name}!")));
                })
            }
            ShellCommand::Git(args) => {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                self.git(ctx, &args).map(|out| show_output(term, &out))
            }
            ShellCommand::Run(program) => self
                .run_program(ctx, program)
                .map(|out| show_output(term, &out)),
            ShellCommand::Unknown(_) => {
                term.show(Line::error("Unknown command!"));
                Ok(())
            }
        };

        if let Err(e) = result {
            term.show(Line::error(e.to_string()));
        }
        Flow::Continue
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    /// Change the process working directory. Returns the new directory.
    pub fn change_directory(&self, ctx: &mut SessionContext, dir: &str) -> Result<PathBuf> {
        let invalid = |reason: String| DarkRelmError::InvalidDirectory {
            path: dir.to_string(),
            reason,
        };

        std::env::set_current_dir(Path::new(dir)).map_err(|e| invalid(e.to_string()))?;
        let cwd = std::env::current_dir().map_err(|e| invalid(e.to_string()))?;

        ctx.record(&format!("Changed directory to {}", cwd.display()));
        Ok(cwd)
    }

    /// Fetch `url` into `filename` (or a name derived from the URL),
    /// relative to the current directory. Returns the absolute path.
    pub fn download(
        &self,
        ctx: &mut SessionContext,
        url: &str,
        filename: Option<&str>,
    ) -> Result<PathBuf> {
        let filename =
            filename.unwrap_or_else(|| filename_from_url(url, &self.download_fallback_name));
        let full_path = std::env::current_dir()?.join(filename);

        let body = self.fetcher.fetch(url)?;
        fs::write(&full_path, body)
            .map_err(|e| DarkRelmError::Download(format!("{}: {e}", full_path.display())))?;

        ctx.record(&format!("Downloaded '{filename}' from {url}"));
        ctx.tracker_mut().register(full_path.clone());
        Ok(full_path)
    }

    /// Pass `args` through to `git`. A non-zero exit still counts as run.
    pub fn git(&self, ctx: &mut SessionContext, args: &[String]) -> Result<CommandOutput> {
        let out = self.executor.execute("git", args)?;
        ctx.record(&format!("Git command: {}", args.join(" ")));
        Ok(out)
    }

    /// Run `program` with no arguments.
    pub fn run_program(&self, ctx: &mut SessionContext, program: &str) -> Result<CommandOutput> {
        let out = self.executor.execute(program, &[])?;
        ctx.record(&format!("Ran program: {program}"));
        Ok(out)
    }
}

fn list_current(term: &mut dyn Terminal) -> Result<()> {
    let cwd = std::env::current_dir()?;
    show_listing(term, "--- Current Directory Contents ---", &cwd);
    Ok(())
}

/// Show a heading and the entries of `dir`, or "Directory is empty.".
pub fn show_listing(term: &mut dyn Terminal, title: &str, dir: &Path) {
    let entries = match list_directory(dir) {
        Ok(entries) => entries,
        Err(e) => {
            term.show(Line::error(format!("Error listing contents: {e}")));
            return;
        }
    };

    term.show(Line::heading(title));
    if entries.is_empty() {
        term.show(Line::plain("Directory is empty."));
    }
    for entry in entries {
        term.show(Line::plain(entry.to_string()));
    }
}

fn show_output(term: &mut dyn Terminal, out: &CommandOutput) {
    let stdout = out.stdout.trim_end();
    if !stdout.is_empty() {
        term.show(Line::plain(stdout));
    }
    let stderr = out.stderr.trim_end();
    if !stderr.is_empty() {
        term.show(Line::error(stderr));
    }
}
