//! The seam between session logic and the person at the keyboard.
//!
//! The menu and the shell only ever talk to a `Terminal`: they show
//! lines and read input through it. `ConsoleTerminal` is the real one;
//! tests drive the same code with a scripted implementation.

use crate::audit::AuditEntry;
use crate::errors::{DarkRelmError, Result};

use super::output;

/// How a displayed line should be styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Heading,
    Info,
    Success,
    Warning,
    Error,
}

/// One line for the display sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub tone: Tone,
    pub text: String,
}

impl Line {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Tone::Plain, text)
    }

    pub fn heading(text: impl Into<String>) -> Self {
        Self::new(Tone::Heading, text)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Tone::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Tone::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Tone::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Tone::Error, text)
    }
}

/// Display sink plus line-oriented input.
pub trait Terminal {
    fn show(&mut self, line: Line);

    /// Read one line of visible input.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read one line of hidden input.
    fn read_secret(&mut self, prompt: &str) -> Result<String>;

    /// Show the audit history. One plain line per entry by default.
    fn show_history(&mut self, entries: &[AuditEntry]) {
        for entry in entries {
            self.show(Line::plain(entry.to_string()));
        }
    }

    fn show_welcome(&mut self) {}

    fn show_underworld(&mut self) {}
}

/// Interactive terminal backed by `dialoguer` prompts and `console` styling.
#[derive(Debug, Default)]
pub struct ConsoleTerminal;

impl ConsoleTerminal {
    pub fn new() -> Self {
        Self
    }
}

impl Terminal for ConsoleTerminal {
    fn show(&mut self, line: Line) {
        match line.tone {
            Tone::Plain => output::plain(&line.text),
            Tone::Heading => output::heading(&line.text),
            Tone::Info => output::info(&line.text),
            Tone::Success => output::success(&line.text),
            Tone::Warning => output::warning(&line.text),
            Tone::Error => output::error(&line.text),
        }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| DarkRelmError::Prompt(format!("input prompt: {e}")))
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| DarkRelmError::Prompt(format!("password prompt: {e}")))
    }

    fn show_history(&mut self, entries: &[AuditEntry]) {
        output::print_history_table(entries);
    }

    fn show_welcome(&mut self) {
        output::welcome_banner();
    }

    fn show_underworld(&mut self) {
        output::underworld_banner();
    }
}
