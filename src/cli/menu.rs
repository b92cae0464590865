//! The fixed main menu.

use super::terminal::{Line, Terminal};

/// One entry of the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    CreateFolder,
    CreateFile,
    DeleteItem,
    ViewVault,
    ViewFile,
    ImportDownloads,
    EnterShell,
    ViewHistory,
    Logout,
}

impl MenuChoice {
    /// All choices in menu order (1-9).
    pub const ALL: [MenuChoice; 9] = [
        Self::CreateFolder,
        Self::CreateFile,
        Self::DeleteItem,
        Self::ViewVault,
        Self::ViewFile,
        Self::ImportDownloads,
        Self::EnterShell,
        Self::ViewHistory,
        Self::Logout,
    ];

    /// Parse a menu line such as `"3"`. Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let n: usize = input.trim().parse().ok()?;
        Self::ALL.get(n.checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::CreateFolder => "Create folder in vault",
            Self::CreateFile => "Create file in vault",
            Self::DeleteItem => "Delete file/folder in vault",
            Self::ViewVault => "View vault contents",
            Self::ViewFile => "View file contents",
            Self::ImportDownloads => "Move downloads to vault",
            Self::EnterShell => "Enter UnderWorld Terminal",
            Self::ViewHistory => "View history",
            Self::Logout => "Logout (deletes everything)",
        }
    }
}

/// Display the numbered menu.
pub fn show_menu(term: &mut dyn Terminal) {
    term.show(Line::heading("Options:"));
    for (i, choice) in MenuChoice::ALL.iter().enumerate() {
        term.show(Line::plain(format!("{}. {}", i + 1, choice.label())));
    }
}
