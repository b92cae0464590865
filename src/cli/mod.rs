//! CLI module — Clap argument parser, terminal seam, output helpers,
//! the main menu and the session controller.

pub mod controller;
pub mod menu;
pub mod output;
pub mod terminal;

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::Settings;
use crate::errors::Result;

pub use controller::{SessionController, SessionState};
pub use menu::MenuChoice;
pub use terminal::{ConsoleTerminal, Line, Terminal, Tone};

/// DarkRelm: a session vault that forgets everything at logout.
#[derive(Parser)]
#[command(
    name = "darkrelm",
    about = "Session-scoped vault with an audit trail and the UnderWorld terminal",
    version
)]
pub struct Cli {
    /// Config file (default: ./.darkrelm.toml, optional)
    #[arg(long, env = "DARKRELM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose diagnostic logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Load settings from `--config`, or from `.darkrelm.toml` in `cwd`.
pub fn load_settings(cli: &Cli, cwd: &Path) -> Result<Settings> {
    match &cli.config {
        Some(path) => Settings::load_file(&cwd.join(path)),
        None => Settings::load(cwd),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["darkrelm", "-v", "--config", "x.toml"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["darkrelm", "extra"]).is_err());
    }

    #[test]
    fn load_settings_prefers_explicit_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("alt.toml"), "vault_dir = \"alt\"\n").unwrap();
        fs::write(tmp.path().join(".darkrelm.toml"), "vault_dir = \"dflt\"\n").unwrap();

        let explicit = Cli::try_parse_from(["darkrelm", "--config", "alt.toml"]).unwrap();
        assert_eq!(load_settings(&explicit, tmp.path()).unwrap().vault_dir, "alt");

        let implicit = Cli::try_parse_from(["darkrelm"]).unwrap();
        assert_eq!(load_settings(&implicit, tmp.path()).unwrap().vault_dir, "dflt");
    }
}
