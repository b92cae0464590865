//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across the menu and the UnderWorld shell.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::audit::{AuditEntry, TIMESTAMP_FORMAT};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a cyan section heading.
pub fn heading(msg: &str) {
    println!("{}", style(msg).cyan().bold());
}

/// Print text as-is (command output, file contents).
pub fn plain(msg: &str) {
    println!("{msg}");
}

/// Print the startup banner.
pub fn welcome_banner() {
    let banner = format!(
        "\n    =========================================\n          Welcome to DarkRelm v{}\n    =========================================\n    Enhanced secure vault with terminal!\n",
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style(banner).magenta());
}

/// Print the UnderWorld shell banner.
pub fn underworld_banner() {
    let banner = "\n    =========================================\n       Welcome to the UnderWorld!\n    =========================================\n    Navigate the shadows of your system!\n";
    println!("{}", style(banner).red());
}

/// Print the audit history as a table (Time, User, Action).
pub fn print_history_table(entries: &[AuditEntry]) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "User", "Action"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            entry.username.clone(),
            entry.description.clone(),
        ]);
    }

    println!(
        "{}",
        style(format!("{} history entries:", entries.len())).bold()
    );
    println!("{table}");
}
