use clap::Parser;
use tracing_subscriber::EnvFilter;

use darkrelm::cli::{load_settings, Cli, ConsoleTerminal, SessionController, Terminal};
use darkrelm::errors::Result;
use darkrelm::shell::UnderworldShell;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        darkrelm::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let home = std::env::current_dir()?;
    let settings = load_settings(cli, &home)?;

    let mut term = ConsoleTerminal::new();
    term.show_welcome();

    let shell = UnderworldShell::system(settings.download_fallback_name.clone());
    let mut controller = SessionController::login(&mut term, &settings, &home, shell)?;
    controller.run(&mut term);

    Ok(())
}

/// Diagnostics go to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
