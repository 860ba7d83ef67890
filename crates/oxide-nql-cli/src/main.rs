//! oxide-nql CLI
//!
//! Command-line tool for parsing, formatting and inspecting query
//! statements.

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use oxide_nql_cli::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let stdout = std::io::stdout();
    run(&cli, std::io::stdin().lock(), &mut stdout.lock())
}
