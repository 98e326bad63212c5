//! # admin-console
//!
//! Command-line front end for the console. Each subcommand drives one screen:
//! results go to stdout as JSON, notices go to stderr.
//!
//! ```bash
//! ADMIN_API_BASE_URL=https://ims.example.in/api admin-console signups list
//! admin-console po-team delete EMP014 --yes
//! RUST_LOG=debug admin-console dashboard --range 01-04-2025-30-06-2025
//! ```

mod commands;

use admin_console::lifecycle::setup_tracing;
use admin_console::{AdminConsole, ConsoleConfig};
use anyhow::Context;
use clap::Parser;
use commands::Cli;
use tracing::{info_span, Instrument};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    let mut config = ConsoleConfig::from_env().context("Invalid configuration")?;
    cli.apply(&mut config);

    let console = AdminConsole::new(&config).context("Could not start the console")?;
    let span = info_span!("command", name = cli.command.name());
    let outcome = commands::run(cli.command, &console, &config).instrument(span).await;

    console.shutdown().await.context("Shutdown failed")?;
    outcome
}
