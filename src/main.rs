//! Strongbox - a personal secret store.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use strongbox::cli::output;
use strongbox::cli::{execute, Cli};
use strongbox::core::constants;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            // Without a usable subcommand, show usage and succeed.
            ErrorKind::InvalidSubcommand
            | ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = Cli::command().print_help();
                std::process::exit(0);
            }
            _ => e.exit(),
        },
    };

    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("strongbox=debug")
        } else {
            EnvFilter::new("strongbox=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli.command) {
        output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
