//! Command-line interface.

pub mod add;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod git;
pub mod list;
pub mod output;
pub mod rotate;
pub mod show;
pub mod textconv;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::core::config::Config;
use crate::error::Result;

/// Strongbox - a personal secret store.
#[derive(Parser, Debug)]
#[command(
    name = "strongbox",
    about = "A personal secret store with key rotation and a git audit trail",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add an entry, generated or entered twice
    #[command(visible_alias = "a")]
    Add {
        /// Entry name (e.g., mail/work)
        name: String,
    },

    /// Delete an entry after confirmation
    #[command(visible_aliases = ["del", "d", "rm"])]
    Delete {
        /// Entry name
        name: String,
    },

    /// Edit an entry in $EDITOR
    #[command(visible_alias = "e")]
    Edit {
        /// Entry name
        name: String,
    },

    /// List all entry names
    #[command(visible_aliases = ["l", "ls"])]
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print an entry to stdout
    #[command(visible_alias = "s")]
    Show {
        /// Entry name
        name: String,
    },

    /// Add a new keypair and re-encrypt every entry
    Rotate,

    /// Run git inside the store
    #[command(visible_alias = "g")]
    Git {
        /// Arguments passed to git
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Decrypt a ciphertext file to stdout (git diff driver)
    #[command(hide = true)]
    Textconv {
        /// Path to an encrypted entry
        file: PathBuf,
    },
}

/// Execute a command.
pub fn execute(command: Command) -> Result<()> {
    use Command::*;

    if let Completions { shell } = command {
        return completions::execute(shell);
    }

    let config = Config::from_env()?;
    match command {
        Add { name } => add::execute(&config, &name),
        Delete { name } => delete::execute(&config, &name),
        Edit { name } => edit::execute(&config, &name),
        List { json } => list::execute(&config, json),
        Show { name } => show::execute(&config, &name),
        Rotate => rotate::execute(&config),
        Git { args } => git::execute(&config, &args),
        Textconv { file } => textconv::execute(&config, &file),
        Completions { .. } => Ok(()),
    }
}
