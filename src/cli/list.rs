//! List command.

use std::io;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::vault::Vault;
use crate::error::Result;

/// List all entry names, one per line or as a JSON array.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let vault = Vault::open(config)?;
    let names = vault.list()?;

    if json {
        let rendered = serde_json::to_string_pretty(&names).map_err(io::Error::from)?;
        println!("{}", rendered);
        return Ok(());
    }

    if names.is_empty() {
        output::dimmed("no entries stored");
        output::hint("strongbox add <name>");
        return Ok(());
    }

    for name in &names {
        println!("{}", name);
    }
    Ok(())
}
