//! Show command.

use std::io::{self, Write};

use crate::core::config::Config;
use crate::core::vault::Vault;
use crate::error::Result;

/// Write the decrypted entry to stdout exactly as stored.
pub fn execute(config: &Config, name: &str) -> Result<()> {
    let vault = Vault::open(config)?;
    let plaintext = vault.show(name)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&plaintext)?;
    stdout.flush()?;
    Ok(())
}
