//! Rotate command.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::vault::Vault;
use crate::error::Result;

/// Mint a new keypair and re-encrypt every entry for it.
pub fn execute(config: &Config) -> Result<()> {
    let vault = Vault::open(config)?;
    let report = vault.rotate()?;

    output::success(&format!("rotated keys ({} entries)", report.reencrypted));
    output::kv("recipient:", &report.recipient);
    output::kv("keys:     ", report.keys);
    Ok(())
}
