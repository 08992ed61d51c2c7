//! Git command.
//!
//! Runs git inside the store root and exits with its status.

use crate::core::config::Config;
use crate::core::vault::Vault;
use crate::error::Result;

/// Run git with `args` in the store.
pub fn execute(config: &Config, args: &[String]) -> Result<()> {
    let vault = Vault::open(config)?;
    let status = vault.audit().passthrough(args)?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}
