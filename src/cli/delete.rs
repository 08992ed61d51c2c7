//! Delete command.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::prompt::{Prompter, TerminalPrompter};
use crate::core::vault::Vault;
use crate::error::{AbortError, EntryError, Result};

/// Delete an entry after confirmation.
pub fn execute(config: &Config, name: &str) -> Result<()> {
    let vault = Vault::open(config)?;
    if !vault.contains(name)? {
        return Err(EntryError::NotFound(name.to_string()).into());
    }

    let question = format!("Delete entry '{}'?", name);
    if !TerminalPrompter::new().confirm(&question)? {
        return Err(AbortError::Declined.into());
    }

    vault.delete(name)?;
    output::success(&format!("deleted {}", output::name(name)));
    Ok(())
}
