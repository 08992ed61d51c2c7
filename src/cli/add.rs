//! Add command.
//!
//! Generates a password or reads one twice with hidden input, then stores
//! it followed by a newline.

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::config::Config;
use crate::core::generate;
use crate::core::prompt::{Prompter, TerminalPrompter};
use crate::core::vault::Vault;
use crate::error::{AbortError, EntryError, Result};

/// Add an entry interactively.
pub fn execute(config: &Config, name: &str) -> Result<()> {
    let vault = Vault::open(config)?;

    // Fail before prompting when the name is unusable.
    if vault.contains(name)? {
        return Err(EntryError::AlreadyExists(name.to_string()).into());
    }

    let password = read_password(config, &mut TerminalPrompter::new())?;
    let mut plaintext = Zeroizing::new(Vec::with_capacity(password.len() + 1));
    plaintext.extend_from_slice(password.as_bytes());
    plaintext.push(b'\n');

    let entry = vault.add(name, &plaintext)?;
    info!(name = %entry, "added");
    output::success(&format!("added {}", output::name(entry.as_str())));
    Ok(())
}

/// Generate a password, or ask for one twice.
pub fn read_password<P: Prompter + ?Sized>(
    config: &Config,
    prompter: &mut P,
) -> Result<Zeroizing<String>> {
    if prompter.confirm("Generate a password?")? {
        return generate::password(config.password_length, &config.password_pattern);
    }

    let first = prompter.hidden("Password")?;
    if first.is_empty() {
        return Err(AbortError::EmptyInput.into());
    }
    let second = prompter.hidden("Password (again)")?;
    if *first != *second {
        return Err(AbortError::Mismatch.into());
    }
    Ok(first)
}
