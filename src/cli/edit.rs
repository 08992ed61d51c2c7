//! Edit command.

use crate::cli::output;
use crate::core::config::Config;
use crate::core::editor::ExternalEditor;
use crate::core::vault::Vault;
use crate::error::Result;

/// Edit an entry with the configured editor.
pub fn execute(config: &Config, name: &str) -> Result<()> {
    let vault = Vault::open(config)?;
    let editor = ExternalEditor::new(config.editor.clone());

    vault.edit(name, &editor)?;
    output::success(&format!("updated {}", output::name(name)));
    Ok(())
}
