//! External editor capability.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::{AbortError, Result};

/// Something that can modify a file in place.
///
/// Implemented for closures so tests can stand in for a real editor.
pub trait Editor {
    fn edit(&self, path: &Path) -> Result<()>;
}

impl<F> Editor for F
where
    F: Fn(&Path) -> Result<()>,
{
    fn edit(&self, path: &Path) -> Result<()> {
        self(path)
    }
}

/// Runs a user-configured editor command such as `vi` or `code --wait`.
///
/// The command is split on whitespace; the file path is passed as the last
/// argument. File contents never appear on the command line.
#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Editor for ExternalEditor {
    fn edit(&self, path: &Path) -> Result<()> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| AbortError::EditorFailed("an empty command".to_string()))?;

        debug!(editor = program, "launching editor");
        let status = Command::new(program).args(parts).arg(path).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(AbortError::EditorFailed(status.to_string()).into())
        }
    }
}
