//! Runtime configuration.
//!
//! Built once from the environment at startup and passed by reference into
//! every component that needs it.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// Resolved configuration for one store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory holding entries and categories.
    pub store_dir: PathBuf,
    /// Private key file.
    pub identities_file: PathBuf,
    /// Public key file.
    pub recipients_file: PathBuf,
    /// Length of generated passwords.
    pub password_length: usize,
    /// Character class for generated passwords.
    pub password_pattern: String,
    /// Whether mutations are committed to the git audit trail.
    pub audit: bool,
    /// Editor command used by `edit`.
    pub editor: String,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable holds an invalid value or no data
    /// directory can be determined.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |var: &str| lookup(var).filter(|v| !v.is_empty());

        let app_dir = || -> Result<PathBuf> {
            dirs::data_dir()
                .map(|d| d.join(constants::APP_DIR))
                .ok_or_else(|| ConfigError::NoDataDir(constants::ENV_DIR).into())
        };

        let store_dir = match non_empty(constants::ENV_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => app_dir()?.join(constants::STORE_DIR),
        };
        let keys_dir = match non_empty(constants::ENV_KEYS_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => app_dir()?,
        };

        let password_length = match non_empty(constants::ENV_LENGTH) {
            Some(raw) => parse_length(&raw)?,
            None => constants::DEFAULT_LENGTH,
        };

        let config = Self {
            identities_file: keys_dir.join(constants::IDENTITIES_FILE),
            recipients_file: keys_dir.join(constants::RECIPIENTS_FILE),
            store_dir,
            password_length,
            password_pattern: non_empty(constants::ENV_PATTERN)
                .unwrap_or_else(|| constants::DEFAULT_PATTERN.to_string()),
            audit: lookup(constants::ENV_NOGIT).is_none(),
            editor: non_empty(constants::ENV_EDITOR)
                .unwrap_or_else(|| constants::DEFAULT_EDITOR.to_string()),
        };

        debug!(
            store = %config.store_dir.display(),
            keys = %keys_dir.display(),
            audit = config.audit,
            "config loaded"
        );

        Ok(config)
    }

    /// Configuration rooted in a single directory, with auditing disabled.
    ///
    /// Keys live in `base`, entries in `base/passwords`.
    pub fn in_dir(base: &Path) -> Self {
        Self {
            store_dir: base.join(constants::STORE_DIR),
            identities_file: base.join(constants::IDENTITIES_FILE),
            recipients_file: base.join(constants::RECIPIENTS_FILE),
            password_length: constants::DEFAULT_LENGTH,
            password_pattern: constants::DEFAULT_PATTERN.to_string(),
            audit: false,
            editor: constants::DEFAULT_EDITOR.to_string(),
        }
    }
}

fn parse_length(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(0) => Err(ConfigError::InvalidValue {
            var: constants::ENV_LENGTH,
            reason: "must be greater than zero".to_string(),
        }
        .into()),
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::InvalidValue {
            var: constants::ENV_LENGTH,
            reason: format!("'{}' is not a number", raw),
        }
        .into()),
    }
}
