//! Entry name validation.
//!
//! Turns raw user input into an [`EntryName`]: a `/`-separated hierarchical
//! name that maps onto a relative path inside the store root and can never
//! escape it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::constants;
use crate::core::fs as store_fs;
use crate::error::{Result, ValidationError};

/// A validated, normalized entry name such as `mail/work`.
/// Serializes as the plain name string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct EntryName(String);

impl EntryName {
    /// Validate a raw name.
    ///
    /// Rules, in order:
    /// - reject empty input
    /// - reject any `..` segment
    /// - reject a leading `/`
    /// - reject empty, `.` or hidden (dot-prefixed) segments and NUL bytes
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` that applies.
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if raw.split('/').any(|segment| segment == "..") {
            return Err(ValidationError::Traversal(raw.to_string()).into());
        }
        if raw.starts_with('/') {
            return Err(ValidationError::Absolute(raw.to_string()).into());
        }
        if raw.contains('\0') {
            return Err(ValidationError::NulByte.into());
        }

        for segment in raw.split('/') {
            if segment.is_empty() {
                return Err(ValidationError::EmptySegment(raw.to_string()).into());
            }
            if segment.starts_with('.') {
                return Err(ValidationError::HiddenSegment {
                    name: raw.to_string(),
                    segment: segment.to_string(),
                }
                .into());
            }
        }

        Ok(Self(raw.to_string()))
    }

    /// Rebuild a name from a ciphertext path relative to the store root.
    ///
    /// Returns `None` for paths that are not entries.
    pub(crate) fn from_relative_path(relative: &Path) -> Option<Self> {
        let stem = relative
            .to_str()?
            .strip_suffix(constants::ENTRY_EXTENSION)?
            .strip_suffix('.')?;

        let joined = if std::path::MAIN_SEPARATOR == '/' {
            stem.to_string()
        } else {
            stem.replace(std::path::MAIN_SEPARATOR, "/")
        };
        Self::parse(&joined).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Category segments, outermost first.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        let mut segments: Vec<&str> = self.0.split('/').collect();
        segments.pop();
        segments.into_iter()
    }

    /// Ciphertext path relative to the store root.
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.0.split('/').collect();
        let file = format!(
            "{}.{}",
            path.file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_default(),
            constants::ENTRY_EXTENSION
        );
        path.set_file_name(file);
        path
    }

    /// Ciphertext path under `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(self.relative_path())
    }

    /// Ensure every category directory exists under `root` and return the
    /// ciphertext path.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CreateDir` if a directory cannot be created.
    pub fn prepare_in(&self, root: &Path) -> Result<PathBuf> {
        let path = self.path_in(root);
        if let Some(parent) = path.parent() {
            store_fs::create_private_dir(parent)?;
        }
        Ok(path)
    }
}

impl fmt::Display for EntryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for EntryName {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for EntryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
