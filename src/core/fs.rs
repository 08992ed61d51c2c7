//! Filesystem primitives with crash-safe semantics.
//!
//! Every persistent write goes to a hidden temporary sibling first and is
//! made visible by a single rename. A crash before the rename leaves the old
//! file; a crash after leaves the new one.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{NamedTempFile, TempDir};
use tracing::{debug, trace};

use crate::core::constants;
use crate::error::{EntryError, Result, StoreError};

/// Create a directory (and parents) readable only by the owner.
pub fn create_private_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder.create(path).map_err(|source| {
        StoreError::CreateDir {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

/// Write `contents` to a temporary sibling of `path`, flushed to disk.
fn stage(path: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let write_err = |source: io::Error| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(constants::TEMP_PREFIX)
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    trace!(tmp = %tmp.path().display(), len = contents.len(), "staged");
    Ok(tmp)
}

/// Atomically replace `path` with `contents`.
///
/// # Errors
///
/// Returns `StoreError::Write` if staging fails or `StoreError::Replace` if
/// the rename fails. The temporary file is removed on failure.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let tmp = stage(path, contents)?;
    tmp.persist(path).map_err(|e| StoreError::Replace {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    sync_parent(path);

    debug!(path = %path.display(), "replaced");
    Ok(())
}

/// Atomically create `path` with `contents`, failing if it already exists.
///
/// # Errors
///
/// Returns `EntryError::AlreadyExists` (named by `name`) if `path` exists.
pub fn create_atomic(path: &Path, contents: &[u8], name: &str) -> Result<()> {
    let tmp = stage(path, contents)?;
    tmp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            EntryError::AlreadyExists(name.to_string()).into()
        } else {
            crate::error::Error::from(StoreError::Replace {
                path: path.to_path_buf(),
                source: e.error,
            })
        }
    })?;
    sync_parent(path);

    debug!(path = %path.display(), "created");
    Ok(())
}

/// Flush the directory entry of a rename. Best effort.
fn sync_parent(path: &Path) {
    #[cfg(unix)]
    {
        if let Some(parent) = path.parent() {
            if let Ok(dir) = fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }
    }
    #[cfg(not(unix))]
    let _ = path;
}

/// Remove empty directories from `start` upward, stopping below `root`.
///
/// Stops at the first directory that cannot be removed, which normally
/// means it still holds other entries. Returns the removed directories.
pub fn prune_empty(root: &Path, start: &Path) -> Vec<PathBuf> {
    let mut removed = Vec::new();
    let mut current = start;

    while current != root && current.starts_with(root) {
        match fs::remove_dir(current) {
            Ok(()) => removed.push(current.to_path_buf()),
            Err(e) => {
                trace!(dir = %current.display(), error = %e, "stopped pruning");
                break;
            }
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    if !removed.is_empty() {
        debug!(count = removed.len(), "pruned empty categories");
    }
    removed
}

/// A private scratch directory holding one plaintext file.
///
/// Prefers memory-backed storage. The directory and its contents are
/// deleted when the value is dropped.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
    file: PathBuf,
}

impl Scratch {
    /// Create the scratch area and write `contents` into a file named
    /// `file_name` inside it.
    pub fn new(file_name: &str, contents: &[u8]) -> Result<Self> {
        let dir = Self::create_dir()?;
        let file = dir.path().join(file_name);

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut handle = options.open(&file).map_err(StoreError::Scratch)?;
        handle.write_all(contents).map_err(StoreError::Scratch)?;

        debug!(dir = %dir.path().display(), "scratch area created");
        Ok(Self { dir, file })
    }

    fn create_dir() -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(constants::SCRATCH_PREFIX);

        let shm = Path::new(constants::SHM_DIR);
        if shm.is_dir() {
            match builder.tempdir_in(shm) {
                Ok(dir) => return Ok(dir),
                Err(e) => debug!(error = %e, "memory-backed scratch unavailable"),
            }
        }

        // TempDir is created 0700 on unix
        builder
            .tempdir()
            .map_err(|e| StoreError::Scratch(e).into())
    }

    /// Path of the plaintext file.
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Path of the containing directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Read the (possibly edited) file back.
    pub fn read(&self) -> Result<zeroize::Zeroizing<Vec<u8>>> {
        fs::read(&self.file)
            .map(zeroize::Zeroizing::new)
            .map_err(|e| StoreError::Scratch(e).into())
    }
}
