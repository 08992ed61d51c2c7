//! Entry operations.
//!
//! One ciphertext file per entry, always written through an atomic replace.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, info};
use walkdir::WalkDir;
use zeroize::Zeroizing;

use super::Vault;
use crate::core::cipher::Cipher;
use crate::core::editor::Editor;
use crate::core::fs::{self as store_fs, Scratch};
use crate::core::signal::{self, InterruptGuard};
use crate::core::validation::EntryName;
use crate::error::{AbortError, EntryError, Result, StoreError};

impl<C: Cipher> Vault<C> {
    /// Whether an entry exists.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is invalid.
    pub fn contains(&self, name: &str) -> Result<bool> {
        let name = EntryName::parse(name)?;
        Ok(name.path_in(self.root()).is_file())
    }

    /// Encrypt `plaintext` for every current recipient and store it under
    /// a new name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a bad name, `EntryError::AlreadyExists`
    /// if the name is taken, `CipherError` or `StoreError` otherwise. On
    /// error nothing is left under the entry name.
    pub fn add(&self, name: &str, plaintext: &[u8]) -> Result<EntryName> {
        let name = EntryName::parse(name)?;
        if name.path_in(self.root()).exists() {
            return Err(EntryError::AlreadyExists(name.to_string()).into());
        }

        let recipients = self.keys.recipients()?;
        let ciphertext = self.cipher.encrypt(plaintext, &recipients)?;

        let path = name.prepare_in(self.root())?;
        if let Err(e) = store_fs::create_atomic(&path, &ciphertext, name.as_str()) {
            if let Some(parent) = path.parent() {
                store_fs::prune_empty(self.root(), parent);
            }
            return Err(e);
        }

        info!(name = %name, "entry added");
        self.record(&[&path], &format!("add '{}'", name));
        Ok(name)
    }

    /// Decrypt an entry with the current identities.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NotFound` if absent, `CipherError` if no identity
    /// opens it.
    pub fn show(&self, name: &str) -> Result<Zeroizing<Vec<u8>>> {
        let name = EntryName::parse(name)?;
        let path = self.existing(&name)?;

        let ciphertext = read(&path)?;
        let identities = self.keys.identities()?;
        let plaintext = self.cipher.decrypt(&ciphertext, &identities)?;

        debug!(name = %name, "entry decrypted");
        Ok(plaintext)
    }

    /// Decrypt an entry into a private scratch file, let `editor` modify it,
    /// then re-encrypt and atomically replace the entry.
    ///
    /// The scratch directory is deleted on every exit path. An interrupt
    /// while the editor runs aborts the edit without touching the entry.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NotFound` if absent, `AbortError` if the editor
    /// fails or the edit is interrupted, `CipherError` or `StoreError`
    /// otherwise.
    pub fn edit<E: Editor + ?Sized>(&self, name: &str, editor: &E) -> Result<()> {
        let name = EntryName::parse(name)?;
        let path = self.existing(&name)?;

        let identities = self.keys.identities()?;
        let recipients = self.keys.recipients()?;
        let plaintext = self.cipher.decrypt(&read(&path)?, &identities)?;

        // Scratch is dropped before the hook
        let edited = {
            let _hook = InterruptGuard::install()?;
            let file_name = format!("{}.txt", name.as_str().replace('/', "-"));
            let scratch = Scratch::new(&file_name, &plaintext)?;
            drop(plaintext);

            let result = editor.edit(scratch.file());
            if signal::interrupted() {
                return Err(AbortError::Interrupted.into());
            }
            result?;
            scratch.read()?
        };

        let ciphertext = self.cipher.encrypt(&edited, &recipients)?;
        store_fs::write_atomic(&path, &ciphertext)?;

        info!(name = %name, "entry edited");
        self.record(&[&path], &format!("edit '{}'", name));
        Ok(())
    }

    /// Remove an entry and prune the categories it leaves empty.
    ///
    /// # Errors
    ///
    /// Returns `EntryError::NotFound` if absent or `StoreError::Remove`.
    pub fn delete(&self, name: &str) -> Result<()> {
        let name = EntryName::parse(name)?;
        let path = self.existing(&name)?;

        fs::remove_file(&path).map_err(|source| StoreError::Remove {
            path: path.clone(),
            source,
        })?;
        if let Some(parent) = path.parent() {
            store_fs::prune_empty(self.root(), parent);
        }

        info!(name = %name, "entry deleted");
        self.record(&[&path], &format!("delete '{}'", name));
        Ok(())
    }

    /// All entry names, sorted. Re-reads the filesystem on every call.
    ///
    /// Hidden files and directories (the audit history, temporaries) are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Read` if the store cannot be walked.
    pub fn list(&self) -> Result<Vec<EntryName>> {
        let root = self.root();
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        let mut names = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(root).to_path_buf();
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
                StoreError::Read { path, source }
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };
            if let Some(name) = EntryName::from_relative_path(relative) {
                names.push(name);
            }
        }

        names.sort_by(|a, b| a.as_str().as_bytes().cmp(b.as_str().as_bytes()));
        debug!(count = names.len(), "listed entries");
        Ok(names)
    }

    /// Ciphertext path of an entry that must exist.
    fn existing(&self, name: &EntryName) -> Result<PathBuf> {
        let path = name.path_in(self.root());
        if path.is_file() {
            Ok(path)
        } else {
            Err(EntryError::NotFound(name.to_string()).into())
        }
    }
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

pub(super) fn read(path: &std::path::Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| {
        StoreError::Read {
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}
