//! Textconv command.
//!
//! Git diff driver for `*.age` files: decrypts a ciphertext file with the
//! store's identities and writes the plaintext to stdout.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::core::cipher::{Age, Cipher};
use crate::core::config::Config;
use crate::core::keys::KeyStore;
use crate::error::{Result, StoreError};

/// Decrypt `file` to stdout.
pub fn execute(config: &Config, file: &Path) -> Result<()> {
    let ciphertext = fs::read(file).map_err(|source| StoreError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let identities = KeyStore::new(config).identities()?;
    let plaintext = Age.decrypt(&ciphertext, &identities)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&plaintext)?;
    stdout.flush()?;
    Ok(())
}
