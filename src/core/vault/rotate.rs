//! Key rotation.
//!
//! Mints a new keypair and re-encrypts every entry for the enlarged
//! recipient set. The order is what keeps the store decryptable:
//!
//! 1. stage copies of the persisted identities and recipients
//! 2. append a new keypair to the staged copies
//! 3. re-encrypt each entry (decrypting with the *persisted* identities,
//!    encrypting for the *staged* recipients) and atomically replace it
//! 4. only then replace the persisted key files with the staged copies
//!
//! A failure in step 3 leaves the key files untouched. Entries rewritten so
//! far are encrypted for a superset of the old recipients, so the old
//! identities still open everything and rotation can simply be retried.
//!
//! Rotation only adds keys; earlier identities stay valid.

use tracing::{debug, info};

use super::entries::read;
use super::Vault;
use crate::core::cipher::Cipher;
use crate::core::fs as store_fs;
use crate::error::Result;

/// Outcome of a completed rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationReport {
    /// Entries re-encrypted.
    pub reencrypted: usize,
    /// Public key of the newly minted identity.
    pub recipient: String,
    /// Number of keypairs after rotation.
    pub keys: usize,
}

impl<C: Cipher> Vault<C> {
    /// Rotate keys.
    ///
    /// # Errors
    ///
    /// Returns the first `CipherError` or `StoreError` hit while
    /// re-encrypting; the persisted key files are then unchanged.
    pub fn rotate(&self) -> Result<RotationReport> {
        let current = self.keys.stage()?;
        let mut staged = current.clone();
        let recipient = staged.append_new_keypair().to_string();

        info!(
            keys = staged.len(),
            recipient = %recipient,
            "rotating keys"
        );

        let names = self.list()?;
        let mut paths = Vec::with_capacity(names.len());
        for name in &names {
            let path = name.path_in(self.root());
            let plaintext = self
                .cipher
                .decrypt(&read(&path)?, current.identities())?;
            let ciphertext = self.cipher.encrypt(&plaintext, staged.recipients())?;
            store_fs::write_atomic(&path, &ciphertext)?;

            debug!(name = %name, "re-encrypted");
            paths.push(path);
        }

        self.keys.commit(&staged)?;
        info!(entries = names.len(), "rotation complete");

        if !paths.is_empty() {
            self.record(&paths, &format!("rotate keys ({} entries)", names.len()));
        }

        Ok(RotationReport {
            reencrypted: names.len(),
            recipient,
            keys: staged.len(),
        })
    }
}
