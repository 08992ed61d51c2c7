//! age (x25519) backend.
//!
//! Writes the binary age format with x25519 keys. Reading accepts both the
//! binary and the ASCII-armored format.

use std::io::{Read, Write};

use ::age::x25519;
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::error::{CipherError, Result};

/// The age file format with native x25519 recipients.
#[derive(Debug, Clone, Copy, Default)]
pub struct Age;

impl Cipher for Age {
    fn name(&self) -> &'static str {
        "age"
    }

    fn encrypt(&self, plaintext: &[u8], recipients: &[x25519::Recipient]) -> Result<Vec<u8>> {
        trace!(
            recipients = recipients.len(),
            plaintext_len = plaintext.len(),
            "encrypting"
        );

        if recipients.is_empty() {
            return Err(CipherError::NoRecipients.into());
        }

        let encryptor =
            age::Encryptor::with_recipients(recipients.iter().map(|r| r as &dyn age::Recipient))
                .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        writer
            .write_all(plaintext)
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;
        writer
            .finish()
            .map_err(|e| CipherError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");

        Ok(encrypted)
    }

    fn decrypt(
        &self,
        ciphertext: &[u8],
        identities: &[x25519::Identity],
    ) -> Result<Zeroizing<Vec<u8>>> {
        trace!(
            ciphertext_len = ciphertext.len(),
            identities = identities.len(),
            "decrypting"
        );

        if identities.is_empty() {
            return Err(CipherError::NoIdentities.into());
        }

        let reader = age::armor::ArmoredReader::new(ciphertext);
        let decryptor = age::Decryptor::new(reader)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut reader = decryptor
            .decrypt(identities.iter().map(|i| i as &dyn age::Identity))
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        let mut decrypted = Zeroizing::new(Vec::new());
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| CipherError::DecryptionFailed(format!("{}", e)))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");

        Ok(decrypted)
    }
}

/// Parse an `age1...` public key.
///
/// Returns `None` if the key format is invalid; callers attach the location.
pub fn parse_recipient(key: &str) -> Option<x25519::Recipient> {
    key.trim().parse::<x25519::Recipient>().ok()
}

/// Parse a secret key string into an age identity.
pub fn parse_identity(key: &str) -> Option<x25519::Identity> {
    key.trim().parse::<x25519::Identity>().ok()
}
