//! Encryption boundary.
//!
//! The only place plaintext and ciphertext meet. Callers hand plaintext in
//! as bytes and get it back wrapped in [`Zeroizing`], so buffers are wiped
//! when dropped.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file next to `age.rs`
//! 3. Re-export from this module

use zeroize::Zeroizing;

use crate::error::Result;

mod age;

pub use self::age::{parse_identity, parse_recipient, Age};
pub use ::age::x25519::{Identity, Recipient};

/// Cryptographic backend trait.
///
/// Encryption targets a whole recipient set, any member of which can
/// decrypt. Decryption tries every identity it is given.
pub trait Cipher {
    /// Encrypt plaintext for every recipient.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::NoRecipients` for an empty set, or
    /// `CipherError::EncryptionFailed`.
    fn encrypt(&self, plaintext: &[u8], recipients: &[Recipient]) -> Result<Vec<u8>>;

    /// Decrypt ciphertext with any of the given identities.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if no identity opens the
    /// ciphertext or it is corrupt.
    fn decrypt(&self, ciphertext: &[u8], identities: &[Identity]) -> Result<Zeroizing<Vec<u8>>>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}

impl<C: Cipher + ?Sized> Cipher for &C {
    fn encrypt(&self, plaintext: &[u8], recipients: &[Recipient]) -> Result<Vec<u8>> {
        (**self).encrypt(plaintext, recipients)
    }

    fn decrypt(&self, ciphertext: &[u8], identities: &[Identity]) -> Result<Zeroizing<Vec<u8>>> {
        (**self).decrypt(ciphertext, identities)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
