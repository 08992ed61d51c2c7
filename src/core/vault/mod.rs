//! Vault.
//!
//! The primary interface for all strongbox operations. A vault ties one
//! store root to its key material, an encryption backend and the audit
//! trail:
//!
//! - [`entries`]: add, show, edit, delete and list
//! - [`rotate`]: key rotation

use std::path::Path;

use tracing::{debug, warn};

use crate::core::audit::Audit;
use crate::core::cipher::{Age, Cipher};
use crate::core::config::Config;
use crate::core::fs as store_fs;
use crate::core::keys::KeyStore;
use crate::error::Result;

mod entries;
mod rotate;

pub use rotate::RotationReport;

/// A secret store rooted in one directory.
pub struct Vault<C = Age> {
    config: Config,
    keys: KeyStore,
    cipher: C,
    audit: Audit,
}

impl<C: Cipher> std::fmt::Debug for Vault<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vault")
            .field("root", &self.config.store_dir)
            .field("cipher", &self.cipher.name())
            .field("keys", &self.keys)
            .field("audit", &self.audit.is_enabled())
            .finish()
    }
}

impl Vault<Age> {
    /// Open (creating on first use) the store described by `config`.
    ///
    /// Creates the store root, generates the first keypair if none exists,
    /// and initializes the audit history when enabled.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the root or key files cannot be created.
    pub fn open(config: &Config) -> Result<Self> {
        Self::with_cipher(config, Age)
    }
}

impl<C: Cipher> Vault<C> {
    /// Open the store with a specific encryption backend.
    pub fn with_cipher(config: &Config, cipher: C) -> Result<Self> {
        store_fs::create_private_dir(&config.store_dir)?;

        let keys = KeyStore::new(config);
        if keys.ensure_keypair()? {
            debug!(path = %keys.identities_path().display(), "generated first keypair");
        }

        let vault = Self {
            config: config.clone(),
            keys,
            cipher,
            audit: Audit::new(config),
        };
        vault.init_audit();

        debug!(root = %vault.root().display(), cipher = vault.cipher.name(), "vault opened");
        Ok(vault)
    }

    /// Store root directory.
    pub fn root(&self) -> &Path {
        &self.config.store_dir
    }

    pub fn keys(&self) -> &KeyStore {
        &self.keys
    }

    pub fn audit(&self) -> &Audit {
        &self.audit
    }

    fn init_audit(&self) {
        if !self.audit.is_enabled() || self.audit.is_initialized() {
            return;
        }

        let textconv = match std::env::current_exe() {
            Ok(exe) => format!("{} textconv", crate::core::audit::shell_quote(&exe)),
            Err(e) => {
                warn!(error = %e, "cannot locate executable for diff driver");
                return;
            }
        };

        if let Err(e) = self.audit.init(&textconv) {
            warn!(error = %e, "failed to initialize audit history");
        }
    }

    /// Commit a completed mutation. Failures are logged, never returned.
    fn record<P: AsRef<Path>>(&self, paths: &[P], message: &str) {
        if let Err(e) = self.audit.record(paths, message) {
            warn!(error = %e, message, "audit commit failed");
        }
    }
}
