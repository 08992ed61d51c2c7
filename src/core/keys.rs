//! Key material store.
//!
//! Two flat files hold the ordered key lists: `identities` (private, age
//! secret keys) and `recipients` (public, one `age1…` key per line). Record
//! `i` of one file always corresponds to record `i` of the other. Both
//! lists are append-only.
//!
//! Mutation always goes through a staged [`KeyRing`]: keys are generated in
//! memory, and persisted files are only touched by [`KeyStore::commit`],
//! which replaces each file atomically.
//!
//! Each identity record carries the `# created:` stamp it was generated
//! with; rewrites keep existing stamps and only stamp new keypairs.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use age::secrecy::ExposeSecret;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::cipher::{self, Identity, Recipient};
use crate::core::config::Config;
use crate::core::fs as store_fs;
use crate::error::{Error, Result, StoreError};

const CREATED: &str = "# created: ";

/// An ordered identity list together with its derived recipients.
#[derive(Clone, Default)]
pub struct KeyRing {
    identities: Vec<Identity>,
    recipients: Vec<Recipient>,
    created: Vec<Option<String>>,
}

impl KeyRing {
    /// An empty key ring.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ring from identities and their creation stamps, deriving
    /// each recipient.
    fn stamped(identities: Vec<Identity>, created: Vec<Option<String>>) -> Self {
        let recipients = identities.iter().map(Identity::to_public).collect();
        Self {
            identities,
            recipients,
            created,
        }
    }

    /// Generate one identity, derive its recipient, and append both.
    ///
    /// Returns the new recipient.
    pub fn append_new_keypair(&mut self) -> &Recipient {
        let identity = Identity::generate();
        let recipient = identity.to_public();
        debug!(recipient = %recipient, index = self.identities.len(), "generated keypair");

        self.identities.push(identity);
        self.recipients.push(recipient);
        self.created.push(Some(
            chrono::Local::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, false),
        ));
        &self.recipients[self.recipients.len() - 1]
    }

    pub fn identities(&self) -> &[Identity] {
        &self.identities
    }

    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl std::fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let recipients: Vec<String> = self.recipients.iter().map(|r| r.to_string()).collect();
        f.debug_struct("KeyRing")
            .field("recipients", &recipients)
            .finish_non_exhaustive()
    }
}

/// Persistent identity and recipient files.
#[derive(Debug, Clone)]
pub struct KeyStore {
    identities_path: PathBuf,
    recipients_path: PathBuf,
}

impl KeyStore {
    pub fn new(config: &Config) -> Self {
        Self {
            identities_path: config.identities_file.clone(),
            recipients_path: config.recipients_file.clone(),
        }
    }

    pub fn identities_path(&self) -> &Path {
        &self.identities_path
    }

    pub fn recipients_path(&self) -> &Path {
        &self.recipients_path
    }

    /// Whether an identity file exists.
    pub fn exists(&self) -> bool {
        self.identities_path.exists()
    }

    /// Generate the first keypair if no identity file exists.
    ///
    /// Returns `true` when a keypair was created.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the key files cannot be written. Nothing is
    /// persisted unless both files are written.
    pub fn ensure_keypair(&self) -> Result<bool> {
        if self.exists() {
            return Ok(false);
        }

        let mut ring = KeyRing::new();
        ring.append_new_keypair();
        self.commit(&ring)?;

        debug!(path = %self.identities_path.display(), "created initial keypair");
        Ok(true)
    }

    /// Current identity sequence.
    pub fn identities(&self) -> Result<Vec<Identity>> {
        Ok(self.load()?.identities)
    }

    /// Current recipient sequence.
    pub fn recipients(&self) -> Result<Vec<Recipient>> {
        Ok(self.load()?.recipients)
    }

    /// Load both files and check that they are aligned.
    ///
    /// A recipients file that is a strict prefix of the derived recipients
    /// (an interrupted commit) is repaired in place.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidKey` for malformed records and
    /// `StoreError::KeyMismatch` if the files disagree.
    pub fn load(&self) -> Result<KeyRing> {
        warn_if_exposed(&self.identities_path);

        let (identities, created): (Vec<_>, Vec<_>) =
            read_records(&self.identities_path, cipher::parse_identity)?
                .into_iter()
                .map(|r| (r.key, r.created))
                .unzip();
        let recipients = if self.recipients_path.exists() {
            read_records(&self.recipients_path, cipher::parse_recipient)?
        } else {
            Vec::new()
        };
        let ring = KeyRing::stamped(identities, created);

        let derived: Vec<String> = ring.recipients.iter().map(|r| r.to_string()).collect();
        let stored: Vec<String> = recipients.iter().map(|r| r.key.to_string()).collect();

        if stored != derived {
            if stored.len() < derived.len() && derived.starts_with(&stored) {
                warn!(
                    path = %self.recipients_path.display(),
                    missing = derived.len() - stored.len(),
                    "recipients file is behind identities, re-deriving"
                );
                store_fs::write_atomic(&self.recipients_path, recipients_file(&ring).as_bytes())?;
            } else {
                return Err(StoreError::KeyMismatch {
                    path: self.recipients_path.clone(),
                }
                .into());
            }
        }

        debug!(keys = ring.len(), "key material loaded");
        Ok(ring)
    }

    /// Staged working copy for a mutation: the persisted ring, or an empty
    /// one if no identities exist yet.
    pub fn stage(&self) -> Result<KeyRing> {
        if self.exists() {
            self.load()
        } else {
            Ok(KeyRing::new())
        }
    }

    /// Atomically replace both key files with the contents of `ring`.
    ///
    /// Identities are written first; if the second replace is interrupted,
    /// [`KeyStore::load`] re-derives the missing recipients.
    pub fn commit(&self, ring: &KeyRing) -> Result<()> {
        for path in [&self.identities_path, &self.recipients_path] {
            if let Some(parent) = path.parent() {
                store_fs::create_private_dir(parent)?;
            }
        }

        let identities = identities_file(ring);
        store_fs::write_atomic(&self.identities_path, identities.as_bytes())?;
        store_fs::write_atomic(&self.recipients_path, recipients_file(ring).as_bytes())?;

        debug!(keys = ring.len(), "key material committed");
        Ok(())
    }
}

/// A parsed key and the creation stamp that preceded it.
struct Record<T> {
    key: T,
    created: Option<String>,
}

/// Parse one key per non-comment line.
fn read_records<T>(path: &Path, parse: fn(&str) -> Option<T>) -> Result<Vec<Record<T>>> {
    let contents = Zeroizing::new(fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?);

    let mut records = Vec::new();
    let mut created = None;
    for (i, line) in contents.lines().enumerate() {
        let line = line.trim();
        if let Some(stamp) = line.strip_prefix(CREATED) {
            created = Some(stamp.to_string());
            continue;
        }
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let key = parse(line).ok_or_else(|| {
            Error::from(StoreError::InvalidKey {
                path: path.to_path_buf(),
                line: i + 1,
            })
        })?;
        records.push(Record {
            key,
            created: created.take(),
        });
    }
    Ok(records)
}

/// Render identities in the age-keygen layout.
fn identities_file(ring: &KeyRing) -> Zeroizing<String> {
    let mut out = Zeroizing::new(String::new());
    let records = ring.identities.iter().zip(&ring.recipients).zip(&ring.created);
    for ((identity, recipient), created) in records {
        if let Some(created) = created {
            let _ = writeln!(out, "{}{}", CREATED, created);
        }
        let _ = writeln!(out, "# public key: {}", recipient);
        let _ = writeln!(out, "{}", identity.to_string().expose_secret());
    }
    out
}

fn recipients_file(ring: &KeyRing) -> String {
    ring.recipients
        .iter()
        .map(|r| format!("{}\n", r))
        .collect()
}

#[cfg(unix)]
fn warn_if_exposed(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "insecure key file permissions"
            );
        }
    }
}

#[cfg(not(unix))]
fn warn_if_exposed(_path: &Path) {}
