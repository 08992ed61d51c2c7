//! Constants used throughout strongbox.
//!
//! Centralizes magic strings and configuration defaults.

/// Extension of ciphertext files, without the dot.
pub const ENTRY_EXTENSION: &str = "age";

/// Directory under the platform data dir holding keys and the default store.
pub const APP_DIR: &str = "strongbox";

/// Default store root, relative to [`APP_DIR`].
pub const STORE_DIR: &str = "passwords";

/// Private key file name.
pub const IDENTITIES_FILE: &str = "identities";

/// Public key file name.
pub const RECIPIENTS_FILE: &str = "recipients";

/// Prefix of temporary siblings written before an atomic rename.
pub const TEMP_PREFIX: &str = ".tmp-";

/// Prefix of the plaintext scratch directory used by `edit`.
pub const SCRATCH_PREFIX: &str = "strongbox.";

/// Memory-backed scratch location preferred for plaintext.
pub const SHM_DIR: &str = "/dev/shm";

pub const ENV_DIR: &str = "STRONGBOX_DIR";
pub const ENV_KEYS_DIR: &str = "STRONGBOX_KEYS_DIR";
pub const ENV_LENGTH: &str = "STRONGBOX_LENGTH";
pub const ENV_PATTERN: &str = "STRONGBOX_PATTERN";
pub const ENV_NOGIT: &str = "STRONGBOX_NOGIT";
pub const ENV_EDITOR: &str = "EDITOR";
pub const ENV_LOG: &str = "STRONGBOX_LOG";

/// Default generated password length.
pub const DEFAULT_LENGTH: usize = 50;

/// Default generated password character class (`tr` syntax).
pub const DEFAULT_PATTERN: &str = "_A-Z-a-z-0-9";

/// Default editor when `$EDITOR` is unset.
pub const DEFAULT_EDITOR: &str = "vi";

/// Git attribute line routing ciphertext through the textconv driver.
pub const GITATTRIBUTES: &str = "*.age diff=age\n";
