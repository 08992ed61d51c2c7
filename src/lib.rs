//! Strongbox - a personal secret store.
//!
//! Every entry is a single age-encrypted file in a directory tree, named
//! like `mail/work`. Decryption needs a private identity that never leaves
//! the key directory. Keys can be rotated without ever leaving an entry
//! undecryptable, and every mutation is committed to a git history.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── add/show/edit/delete/list
//! │   ├── rotate        # Key rotation
//! │   ├── git           # Run git in the store
//! │   ├── textconv      # Decrypt for git diffs
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # Environment configuration
//!     ├── cipher/       # Encryption boundary (age)
//!     ├── keys          # Identity / recipient files
//!     ├── validation    # Entry names
//!     ├── fs            # Atomic replace, scratch area
//!     ├── prompt        # Confirmation and hidden input
//!     ├── audit         # Git history
//!     └── vault/        # Entry store and rotation
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::Config;
pub use crate::core::validation::EntryName;
pub use crate::core::vault::{RotationReport, Vault};
pub use crate::error::{Error, Result};
