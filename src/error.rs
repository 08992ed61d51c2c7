//! Error types.
//!
//! Each concern has its own enum; [`Error`] wraps them so that every core
//! operation can return a single [`Result`] and propagate with `?`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error for all strongbox operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error(transparent)]
    Abort(#[from] AbortError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Interrupts follow the shell convention of 128 + SIGINT.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Abort(AbortError::Interrupted) => 130,
            _ => 1,
        }
    }
}

/// Malformed or unsafe entry names.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("entry name cannot be empty")]
    EmptyName,

    #[error("entry name '{0}' goes out of bounds")]
    Traversal(String),

    #[error("entry name '{0}' cannot start with '/'")]
    Absolute(String),

    #[error("entry name '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("entry name '{name}' contains a hidden segment '{segment}'")]
    HiddenSegment { name: String, segment: String },

    #[error("entry name contains a NUL byte")]
    NulByte,
}

/// Presence conflicts on entries.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("entry '{0}' already exists")]
    AlreadyExists(String),

    #[error("entry '{0}' not found")]
    NotFound(String),
}

/// Failures at the encryption boundary.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("no recipients to encrypt to")]
    NoRecipients,

    #[error("no identities available for decryption")]
    NoIdentities,
}

/// Filesystem and key material failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to replace {path}: {source}")]
    Replace { path: PathBuf, source: io::Error },

    #[error("failed to remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },

    #[error("failed to create scratch area: {0}")]
    Scratch(io::Error),

    #[error("invalid key record in {path} at line {line}")]
    InvalidKey { path: PathBuf, line: usize },

    #[error("recipients file {path} does not match the identities file")]
    KeyMismatch { path: PathBuf },
}

/// Invalid environment configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to determine the data directory, set {0}")]
    NoDataDir(&'static str),

    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Audit trail (git) failures. Never fatal to a completed mutation.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("git executable not found")]
    GitNotFound,

    #[error("auditing is disabled")]
    Disabled,

    #[error("`git {command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("failed to run git: {0}")]
    Spawn(io::Error),
}

/// The operator declined or interrupted an operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbortError {
    #[error("aborted by user")]
    Declined,

    #[error("input cannot be empty")]
    EmptyInput,

    #[error("inputs do not match")]
    Mismatch,

    #[error("interrupted")]
    Interrupted,

    #[error("editor exited with {0}")]
    EditorFailed(String),
}

pub type Result<T> = std::result::Result<T, Error>;
