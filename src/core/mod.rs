//! Core library components.
//!
//! This module contains the reusable logic for the secret store: key
//! material, encryption, entry storage, rotation and the audit trail.

pub mod audit;
pub mod cipher;
pub mod config;
pub mod constants;
pub mod editor;
pub mod fs;
pub mod generate;
pub mod keys;
pub mod prompt;
pub mod signal;
pub mod validation;
pub mod vault;
