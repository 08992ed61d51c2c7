//! Test fixtures and constants.

/// A valid age public key with no matching identity in any test store.
pub const FOREIGN_RECIPIENT: &str = "age1ql3z7hjy54pw3hyww5ayyfg7zqgvc7w3j2elw8zmrj2kg5sfn9aqmcac8p";

/// Entries used across multiple tests.
pub const STANDARD_ENTRIES: &[(&str, &str)] = &[
    ("mail/work", "hunter2"),
    ("mail/home", "correct horse"),
    ("bank", "s3cr3t!"),
    ("social/chat/alt", "p@ss word"),
];

/// Names that must never reach the filesystem.
pub const INVALID_NAMES: &[&str] = &["../escape", "a/../../b", "/etc/passwd", "a//b", ".git/x", "a/"];
