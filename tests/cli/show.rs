//! Tests for `strongbox show`.

use crate::support::*;
use std::fs;

#[test]
fn test_show_exact_bytes() {
    let t = Test::with_entries(&[("bank", "s3cr3t!")]);

    let output = t.show("bank");
    assert_success(&output);
    assert_eq!(output.stdout, b"s3cr3t!\n");
}

#[test]
fn test_show_alias() {
    let t = Test::with_entries(&[("bank", "pw")]);

    let output = t.cmd().args(["s", "bank"]).output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "pw\n");
}

#[test]
fn test_show_missing() {
    let t = Test::new();

    let output = t.show("nope");
    assert_error_line(&output, "not found");
    assert!(output.stdout.is_empty());
}

#[test]
fn test_show_foreign_entry() {
    let t = Test::with_entries(&[("bank", "pw")]);
    let other = Test::with_entries(&[("bank", "other")]);

    fs::copy(other.entry_path("bank"), t.entry_path("bank")).unwrap();

    let output = t.show("bank");
    assert_error_line(&output, "decryption failed");
}

#[test]
fn test_show_missing_name_is_usage_error() {
    let t = Test::new();

    t.cmd().arg("show").assert().failure().code(2);
}
