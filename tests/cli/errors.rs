//! Usage and error reporting.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_no_subcommand_prints_usage() {
    let t = Test::new();

    t.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_unknown_subcommand_prints_usage() {
    let t = Test::new();

    t.cmd()
        .arg("frobnicate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_name_is_usage_error() {
    let t = Test::new();

    for cmd in ["add", "delete", "edit", "show"] {
        t.cmd().arg(cmd).assert().failure();
    }
}

#[test]
fn test_invalid_length_config() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["add", "x"])
        .env("STRONGBOX_LENGTH", "zero")
        .write_stdin("y")
        .output()
        .unwrap();
    assert_error_line(&output, "STRONGBOX_LENGTH");
}

#[test]
fn test_git_disabled() {
    let t = Test::new();

    let output = t.git(&["status"]);
    assert_error_line(&output, "auditing is disabled");
}

#[test]
fn test_completions() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strongbox"));
}

#[test]
fn test_first_use_creates_keys() {
    let t = Test::new();
    assert_success(&t.list());

    assert!(t.identities_path().is_file());
    let recipients = std::fs::read_to_string(t.recipients_path()).unwrap();
    assert!(recipients.trim().starts_with("age1"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(t.identities_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }
}
