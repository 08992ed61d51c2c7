//! Tests for `strongbox add`.

use crate::support::*;

#[test]
fn test_add_entered_password() {
    let t = Test::new();

    let output = t.add("mail/work", "hunter2");
    assert_success(&output);
    assert_stdout_contains(&output, "added mail/work");

    assert!(t.entry_path("mail/work").is_file());
    assert_eq!(stdout(&t.show("mail/work")), "hunter2\n");
}

#[test]
fn test_add_generated_password() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["add", "gen"])
        .env("STRONGBOX_LENGTH", "24")
        .env("STRONGBOX_PATTERN", "a-f")
        .write_stdin("y")
        .output()
        .unwrap();
    assert_success(&output);

    let shown = stdout(&t.show("gen"));
    let password = shown.strip_suffix('\n').expect("stored with newline");
    assert_eq!(password.len(), 24);
    assert!(password.chars().all(|c| ('a'..='f').contains(&c)));
}

#[test]
fn test_add_default_generated_length() {
    let t = Test::new();
    assert_success(&t.add_generated("gen"));

    let shown = stdout(&t.show("gen"));
    assert_eq!(shown.trim_end().chars().count(), 50);
}

#[test]
fn test_add_existing_fails_and_keeps_value() {
    let t = Test::with_entries(&[("x", "p1")]);

    let output = t.add("x", "p2");
    assert_error_line(&output, "already exists");
    assert_eq!(stdout(&t.show("x")), "p1\n");
}

#[test]
fn test_add_mismatch_stores_nothing() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["add", "x"])
        .write_stdin("nfirst\nsecond\n")
        .output()
        .unwrap();

    assert_error_line(&output, "do not match");
    assert!(!t.entry_path("x").exists());
}

#[test]
fn test_add_empty_password_fails() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["add", "x"])
        .write_stdin("n\n\n")
        .output()
        .unwrap();

    assert_error_line(&output, "empty");
    assert!(!t.entry_path("x").exists());
}

#[test]
fn test_add_alias() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["a", "short"])
        .write_stdin("npw\npw\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert!(t.entry_path("short").is_file());
}

#[test]
fn test_add_invalid_names() {
    let t = Test::new();

    for name in INVALID_NAMES {
        let output = t.add(name, "pw");
        assert_failure(&output);
    }
    assert!(!t.dir.path().join("escape.age").exists());
    assert_eq!(stdout(&t.list_json()).trim(), "[]");
}
