//! Tests for `strongbox list`.

use crate::support::*;
use std::fs;

#[test]
fn test_list_sorted() {
    let t = Test::with_entries(STANDARD_ENTRIES);

    let output = t.list();
    assert_success(&output);
    assert_eq!(
        stdout(&output),
        "bank\nmail/home\nmail/work\nsocial/chat/alt\n"
    );
}

#[test]
fn test_list_json() {
    let t = Test::with_entries(&[("b", "1"), ("a/x", "2")]);

    let output = t.list_json();
    assert_success(&output);
    let names: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(names, vec!["a/x", "b"]);
}

#[test]
fn test_list_empty() {
    let t = Test::new();

    let output = t.list();
    assert_success(&output);
    assert_stdout_contains(&output, "no entries stored");
}

#[test]
fn test_list_ignores_foreign_files() {
    let t = Test::with_entries(&[("real", "pw")]);
    fs::write(t.store().join("README"), "not an entry").unwrap();
    fs::write(t.store().join(".tmp-abc"), "temporary").unwrap();

    let output = t.cmd().arg("ls").output().unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "real\n");
}
