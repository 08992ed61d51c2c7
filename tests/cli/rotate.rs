//! Tests for `strongbox rotate`.

use crate::support::*;
use std::fs;

fn records(path: &std::path::Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

#[test]
fn test_rotate_keeps_entries_readable() {
    let t = Test::with_entries(STANDARD_ENTRIES);
    let recipients_before = records(&t.recipients_path());

    let output = t.rotate();
    assert_success(&output);
    assert_stdout_contains(&output, "rotated keys (4 entries)");

    let recipients_after = records(&t.recipients_path());
    assert_eq!(recipients_after.len(), recipients_before.len() + 1);
    assert_eq!(&recipients_after[..recipients_before.len()], &recipients_before[..]);
    assert_eq!(records(&t.identities_path()).len(), recipients_after.len());

    for (name, password) in STANDARD_ENTRIES {
        assert_eq!(stdout(&t.show(name)), format!("{}\n", password));
    }
}

#[test]
fn test_rotate_twice() {
    let t = Test::with_entries(&[("x", "pw")]);

    assert_success(&t.rotate());
    assert_success(&t.rotate());

    assert_eq!(records(&t.recipients_path()).len(), 3);
    assert_eq!(stdout(&t.show("x")), "pw\n");
}

#[test]
fn test_rotate_empty_store() {
    let t = Test::new();

    let output = t.rotate();
    assert_success(&output);
    assert_stdout_contains(&output, "(0 entries)");
    assert_eq!(records(&t.recipients_path()).len(), 2);
}

#[test]
fn test_rotate_undecryptable_entry_leaves_keys() {
    let t = Test::with_entries(&[("a", "1")]);
    let other = Test::with_entries(&[("b", "2")]);
    fs::copy(other.entry_path("b"), t.entry_path("b")).unwrap();

    let identities = fs::read(t.identities_path()).unwrap();
    let recipients = fs::read(t.recipients_path()).unwrap();

    let output = t.rotate();
    assert_error_line(&output, "decryption failed");

    assert_eq!(fs::read(t.identities_path()).unwrap(), identities);
    assert_eq!(fs::read(t.recipients_path()).unwrap(), recipients);
    assert_eq!(stdout(&t.show("a")), "1\n");
}

#[test]
fn test_added_after_rotation_uses_all_recipients() {
    let t = Test::with_entries(&[("x", "pw")]);
    assert_success(&t.rotate());
    assert_success(&t.add("later", "pw2"));

    let ciphertext = fs::read(t.entry_path("later")).unwrap();
    let stanzas = ciphertext
        .windows(b"\n-> X25519 ".len())
        .filter(|w| *w == b"\n-> X25519 ")
        .count();
    assert_eq!(stanzas, 2);
}
