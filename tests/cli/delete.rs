//! Tests for `strongbox delete`.

use crate::support::*;

#[test]
fn test_delete_confirmed() {
    let t = Test::with_entries(&[("a/b/c", "pw")]);

    let output = t.delete("a/b/c", "y");
    assert_success(&output);
    assert_stderr_contains(&output, "Delete entry 'a/b/c'?");

    assert!(!t.entry_path("a/b/c").exists());
    assert!(!t.store().join("a").exists());
    assert!(t.store().is_dir());
}

#[test]
fn test_delete_declined_keeps_entry() {
    let t = Test::with_entries(&[("x", "pw")]);

    for answer in ["n", "q", ""] {
        let output = t.delete("x", answer);
        assert_error_line(&output, "aborted");
        assert!(t.entry_path("x").is_file());
    }
}

#[test]
fn test_delete_aliases() {
    let t = Test::with_entries(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);

    for (alias, name) in [("del", "a"), ("d", "b"), ("rm", "c"), ("delete", "d")] {
        let output = t
            .cmd()
            .args([alias, name])
            .write_stdin("Y")
            .output()
            .unwrap();
        assert_success(&output);
        assert!(!t.entry_path(name).exists());
    }
}

#[test]
fn test_delete_missing_does_not_prompt() {
    let t = Test::new();

    let output = t.delete("nope", "y");
    assert_error_line(&output, "not found");
    assert!(!stderr(&output).contains("Delete entry"));
}
