//! Git audit trail through the CLI.

use crate::support::*;
use std::fs;

fn git_available() -> bool {
    which::which("git").is_ok()
}

fn log(t: &Test) -> Vec<String> {
    let output = t.git(&["log", "--format=%s"]);
    assert_success(&output);
    stdout(&output).lines().map(String::from).collect()
}

#[test]
fn test_mutations_are_committed() {
    if !git_available() {
        eprintln!("SKIPPED: git not installed");
        return;
    }
    let t = Test::with_audit();

    assert_success(&t.add("mail/work", "pw"));
    assert_success(&t.add("bank", "pw"));
    assert_success(&t.delete("bank", "y"));
    assert_success(&t.rotate());

    assert_eq!(
        log(&t),
        vec![
            "rotate keys (1 entries)",
            "delete 'bank'",
            "add 'bank'",
            "add 'mail/work'",
            "initial commit",
        ]
    );
    assert_eq!(
        fs::read_to_string(t.store().join(".gitattributes")).unwrap(),
        "*.age diff=age\n"
    );
}

#[test]
fn test_git_passthrough_exit_code() {
    if !git_available() {
        eprintln!("SKIPPED: git not installed");
        return;
    }
    let t = Test::with_audit();
    assert_success(&t.list());

    let output = t.git(&["rev-parse", "--verify", "no-such-ref"]);
    assert_failure(&output);
    assert_ne!(output.status.code(), Some(0));
}

#[test]
fn test_textconv_decrypts_for_diffs() {
    if !git_available() {
        eprintln!("SKIPPED: git not installed");
        return;
    }
    let t = Test::with_audit();
    assert_success(&t.add("site", "pw"));

    let output = t
        .cmd()
        .arg("textconv")
        .arg(t.entry_path("site"))
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(stdout(&output), "pw\n");
}

#[test]
fn test_listing_skips_history() {
    if !git_available() {
        eprintln!("SKIPPED: git not installed");
        return;
    }
    let t = Test::with_audit();
    assert_success(&t.add("only", "pw"));

    assert_eq!(stdout(&t.list()), "only\n");
}
