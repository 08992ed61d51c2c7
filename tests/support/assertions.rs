//! Assertions over captured command output.

use predicates::prelude::*;
use std::process::Output;

/// Captured stdout, lossily decoded.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr, lossily decoded.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// The command exited with status 0.
pub fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "expected success, got {}\nstderr:\n{}",
        output.status,
        stderr(output)
    );
}

/// The command exited with a non-zero status.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "expected failure, command succeeded\nstdout:\n{}",
        stdout(output)
    );
}

pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        predicate::str::contains(expected).eval(&out),
        "stdout lacks {:?}:\n{}",
        expected,
        out
    );
}

pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        predicate::str::contains(expected).eval(&err),
        "stderr lacks {:?}:\n{}",
        expected,
        err
    );
}

/// The command failed and reported exactly one `error: ....` line
/// mentioning `expected`.
pub fn assert_error_line(output: &Output, expected: &str) {
    assert_failure(output);

    let err = stderr(output);
    let reports: Vec<&str> = err.lines().filter(|l| l.starts_with("error: ")).collect();
    assert_eq!(reports.len(), 1, "expected one error line:\n{}", err);

    let line = reports[0];
    assert!(
        line.contains(expected) && line.ends_with('.'),
        "unexpected error line: {}",
        line
    );
}
