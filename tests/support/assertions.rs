//! Test assertion helpers.

use std::process::Output;

/// Exit status of a skipped command.
pub const EXIT_SKIPPED: i32 = 2;

/// Assert that a command completed.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("Command failed:\n{}", stderr);
    }
}

/// Assert that a command failed with a fatal error.
pub fn assert_failure(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(1),
        "expected exit 1, stderr: {}",
        stderr(output)
    );
}

/// Assert that a command was skipped because its precondition did not hold.
pub fn assert_skipped(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(EXIT_SKIPPED),
        "expected exit {}, stderr: {}",
        EXIT_SKIPPED,
        stderr(output)
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stdout contains a string.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

/// Assert stderr contains a string.
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let err = stderr(output);
    assert!(
        err.contains(expected),
        "stderr missing '{}', got: {}",
        expected,
        err
    );
}
