//! Tests for the status command.

use crate::support::*;

#[test]
fn test_status_of_empty_environment() {
    let t = Test::new();

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "demo");
    assert_stdout_contains(&output, "not created");
    assert_stdout_contains(&output, "0/4 uploaded");
}

#[test]
fn test_status_reflects_generated_secrets() {
    let t = Test::new();
    assert_success(&t.create_vault_acl());
    t.seed("data/base/key-pair-name", "demo-ops");

    let output = t.status();
    assert_success(&output);
    assert_stdout_contains(&output, "✓ Vault ACL token");
    assert_stdout_contains(&output, "✗ CMS database password");
    assert_stdout_contains(&output, "demo-ops");
}
