//! Tests for create-cms-config preconditions on the command line.

use crate::support::*;

#[test]
fn test_missing_secrets_skip_with_exit_code() {
    let t = Test::new();

    let output = t.run(&["create-cms-config", "--admin-group", "cms-admins"]);
    assert_skipped(&output);
    assert_stderr_contains(&output, "CMS Vault token not present for specified environment");
    assert_stderr_contains(&output, "CMS database password not present for specified environment");
    assert!(t.object("data/cms/environment.json").is_none());
}

#[test]
fn test_missing_password_only() {
    let t = Test::new();
    t.seed("data/cms/vault-token", VAULT_TOKEN);

    let output = t.run(&["create-cms-config", "--admin-group", "cms-admins"]);
    assert_skipped(&output);
    assert_stderr_contains(&output, "CMS database password");
}

#[test]
fn test_property_requires_key_value() {
    let t = Test::new();

    let output = t.run(&[
        "create-cms-config",
        "--admin-group",
        "cms-admins",
        "--property",
        "no-equals-sign",
    ]);
    assert_failure(&output);
    assert_stderr_contains(&output, "expected KEY=VALUE");
}
