//! Tests for the secret-generating commands.

use crate::support::*;

#[test]
fn test_create_vault_acl_stores_token() {
    let t = Test::new();

    let output = t.create_vault_acl();
    assert_success(&output);
    assert_stdout_contains(&output, "create-vault-acl completed");

    let token = t.object("data/consul/vault-acl-token").expect("token stored");
    assert_eq!(token.len(), 36);
    assert_eq!(token.matches('-').count(), 4);
}

#[test]
fn test_create_vault_acl_twice_is_skipped() {
    let t = Test::new();
    assert_success(&t.create_vault_acl());
    let first = t.object("data/consul/vault-acl-token");

    let output = t.create_vault_acl();
    assert_skipped(&output);
    assert_stderr_contains(&output, "use the update command");
    assert_eq!(t.object("data/consul/vault-acl-token"), first);
}

#[test]
fn test_create_cms_database_password() {
    let t = Test::new();

    assert_success(&t.create_cms_database_password());
    let password = t.object("data/cms/database-password").expect("password stored");
    assert_eq!(password.len(), 32);
    assert!(password.chars().all(|c| c.is_ascii_alphanumeric()));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(t.object_path("data/cms/database-password"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}

#[test]
fn test_existing_database_password_is_kept() {
    let t = Test::new();
    t.seed("data/cms/database-password", DB_PASSWORD);

    assert_skipped(&t.create_cms_database_password());
    assert_eq!(
        t.object("data/cms/database-password").as_deref(),
        Some(DB_PASSWORD)
    );
}
