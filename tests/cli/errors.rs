//! Tests for error handling and CLI flags.

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "create-cms-config");
    assert_stdout_contains(&output, "generate-certificate-files");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.run(&["unknown-command"]);
    assert_failure(&output);
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.run(&["--version"]);
    assert_success(&output);
    assert_stdout_contains(&output, "citadel");
}

#[test]
fn test_missing_environment_has_hint() {
    let t = Test::new();

    let output = t
        .cmd()
        .env_remove("CITADEL_ENVIRONMENT")
        .arg("create-vault-acl")
        .output()
        .unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "missing required setting: environment.name");
    assert_stderr_contains(&output, "--environment");
}

#[test]
fn test_invalid_environment_name() {
    let t = Test::new();

    let output = t.run(&["--environment", "demo_1", "create-vault-acl"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid character '_'");
}

#[test]
fn test_unknown_store_backend() {
    let t = Test::new();

    let output = t.run(&["--store", "consul", "create-vault-acl"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "unknown backend 'consul'");
}

#[test]
fn test_malformed_config_file() {
    let t = Test::new();
    std::fs::write(t.dir.path().join("citadel.toml"), "[environment\n").unwrap();

    let output = t.create_vault_acl();
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to parse config file");
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::new();

    let output = t.run(&["--verbose", "create-vault-acl"]);
    assert_success(&output);
}

#[test]
fn test_completions() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    assert_stdout_contains(&output, "citadel");
}

#[test]
fn test_help_lists_exit_status() {
    use predicates::prelude::*;

    let t = Test::new();
    t.cmd()
        .args(["--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 skipped"));
}

#[test]
fn test_usage_error_exits_one() {
    use predicates::prelude::*;

    let t = Test::new();
    t.cmd()
        .args(["import-key-pair", "--key-name", "ops"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--public-key-file"));
}
