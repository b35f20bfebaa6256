//! Tests for the certificate commands.

use crate::support::*;

const GENERATE: &[&str] = &[
    "generate-certificate-files",
    "--base-domain",
    "example.com",
    "--hosted-zone-id",
    "Z0123456789",
    "--contact-email",
    "ops@example.com",
    "--no-tty",
];

#[test]
fn test_upload_missing_directory_fails() {
    let t = Test::new();

    let output = t.upload_certificate_files("does-not-exist");
    assert_failure(&output);
    assert_stderr_contains(&output, "required file missing");
    assert_stderr_contains(&output, "does-not-exist");
    assert_stderr_contains(&output, "check the path");
}

#[test]
fn test_upload_with_missing_file_fails() {
    let t = Test::new();
    let dir = t.dir.path().join("certs");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("cert.pem"), PEM).unwrap();

    let output = t.upload_certificate_files("certs");
    assert_failure(&output);
    assert_stderr_contains(&output, "required file missing");
    assert_stderr_contains(&output, "key.pem");
    assert!(t.object("data/certificates/cert.pem").is_none());
}

#[test]
fn test_upload_all_files() {
    let t = Test::new();
    let dir = t.dir.path().join("certs");
    std::fs::create_dir_all(&dir).unwrap();
    for file in ["cert.pem", "key.pem", "ca.pem", "full-chain.pem"] {
        std::fs::write(dir.join(file), PEM).unwrap();
    }

    assert_success(&t.upload_certificate_files("certs"));
    for file in ["cert.pem", "key.pem", "ca.pem", "full-chain.pem"] {
        assert_eq!(
            t.object(&format!("data/certificates/{}", file)).as_deref(),
            Some(PEM)
        );
    }
}

#[test]
fn test_generate_into_regular_file_fails() {
    let t = Test::new();
    std::fs::write(t.dir.path().join("certs"), "occupied").unwrap();

    let output = t.run(GENERATE);
    assert_failure(&output);
    assert_stderr_contains(&output, "not a directory or is not writable");
}

#[test]
fn test_generate_without_acme_client_fails() {
    let t = Test::new();
    std::fs::write(
        t.dir.path().join("citadel.toml"),
        "[acme]\nbinary = \"citadel-test-missing-acme-client\"\n",
    )
    .unwrap();

    let output = t.run(GENERATE);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to generate certificates");
    assert!(t.dir.path().join("certs").is_dir());
}
