//! Command helper methods for Test.

use super::{Test, ENVIRONMENT, REGION};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a citadel command against the test's fs store.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test directory
    /// - The demo environment and the fs store backend
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("citadel").expect("failed to find citadel binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        cmd.env("CITADEL_ENVIRONMENT", ENVIRONMENT);
        cmd.env("CITADEL_REGION", REGION);
        cmd.env("CITADEL_STORE", "fs");
        cmd.env("CITADEL_STORE_PATH", self.store_root());
        cmd.env_remove("CITADEL_BUCKET");
        cmd.env_remove("CITADEL_CONFIG");
        cmd.env_remove("CITADEL_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run citadel with arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run citadel")
    }

    pub fn create_vault_acl(&self) -> Output {
        self.run(&["create-vault-acl"])
    }

    pub fn create_cms_database_password(&self) -> Output {
        self.run(&["create-cms-database-password"])
    }

    pub fn upload_certificate_files(&self, dir: &str) -> Output {
        self.run(&["upload-certificate-files", "--cert-dir-path", dir])
    }

    pub fn status(&self) -> Output {
        self.run(&["status"])
    }
}
