//! Constants used throughout citadel.
//!
//! Centralizes configuration keys, store layout and file names.

/// Operator configuration file name (citadel.toml).
pub const CONFIG_FILE: &str = "citadel.toml";

/// Default root directory for the filesystem store.
pub const DEFAULT_STORE_DIR: &str = ".citadel/store";

/// Default certificate output directory.
pub const DEFAULT_CERT_DIR: &str = "certs";

/// Let's Encrypt production ACME directory.
pub const DEFAULT_ACME_URL: &str = "https://acme-v02.api.letsencrypt.org/directory";

/// Default ACME client binary.
pub const DEFAULT_ACME_BINARY: &str = "lego";

/// Database user name for the application tier.
pub const DEFAULT_CMS_DB_NAME: &str = "cms";

/// Length of generated database passwords.
pub const DB_PASSWORD_LENGTH: usize = 32;

/// Tag that marks an AMI as built for a given stack component.
pub const AMI_COMPONENT_TAG: &str = "tag:component";

/// Certificate files laid out by the certificate-authority client.
pub const CERT_FILE: &str = "cert.pem";
pub const KEY_FILE: &str = "key.pem";
pub const CA_FILE: &str = "ca.pem";
pub const FULL_CHAIN_FILE: &str = "full-chain.pem";

/// Files `upload-certificate-files` expects in the certificate directory.
pub const CERTIFICATE_FILES: &[&str] = &[CERT_FILE, KEY_FILE, CA_FILE, FULL_CHAIN_FILE];

/// Keys of the application tier's environment configuration.
pub mod keys {
    pub const VAULT_ADDR: &str = "vault.addr";
    pub const VAULT_TOKEN: &str = "vault.token";
    pub const CMS_ADMIN_GROUP: &str = "cms.admin.group";
    pub const ROOT_USER_ARN: &str = "root.user.arn";
    pub const ADMIN_ROLE_ARN: &str = "admin.role.arn";
    pub const CMS_ROLE_ARN: &str = "cms.role.arn";
    pub const JDBC_URL: &str = "JDBC.url";
    pub const JDBC_USERNAME: &str = "JDBC.username";
    pub const JDBC_PASSWORD: &str = "JDBC.password";
}
