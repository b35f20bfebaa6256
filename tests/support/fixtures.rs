//! Test fixtures and constants.

use citadel::core::domain::{Environment, StackKind, StackRecord};
use citadel::core::store::MemoryStore;

pub const ENVIRONMENT: &str = "demo";
pub const REGION: &str = "us-west-2";
pub const ACCOUNT: &str = "111122223333";

pub const VAULT_TOKEN: &str = "s.bootstrap-token";
pub const DB_PASSWORD: &str = "Zq4tV2c9LmPx8RwK3sYhN6bJ1dFgTa0E";
pub const JDBC_URL: &str = "jdbc:mysql://cms-db.internal:3306/cms";

pub const SSH_PUBLIC_KEY: &str =
    "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIG0bWnUj2Pq0k3d5m1q9b4yH8lX2nR7sT6vW1xY3zA5B ops@demo";

pub const PEM: &str = "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n";

pub fn environment() -> Environment {
    Environment::new(ENVIRONMENT, REGION, ENVIRONMENT).expect("valid environment")
}

pub fn base_outputs() -> StackRecord {
    [
        ("CmsIamRoleArn", "arn:aws:iam::111122223333:role/demo-cms"),
        ("CmsDbJdbcConnectionString", JDBC_URL),
        ("ConfigFileKeyId", "0d1e2f3a-key"),
        ("VpcId", "vpc-0abc"),
    ]
    .into_iter()
    .collect()
}

pub fn base_parameters() -> StackRecord {
    [("AccountAdminArn", "arn:aws:iam::111122223333:role/admin")]
        .into_iter()
        .collect()
}

pub fn vault_parameters() -> StackRecord {
    [("Cname", "vault.demo.example.com.")].into_iter().collect()
}

/// Store holding every stack record the configuration is derived from.
pub fn deployed_store() -> MemoryStore {
    MemoryStore::new()
        .with_outputs(StackKind::Base, &base_outputs())
        .with_parameters(StackKind::Base, &base_parameters())
        .with_parameters(StackKind::Vault, &vault_parameters())
}
