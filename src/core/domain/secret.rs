//! Names of the secrets kept in the config store.

use super::StackKind;

/// A secret held in the config store for one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecretName {
    /// ACL token the secret backend uses to reach its storage tier.
    VaultAclToken,
    /// Bootstrap token that seeds the application tier's backend access.
    CmsVaultToken,
    /// Application tier database password.
    CmsDatabasePassword,
}

impl SecretName {
    /// Stack that owns the secret.
    pub fn owner(&self) -> StackKind {
        match self {
            Self::VaultAclToken => StackKind::Consul,
            Self::CmsVaultToken | Self::CmsDatabasePassword => StackKind::Cms,
        }
    }

    /// File name under the owner's data prefix.
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::VaultAclToken => "vault-acl-token",
            Self::CmsVaultToken => "vault-token",
            Self::CmsDatabasePassword => "database-password",
        }
    }

    /// Human-readable name used in logs and skip reasons.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VaultAclToken => "Vault ACL token",
            Self::CmsVaultToken => "CMS Vault token",
            Self::CmsDatabasePassword => "CMS database password",
        }
    }
}

impl std::fmt::Display for SecretName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
