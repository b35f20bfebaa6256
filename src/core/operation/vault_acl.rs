//! Vault ACL token for the storage tier.

use tracing::info;
use uuid::Uuid;

use super::{Operation, Readiness};
use crate::core::domain::SecretName;
use crate::core::engine::Services;
use crate::error::Result;

/// Generates the ACL token Vault uses against its storage tier.
pub struct CreateVaultAcl<'a> {
    services: &'a Services,
}

impl<'a> CreateVaultAcl<'a> {
    pub fn new(services: &'a Services) -> Self {
        Self { services }
    }
}

impl Operation for CreateVaultAcl<'_> {
    fn name(&self) -> &'static str {
        "create-vault-acl"
    }

    fn is_runnable(&self) -> Result<Readiness> {
        if self.services.store.secret(SecretName::VaultAclToken)?.is_some() {
            return Ok(Readiness::blocked(format!(
                "{} already present for environment {}, use the update command",
                SecretName::VaultAclToken,
                self.services.environment.name()
            )));
        }
        Ok(Readiness::Ready)
    }

    fn run(&self) -> Result<()> {
        let token = Uuid::new_v4().to_string();
        self.services
            .store
            .put_secret(SecretName::VaultAclToken, &token)?;
        info!("stored {}", SecretName::VaultAclToken);
        Ok(())
    }
}
