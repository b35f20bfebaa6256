//! CMS environment configuration.
//!
//! Gathers the values the CMS tier needs at runtime from the caller's
//! identity, the base and Vault stacks, and the secrets stored for the
//! environment, then uploads them as one object.

use std::collections::BTreeMap;

use tracing::{info, warn};
use zeroize::Zeroizing;

use super::{Operation, Readiness};
use crate::core::cloud::root_user_arn;
use crate::core::command::CreateCmsConfigArgs;
use crate::core::constants::{keys, DEFAULT_CMS_DB_NAME};
use crate::core::domain::stack::{BaseOutputs, BaseParameters, VaultParameters};
use crate::core::domain::{SecretName, StackKind};
use crate::core::engine::Services;
use crate::core::merge::{merge, ConfigLayer, Merged};
use crate::core::store::ConfigStore;
use crate::error::{PreconditionError, Result};

/// Secrets that must exist before the configuration can be derived.
pub struct RequiredSecrets {
    pub vault_token: Zeroizing<String>,
    pub database_password: Zeroizing<String>,
}

impl std::fmt::Debug for RequiredSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequiredSecrets").finish_non_exhaustive()
    }
}

/// Outcome of the presence check shared by `is_runnable` and `run`.
#[derive(Debug)]
pub enum SecretCheck {
    Present(RequiredSecrets),
    Missing(Vec<SecretName>),
}

impl SecretCheck {
    /// Read both secrets, naming every one that is absent.
    pub fn load(store: &dyn ConfigStore) -> Result<Self> {
        let vault_token = store.secret(SecretName::CmsVaultToken)?;
        let database_password = store.secret(SecretName::CmsDatabasePassword)?;

        match (vault_token, database_password) {
            (Some(token), Some(password)) => Ok(Self::Present(RequiredSecrets {
                vault_token: Zeroizing::new(token),
                database_password: Zeroizing::new(password),
            })),
            (token, password) => {
                let mut missing = Vec::new();
                if token.is_none() {
                    missing.push(SecretName::CmsVaultToken);
                }
                if password.is_none() {
                    missing.push(SecretName::CmsDatabasePassword);
                }
                Ok(Self::Missing(missing))
            }
        }
    }
}

/// Upstream state the configuration is derived from.
#[derive(Debug)]
pub struct Upstream {
    pub account: String,
    pub base_outputs: BaseOutputs,
    pub base_parameters: BaseParameters,
    pub vault_parameters: VaultParameters,
    pub secrets: RequiredSecrets,
}

/// Derive the CMS configuration.
///
/// Pure: identical inputs always give an identical map and conflict list.
pub fn derive_cms_config(
    admin_group: &str,
    upstream: &Upstream,
    overrides: &BTreeMap<String, String>,
) -> Merged {
    let layers = [
        ConfigLayer::new("identity")
            .with(keys::ROOT_USER_ARN, root_user_arn(&upstream.account))
            .with(keys::CMS_ADMIN_GROUP, admin_group),
        ConfigLayer::new("base stack")
            .with(keys::ADMIN_ROLE_ARN, &upstream.base_parameters.account_admin_arn)
            .with(keys::CMS_ROLE_ARN, &upstream.base_outputs.cms_iam_role_arn)
            .with(
                keys::JDBC_URL,
                &upstream.base_outputs.cms_db_jdbc_connection_string,
            )
            .with(keys::JDBC_USERNAME, DEFAULT_CMS_DB_NAME),
        ConfigLayer::new("vault stack").with(
            keys::VAULT_ADDR,
            format!("https://{}", upstream.vault_parameters.host()),
        ),
        ConfigLayer::new("secrets")
            .with(keys::VAULT_TOKEN, upstream.secrets.vault_token.as_str())
            .with(
                keys::JDBC_PASSWORD,
                upstream.secrets.database_password.as_str(),
            ),
    ];

    merge(layers, overrides)
}

/// Gathers the CMS environment configuration and puts it in the config store.
pub struct CreateCmsConfig<'a> {
    services: &'a Services,
    args: &'a CreateCmsConfigArgs,
}

impl<'a> CreateCmsConfig<'a> {
    pub fn new(services: &'a Services, args: &'a CreateCmsConfigArgs) -> Self {
        Self { services, args }
    }

    fn gather(&self, secrets: RequiredSecrets) -> Result<Upstream> {
        let store = self.services.store.as_ref();

        info!("retrieving configuration data from the config store");
        let base_outputs = store.stack_outputs(StackKind::Base)?.view()?;
        let base_parameters = store.stack_parameters(StackKind::Base)?.view()?;
        let vault_parameters = store.stack_parameters(StackKind::Vault)?.view()?;
        let account = self.services.identity.caller_account()?;

        Ok(Upstream {
            account,
            base_outputs,
            base_parameters,
            vault_parameters,
            secrets,
        })
    }
}

impl Operation for CreateCmsConfig<'_> {
    fn name(&self) -> &'static str {
        "create-cms-config"
    }

    fn is_runnable(&self) -> Result<Readiness> {
        match SecretCheck::load(self.services.store.as_ref())? {
            SecretCheck::Present(_) => Ok(Readiness::Ready),
            SecretCheck::Missing(missing) => Ok(Readiness::Blocked(
                missing
                    .iter()
                    .map(|name| format!("{} not present for specified environment", name))
                    .collect(),
            )),
        }
    }

    fn run(&self) -> Result<()> {
        let secrets = match SecretCheck::load(self.services.store.as_ref())? {
            SecretCheck::Present(secrets) => secrets,
            SecretCheck::Missing(missing) => {
                let first = missing
                    .first()
                    .copied()
                    .unwrap_or(SecretName::CmsVaultToken);
                return Err(PreconditionError::MissingSecret(first.label()).into());
            }
        };

        let upstream = self.gather(secrets)?;
        let merged = derive_cms_config(
            &self.args.admin_group,
            &upstream,
            &self.args.additional_properties(),
        );
        for conflict in &merged.conflicts {
            warn!(key = %conflict.key, layer = conflict.layer, "{}", conflict);
        }

        info!(
            keys = merged.config.len(),
            "uploading the CMS configuration to the config store"
        );
        self.services
            .store
            .store_env_config(StackKind::Cms, &merged.config)?;
        info!("upload complete");

        Ok(())
    }
}
