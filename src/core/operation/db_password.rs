//! CMS database password.

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::info;
use zeroize::Zeroizing;

use super::{Operation, Readiness};
use crate::core::constants::DB_PASSWORD_LENGTH;
use crate::core::domain::SecretName;
use crate::core::engine::Services;
use crate::error::Result;

fn generate_password() -> Zeroizing<String> {
    Zeroizing::new(
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(DB_PASSWORD_LENGTH)
            .map(char::from)
            .collect(),
    )
}

/// Generates the password the CMS tier uses for its database.
pub struct CreateCmsDatabasePassword<'a> {
    services: &'a Services,
}

impl<'a> CreateCmsDatabasePassword<'a> {
    pub fn new(services: &'a Services) -> Self {
        Self { services }
    }
}

impl Operation for CreateCmsDatabasePassword<'_> {
    fn name(&self) -> &'static str {
        "create-cms-database-password"
    }

    fn is_runnable(&self) -> Result<Readiness> {
        if self
            .services
            .store
            .secret(SecretName::CmsDatabasePassword)?
            .is_some()
        {
            return Ok(Readiness::blocked(format!(
                "{} already present for environment {}",
                SecretName::CmsDatabasePassword,
                self.services.environment.name()
            )));
        }
        Ok(Readiness::Ready)
    }

    fn run(&self) -> Result<()> {
        let password = generate_password();
        self.services
            .store
            .put_secret(SecretName::CmsDatabasePassword, &password)?;
        info!("stored {}", SecretName::CmsDatabasePassword);
        Ok(())
    }
}
