//! SSH key pair import.

use std::fs;

use tracing::info;

use super::{Operation, Readiness};
use crate::core::cloud::Ec2Service;
use crate::core::command::ImportKeyPairArgs;
use crate::core::engine::Services;
use crate::core::store::layout;
use crate::error::{PreconditionError, Result};

/// Imports an SSH public key as an EC2 key pair and records its name.
pub struct ImportKeyPair<'a> {
    services: &'a Services,
    args: &'a ImportKeyPairArgs,
}

impl<'a> ImportKeyPair<'a> {
    pub fn new(services: &'a Services, args: &'a ImportKeyPairArgs) -> Self {
        Self { services, args }
    }

    fn ec2(&self) -> Ec2Service<'_> {
        Ec2Service::new(self.services.compute.as_ref())
    }
}

impl Operation for ImportKeyPair<'_> {
    fn name(&self) -> &'static str {
        "import-key-pair"
    }

    fn is_runnable(&self) -> Result<Readiness> {
        if !self.args.public_key_file.is_file() {
            return Err(PreconditionError::MissingFile(self.args.public_key_file.clone()).into());
        }
        if self.ec2().is_key_pair_present(&self.args.key_name)? {
            return Ok(Readiness::blocked(format!(
                "key pair {} already exists",
                self.args.key_name
            )));
        }
        Ok(Readiness::Ready)
    }

    fn run(&self) -> Result<()> {
        let public_key = fs::read_to_string(&self.args.public_key_file).map_err(|_| {
            PreconditionError::MissingFile(self.args.public_key_file.clone())
        })?;

        let name = self.ec2().import_key(&self.args.key_name, public_key.trim())?;
        info!(key_name = %name, "imported key pair");

        self.services.store.put(layout::KEY_PAIR_NAME, &name)?;
        Ok(())
    }
}
