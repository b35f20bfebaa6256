//! Operation engine.
//!
//! Resolves a command to its operation and drives it: the precondition is
//! checked first, and `run` is only reached when it holds. A failed
//! precondition is reported as [`Outcome::Skipped`], which callers can tell
//! apart from an error. Nothing is retried.

use tracing::{debug, info, warn};

use crate::core::acme::CertificateAuthority;
use crate::core::cloud::{ComputeClient, IdentityClient};
use crate::core::command::Command;
use crate::core::domain::Environment;
use crate::core::operation::{
    CreateCmsConfig, CreateCmsDatabasePassword, CreateVaultAcl, GenerateCertificateFiles,
    ImportKeyPair, Operation, PreparePlacement, Readiness, UploadCertificateFiles,
};
use crate::core::prompt::Prompt;
use crate::core::store::ConfigStore;
use crate::error::Result;

/// Collaborators shared by every operation of one process.
pub struct Services {
    pub environment: Environment,
    pub store: Box<dyn ConfigStore>,
    pub identity: Box<dyn IdentityClient>,
    pub compute: Box<dyn ComputeClient>,
    pub authority: Box<dyn CertificateAuthority>,
    pub prompt: Box<dyn Prompt>,
    /// Whether the process is attached to a terminal.
    pub interactive: bool,
    /// ACME directory used when a command does not name one.
    pub acme_directory: String,
}

/// How a command ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed {
        operation: &'static str,
    },
    /// The precondition did not hold and `run` was not called.
    Skipped {
        operation: &'static str,
        reasons: Vec<String>,
    },
}

impl Outcome {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Completed { operation } | Self::Skipped { operation, .. } => operation,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

pub struct Engine {
    services: Services,
}

impl Engine {
    pub fn new(services: Services) -> Self {
        Self { services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    /// The one operation that handles `command`.
    pub fn resolve<'a>(&'a self, command: &'a Command) -> Box<dyn Operation + 'a> {
        let services = &self.services;
        match command {
            Command::CreateCmsConfig(args) => Box::new(CreateCmsConfig::new(services, args)),
            Command::GenerateCertificateFiles(args) => {
                Box::new(GenerateCertificateFiles::new(services, args))
            }
            Command::UploadCertificateFiles(args) => {
                Box::new(UploadCertificateFiles::new(services, args))
            }
            Command::CreateVaultAcl => Box::new(CreateVaultAcl::new(services)),
            Command::CreateCmsDatabasePassword => {
                Box::new(CreateCmsDatabasePassword::new(services))
            }
            Command::ImportKeyPair(args) => Box::new(ImportKeyPair::new(services, args)),
            Command::PreparePlacement(args) => Box::new(PreparePlacement::new(services, args)),
        }
    }

    /// Check the operation's precondition and run it when it holds.
    ///
    /// # Errors
    ///
    /// Any error from the precondition check or from `run`.
    pub fn drive(&self, operation: &dyn Operation) -> Result<Outcome> {
        let name = operation.name();
        debug!(operation = name, environment = %self.services.environment, "checking precondition");

        match operation.is_runnable()? {
            Readiness::Ready => {
                info!(operation = name, "running");
                if let Err(e) = operation.run() {
                    debug!(operation = name, error = %e, "run failed");
                    return Err(e);
                }
                info!(operation = name, "completed");
                Ok(Outcome::Completed { operation: name })
            }
            Readiness::Blocked(reasons) => {
                for reason in &reasons {
                    warn!(operation = name, "{}", reason);
                }
                warn!(operation = name, "skipped: precondition failed");
                Ok(Outcome::Skipped {
                    operation: name,
                    reasons,
                })
            }
        }
    }

    /// Resolve and drive one command.
    pub fn execute(&self, command: &Command) -> Result<Outcome> {
        let operation = self.resolve(command);
        self.drive(operation.as_ref())
    }
}
