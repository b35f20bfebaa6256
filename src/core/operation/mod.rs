//! Operations.
//!
//! An operation is one provisioning step. `is_runnable` is a read-only check
//! of whether the step's side effects are safe and meaningful right now; the
//! engine only calls `run` when it answers [`Readiness::Ready`]. Operations
//! keep no state between invocations: everything lives in the config store
//! or the cloud.

mod certificates;
mod cms_config;
mod db_password;
mod key_pair;
mod placement;
mod upload_certificates;
mod vault_acl;

pub use certificates::{certificate_names, GenerateCertificateFiles};
pub use cms_config::{derive_cms_config, CreateCmsConfig, RequiredSecrets, SecretCheck, Upstream};
pub use db_password::CreateCmsDatabasePassword;
pub use key_pair::ImportKeyPair;
pub use placement::{Placement, PreparePlacement};
pub use upload_certificates::UploadCertificateFiles;
pub use vault_acl::CreateVaultAcl;

use crate::error::Result;

/// Answer of a precondition check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// Not runnable, with the reasons why.
    Blocked(Vec<String>),
}

impl Readiness {
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self::Blocked(vec![reason.into()])
    }

    /// `Ready` when there are no reasons.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            Self::Ready
        } else {
            Self::Blocked(reasons)
        }
    }
}

/// One provisioning step.
pub trait Operation {
    /// Command name the operation runs for.
    fn name(&self) -> &'static str;

    /// Whether running now is safe and meaningful.
    ///
    /// # Errors
    ///
    /// Returns an error only when the check itself could not be made, e.g.
    /// the config store or cloud provider failed.
    fn is_runnable(&self) -> Result<Readiness>;

    /// Perform the step's side effects.
    fn run(&self) -> Result<()>;
}
