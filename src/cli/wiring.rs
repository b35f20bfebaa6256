//! Builds the collaborators of one process from resolved settings.

use std::io::IsTerminal;

use tracing::debug;

use crate::cli::prompt::TerminalPrompt;
use crate::core::acme::{AcmeSettings, LegoClient};
use crate::core::cloud::{ComputeClient, IdentityClient};
use crate::core::config::{Settings, StoreBackend};
use crate::core::engine::Services;
use crate::core::prompt::{Prompt, Unattended};
use crate::core::store::{ConfigStore, FsConfigStore};
use crate::error::Result;

type Clients = (
    Box<dyn ConfigStore>,
    Box<dyn IdentityClient>,
    Box<dyn ComputeClient>,
);

#[cfg(feature = "aws")]
fn clients(settings: &Settings) -> Result<Clients> {
    use crate::core::cloud::aws::{AwsCompute, AwsIdentity, AwsSession};
    use crate::core::store::S3ConfigStore;

    let session = AwsSession::new(settings.environment.region())?;
    let store: Box<dyn ConfigStore> = match &settings.store {
        StoreBackend::Fs { root } => Box::new(fs_store(root, settings)),
        StoreBackend::S3 => Box::new(S3ConfigStore::new(
            session.clone(),
            settings.environment.bucket(),
        )?),
    };

    Ok((
        store,
        Box::new(AwsIdentity::new(session.clone())),
        Box::new(AwsCompute::new(session)),
    ))
}

#[cfg(not(feature = "aws"))]
fn clients(settings: &Settings) -> Result<Clients> {
    use crate::core::cloud::Unavailable;
    use crate::error::ConfigError;

    let store = match &settings.store {
        StoreBackend::Fs { root } => fs_store(root, settings),
        StoreBackend::S3 => {
            return Err(ConfigError::InvalidValue {
                field: "store.backend",
                reason: "the s3 backend needs the `aws` feature".to_string(),
            }
            .into())
        }
    };
    Ok((Box::new(store), Box::new(Unavailable), Box::new(Unavailable)))
}

fn fs_store(root: &std::path::Path, settings: &Settings) -> FsConfigStore {
    FsConfigStore::new(root.join(settings.environment.bucket()))
}

/// Assemble the services for one process.
///
/// `compatibility_mode` is fixed on the certificate authority client here
/// and holds for every request the process makes.
pub fn services(settings: &Settings, compatibility_mode: bool) -> Result<Services> {
    let (store, identity, compute) = clients(settings)?;

    let interactive = std::io::stdin().is_terminal();
    let prompt: Box<dyn Prompt> = if interactive {
        Box::new(TerminalPrompt)
    } else {
        Box::new(Unattended)
    };
    debug!(interactive, store = ?settings.store, "services assembled");

    Ok(Services {
        environment: settings.environment.clone(),
        store,
        identity,
        compute,
        authority: Box::new(LegoClient::new(AcmeSettings {
            binary: settings.acme_binary.clone(),
            compatibility_mode,
        })),
        prompt,
        interactive,
        acme_directory: settings.acme_directory.clone(),
    })
}
