//! Environment status overview.

use crate::cli::output;
use crate::core::config::Settings;
use crate::core::constants::CERTIFICATE_FILES;
use crate::core::domain::{SecretName, StackKind};
use crate::core::engine::Services;
use crate::core::store::layout;
use crate::error::Result;

/// Show what the config store holds for the environment.
pub fn execute(settings: &Settings, services: &Services) -> Result<()> {
    let store = services.store.as_ref();

    output::section("Citadel Status");
    output::kv("environment", settings.environment.name());
    output::kv("region", settings.environment.region());
    output::kv("bucket", settings.environment.bucket());

    output::section("Stacks");
    for stack in StackKind::ALL {
        let outputs = store.get(&layout::stack_outputs(stack))?.is_some();
        let parameters = store.get(&layout::stack_parameters(stack))?.is_some();
        output::kv(
            stack.as_str(),
            format!(
                "{} outputs  {} parameters",
                output::mark(outputs),
                output::mark(parameters)
            ),
        );
    }

    output::section("Secrets");
    for secret in [
        SecretName::VaultAclToken,
        SecretName::CmsVaultToken,
        SecretName::CmsDatabasePassword,
    ] {
        let present = store.secret(secret)?.is_some();
        output::list_item(&format!("{} {}", output::mark(present), secret));
    }

    output::section("Derived");
    let config = match store.env_config(StackKind::Cms)? {
        Some(config) => format!("{} keys", config.len()),
        None => "not created".to_string(),
    };
    output::kv("cms config", config);

    let mut certificates = 0;
    for file in CERTIFICATE_FILES {
        if store.get(&layout::certificate(file))?.is_some() {
            certificates += 1;
        }
    }
    output::kv(
        "certificates",
        format!("{}/{} uploaded", certificates, CERTIFICATE_FILES.len()),
    );

    let key_pair = store
        .get(layout::KEY_PAIR_NAME)?
        .unwrap_or_else(|| "not imported".to_string());
    output::kv("key pair", key_pair.trim());

    Ok(())
}
