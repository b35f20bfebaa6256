//! Config store.
//!
//! Durable key/value backend holding stack outputs, stack parameters,
//! secrets and derived configuration for one environment. Backends only
//! implement `get` and `put`; the layout of records is defined once here.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `ConfigStore` trait (`put` must replace an object atomically)
//! 2. Add the implementation in a new file
//! 3. Re-export from this module and select it in `cli::wiring`

use tracing::debug;

use crate::core::domain::{EffectiveConfig, SecretName, StackKind, StackRecord};
use crate::error::{Result, StoreError};

mod fs;
mod memory;

#[cfg(feature = "aws")]
mod s3;

pub use fs::FsConfigStore;
pub use memory::MemoryStore;

#[cfg(feature = "aws")]
pub use s3::S3ConfigStore;

/// Key layout inside an environment's namespace.
pub mod layout {
    use crate::core::domain::{SecretName, StackKind};

    pub fn stack_outputs(stack: StackKind) -> String {
        format!("data/{0}/{0}-outputs.json", stack)
    }

    pub fn stack_parameters(stack: StackKind) -> String {
        format!("data/{0}/{0}-parameters.json", stack)
    }

    pub fn secret(name: SecretName) -> String {
        format!("data/{}/{}", name.owner(), name.file_name())
    }

    pub fn env_config(stack: StackKind) -> String {
        format!("data/{}/environment.json", stack)
    }

    pub fn placement(stack: StackKind) -> String {
        format!("data/{}/placement.json", stack)
    }

    pub fn certificate(file: &str) -> String {
        format!("data/certificates/{}", file)
    }

    pub const KEY_PAIR_NAME: &str = "data/base/key-pair-name";
}

/// Config store trait.
pub trait ConfigStore {
    /// Read an object, `None` if it does not exist.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write an object, replacing any previous value as a single unit.
    fn put(&self, key: &str, value: &str) -> Result<()>;

    /// Outputs published by a stack.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::MissingRecord` if the stack has not been deployed.
    fn stack_outputs(&self, stack: StackKind) -> Result<StackRecord> {
        read_record(self, &layout::stack_outputs(stack))
    }

    /// Parameters a stack was deployed with.
    fn stack_parameters(&self, stack: StackKind) -> Result<StackRecord> {
        read_record(self, &layout::stack_parameters(stack))
    }

    fn secret(&self, name: SecretName) -> Result<Option<String>> {
        self.get(&layout::secret(name))
    }

    fn put_secret(&self, name: SecretName, value: &str) -> Result<()> {
        self.put(&layout::secret(name), value)
    }

    /// Persist a stack's effective configuration as one object.
    fn store_env_config(&self, stack: StackKind, config: &EffectiveConfig) -> Result<()> {
        let bytes = config.to_bytes()?;
        let text = String::from_utf8(bytes).map_err(|e| StoreError::Malformed {
            key: layout::env_config(stack),
            reason: e.to_string(),
        })?;
        self.put(&layout::env_config(stack), &text)
    }

    /// Read back a stack's effective configuration.
    fn env_config(&self, stack: StackKind) -> Result<Option<EffectiveConfig>> {
        let key = layout::env_config(stack);
        match self.get(&key)? {
            Some(text) => serde_json::from_str(&text)
                .map(Some)
                .map_err(|e| StoreError::Malformed {
                    key,
                    reason: e.to_string(),
                }
                .into()),
            None => Ok(None),
        }
    }
}

fn read_record<S: ConfigStore + ?Sized>(store: &S, key: &str) -> Result<StackRecord> {
    debug!(key, "reading stack record");
    let text = store
        .get(key)?
        .ok_or_else(|| StoreError::MissingRecord(key.to_string()))?;
    serde_json::from_str(&text).map_err(|e| {
        StoreError::Malformed {
            key: key.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_keys() {
        assert_eq!(
            layout::stack_outputs(StackKind::Base),
            "data/base/base-outputs.json"
        );
        assert_eq!(
            layout::stack_parameters(StackKind::Vault),
            "data/vault/vault-parameters.json"
        );
        assert_eq!(
            layout::secret(SecretName::CmsVaultToken),
            "data/cms/vault-token"
        );
        assert_eq!(
            layout::secret(SecretName::VaultAclToken),
            "data/consul/vault-acl-token"
        );
        assert_eq!(layout::env_config(StackKind::Cms), "data/cms/environment.json");
    }

    #[test]
    fn test_missing_stack_record() {
        let store = MemoryStore::new();
        let err = store.stack_outputs(StackKind::Base).unwrap_err();
        assert!(err.to_string().contains("data/base/base-outputs.json"));
    }

    #[test]
    fn test_malformed_stack_record() {
        let store = MemoryStore::new();
        store.put(&layout::stack_outputs(StackKind::Base), "not json").unwrap();
        let err = store.stack_outputs(StackKind::Base).unwrap_err();
        assert!(err.to_string().contains("malformed record"));
    }

    #[test]
    fn test_env_config_roundtrip_through_store() {
        let store = MemoryStore::new();
        let mut config = EffectiveConfig::new();
        config.insert_absent("vault.addr", "https://vault.demo.example.com");
        store.store_env_config(StackKind::Cms, &config).unwrap();
        assert_eq!(store.env_config(StackKind::Cms).unwrap(), Some(config));
        assert_eq!(store.put_count(), 1);
    }
}
