//! Filesystem-based config store.
//!
//! Each environment namespace is a directory; object keys are relative
//! paths inside it. Writes go to a temporary file in the destination
//! directory and are renamed into place, so readers never see a partial
//! object.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tracing::trace;

use super::ConfigStore;
use crate::error::{Result, StoreError};

/// Directory-backed store.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    root: PathBuf,
}

impl FsConfigStore {
    /// Store rooted at the environment's namespace directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let relative = Path::new(key);
        let valid = !key.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_)));
        if !valid {
            return Err(StoreError::Malformed {
                key: key.to_string(),
                reason: "keys must be relative paths without '..'".to_string(),
            }
            .into());
        }
        Ok(self.root.join(relative))
    }
}

impl ConfigStore for FsConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        trace!(path = %path.display(), "reading object");
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read {
                key: key.to_string(),
                source,
            }
            .into()),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let write_err = |source: std::io::Error| StoreError::Write {
            key: key.to_string(),
            source,
        };

        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).map_err(write_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(value.as_bytes()).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;
        }

        tmp.persist(&path).map_err(|e| write_err(e.error))?;
        trace!(path = %path.display(), bytes = value.len(), "object written");
        Ok(())
    }
}
