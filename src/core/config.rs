//! Operator configuration.
//!
//! Handles reading `citadel.toml` and resolving it, together with command
//! line overrides, into the settings one run uses.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::core::domain::Environment;
use crate::error::{ConfigError, Result};

/// Contents of `citadel.toml`. Every setting is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub environment: EnvironmentSection,
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub acme: AcmeSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentSection {
    pub name: Option<String>,
    pub region: Option<String>,
    pub bucket: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// "s3" or "fs"
    pub backend: Option<String>,
    /// Root directory of the fs backend
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AcmeSection {
    /// ACME directory URL used when a command does not name one
    pub directory: Option<String>,
    /// ACME client binary
    pub binary: Option<String>,
}

impl FileConfig {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the first discovered file
    /// is used, and defaults when there is none.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if an explicit file cannot be read,
    /// or `ConfigError::Parse` if the TOML is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::discover() {
                Some(path) => path,
                None => {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        debug!(path = %path.display(), "loading config");
        let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
            path: path.clone(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// `citadel.toml` in the current directory, then `~/.config/citadel/config.toml`.
    fn discover() -> Option<PathBuf> {
        let local = PathBuf::from(constants::CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("citadel").join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e).into())
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub environment: Option<String>,
    pub region: Option<String>,
    pub bucket: Option<String>,
    pub store: Option<String>,
    pub store_path: Option<PathBuf>,
}

/// Where the config store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// A directory per environment bucket under `root`.
    Fs { root: PathBuf },
    /// An S3 bucket per environment.
    S3,
}

impl StoreBackend {
    fn parse(value: &str, root: PathBuf) -> Result<Self> {
        match value {
            "fs" => Ok(Self::Fs { root }),
            "s3" => Ok(Self::S3),
            other => Err(ConfigError::InvalidValue {
                field: "store.backend",
                reason: format!("unknown backend '{}', expected 's3' or 'fs'", other),
            }
            .into()),
        }
    }

    fn default_name() -> &'static str {
        if cfg!(feature = "aws") {
            "s3"
        } else {
            "fs"
        }
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub store: StoreBackend,
    pub acme_directory: String,
    pub acme_binary: String,
}

impl Settings {
    /// Merge command-line overrides over the file configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` when the environment name, region
    /// or (for the s3 backend) bucket is not set anywhere.
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let name = overrides
            .environment
            .or(file.environment.name)
            .ok_or(ConfigError::MissingField {
                field: "environment.name",
            })?;
        let region = overrides
            .region
            .or(file.environment.region)
            .ok_or(ConfigError::MissingField {
                field: "environment.region",
            })?;

        let root = overrides
            .store_path
            .or(file.store.path)
            .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_STORE_DIR));
        let backend_name = overrides
            .store
            .or(file.store.backend)
            .unwrap_or_else(|| StoreBackend::default_name().to_string());
        let store = StoreBackend::parse(&backend_name, root)?;

        let bucket = match overrides.bucket.or(file.environment.bucket) {
            Some(bucket) => bucket,
            None if matches!(store, StoreBackend::Fs { .. }) => name.clone(),
            None => {
                return Err(ConfigError::MissingField {
                    field: "environment.bucket",
                }
                .into())
            }
        };

        let environment = Environment::new(name, region, bucket)?;
        debug!(%environment, ?store, "settings resolved");

        Ok(Self {
            environment,
            store,
            acme_directory: file
                .acme
                .directory
                .unwrap_or_else(|| constants::DEFAULT_ACME_URL.to_string()),
            acme_binary: file
                .acme
                .binary
                .unwrap_or_else(|| constants::DEFAULT_ACME_BINARY.to_string()),
        })
    }
}
