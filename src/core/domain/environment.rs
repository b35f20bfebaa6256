//! Deployment target identity.

use crate::error::{ConfigError, Result};

/// The identity of one deployment target.
///
/// Supplied at process start and never changed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    name: String,
    region: String,
    bucket: String,
}

impl Environment {
    /// Create a validated environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if the name or region is blank,
    /// or `ConfigError::InvalidValue` if the name contains characters that
    /// cannot appear in a DNS label.
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let region = region.into().trim().to_string();
        let bucket = bucket.into().trim().to_string();

        if name.is_empty() {
            return Err(ConfigError::MissingField {
                field: "environment.name",
            }
            .into());
        }
        if region.is_empty() {
            return Err(ConfigError::MissingField {
                field: "environment.region",
            }
            .into());
        }
        if let Some(ch) = name
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '-')
        {
            return Err(ConfigError::InvalidValue {
                field: "environment.name",
                reason: format!("invalid character '{}' in '{}'", ch, name),
            }
            .into());
        }

        Ok(Self {
            name,
            region,
            bucket,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Bucket or namespace holding this environment's configuration.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.region)
    }
}
