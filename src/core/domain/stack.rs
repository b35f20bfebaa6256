//! Stacks and typed views over their outputs and parameters.
//!
//! The infrastructure layer publishes each stack's outputs and parameters as
//! a flat string map. Operations read them through the typed views here so a
//! missing key surfaces as a named [`StackError::MissingField`] instead of an
//! empty string deep inside a derived value.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StackError};

/// A logical stack of the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackKind {
    Base,
    Consul,
    Vault,
    Gateway,
    Cms,
}

impl StackKind {
    pub const ALL: [StackKind; 5] = [
        StackKind::Base,
        StackKind::Consul,
        StackKind::Vault,
        StackKind::Gateway,
        StackKind::Cms,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Consul => "consul",
            Self::Vault => "vault",
            Self::Gateway => "gateway",
            Self::Cms => "cms",
        }
    }
}

impl std::fmt::Display for StackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StackKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown stack '{}', expected one of: base, consul, vault, gateway, cms",
                    s
                )
            })
    }
}

/// Raw outputs or parameters of one stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StackRecord {
    fields: BTreeMap<String, String>,
}

impl StackRecord {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Decode a typed view, naming the first missing required field.
    pub fn view<T: StackView>(&self) -> Result<T> {
        for field in T::REQUIRED {
            if self.get(field).map_or(true, |v| v.trim().is_empty()) {
                return Err(StackError::MissingField {
                    stack: T::STACK.to_string(),
                    field: (*field).to_string(),
                }
                .into());
            }
        }

        let value = serde_json::to_value(&self.fields)?;
        serde_json::from_value(value).map_err(|e| {
            StackError::Invalid {
                stack: T::STACK.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StackRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A typed view decoded from a [`StackRecord`].
pub trait StackView: DeserializeOwned {
    /// Stack the record belongs to.
    const STACK: StackKind;
    /// Keys that must be present and non-blank.
    const REQUIRED: &'static [&'static str];
}

/// Outputs of the base stack.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseOutputs {
    pub cms_iam_role_arn: String,
    pub cms_db_jdbc_connection_string: String,
    #[serde(default)]
    pub config_file_key_id: Option<String>,
    #[serde(default)]
    pub vpc_id: Option<String>,
    #[serde(default)]
    pub cms_db_address: Option<String>,
}

impl StackView for BaseOutputs {
    const STACK: StackKind = StackKind::Base;
    const REQUIRED: &'static [&'static str] = &["CmsIamRoleArn", "CmsDbJdbcConnectionString"];
}

/// Parameters the base stack was deployed with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BaseParameters {
    pub account_admin_arn: String,
}

impl StackView for BaseParameters {
    const STACK: StackKind = StackKind::Base;
    const REQUIRED: &'static [&'static str] = &["AccountAdminArn"];
}

/// Parameters the Vault stack was deployed with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VaultParameters {
    pub cname: String,
}

impl VaultParameters {
    /// Public hostname, without the trailing root-zone dot of a CNAME.
    pub fn host(&self) -> &str {
        self.cname.strip_suffix('.').unwrap_or(&self.cname)
    }
}

impl StackView for VaultParameters {
    const STACK: StackKind = StackKind::Vault;
    const REQUIRED: &'static [&'static str] = &["Cname"];
}

/// Outputs of the CMS stack.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CmsOutputs {
    pub autoscaling_group_logical_id: String,
    pub launch_configuration_logical_id: String,
    pub elb_logical_id: String,
    #[serde(default)]
    pub elb_canonical_hosted_zone_name_id: Option<String>,
    #[serde(default)]
    pub elb_dns_name: Option<String>,
    #[serde(default)]
    pub elb_source_security_group_name: Option<String>,
    #[serde(default)]
    pub elb_source_security_group_owner_alias: Option<String>,
}

impl StackView for CmsOutputs {
    const STACK: StackKind = StackKind::Cms;
    const REQUIRED: &'static [&'static str] = &[
        "AutoscalingGroupLogicalId",
        "LaunchConfigurationLogicalId",
        "ElbLogicalId",
    ];
}
