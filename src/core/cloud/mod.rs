//! Cloud provider collaborators.
//!
//! The provisioning steps only need a handful of read-mostly calls against
//! the provider. They are expressed as narrow traits so operations can be
//! exercised against in-memory fakes.
//!
//! ## Backends
//!
//! - **AWS**: Feature-gated (`aws`). STS, EC2 and S3 through the AWS SDK.
//! - **Unavailable**: Always available. Fails every call; used when the
//!   crate is built without cloud support.

use crate::error::CloudError;

mod ec2;

#[cfg(feature = "aws")]
pub mod aws;

pub use ec2::Ec2Service;

/// Result of a raw cloud call, keeping the provider error intact.
pub type CloudResult<T> = std::result::Result<T, CloudError>;

/// Caller identity lookup (security-token service).
pub trait IdentityClient {
    /// Account id of the credentials in use.
    fn caller_account(&self) -> CloudResult<String>;
}

/// Compute service calls used by the precondition probes.
pub trait ComputeClient {
    /// Import a public key, returning the name the provider registered.
    fn import_key_pair(&self, name: &str, public_key: &str) -> CloudResult<String>;

    /// Names of the key pairs matching `name`.
    fn describe_key_pairs(&self, name: &str) -> CloudResult<Vec<String>>;

    /// Ids of the images matching every filter.
    fn describe_images(&self, filters: &[Filter]) -> CloudResult<Vec<String>>;

    /// All zones in the region, in provider order.
    fn describe_availability_zones(&self) -> CloudResult<Vec<AvailabilityZone>>;
}

/// A name/values filter on a describe call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    pub values: Vec<String>,
}

impl Filter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
        }
    }
}

/// An availability zone and its reported state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityZone {
    pub name: String,
    pub state: ZoneState,
}

impl AvailabilityZone {
    pub fn new(name: impl Into<String>, state: ZoneState) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneState {
    Available,
    Information,
    Impaired,
    Unavailable,
    Other(String),
}

impl ZoneState {
    pub fn parse(state: &str) -> Self {
        match state {
            "available" => Self::Available,
            "information" => Self::Information,
            "impaired" => Self::Impaired,
            "unavailable" => Self::Unavailable,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Collaborator used when the crate is built without cloud support.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unavailable;

impl Unavailable {
    fn error(service: &'static str) -> CloudError {
        CloudError::new(service, "cloud support not compiled in (enable the `aws` feature)")
    }
}

impl IdentityClient for Unavailable {
    fn caller_account(&self) -> CloudResult<String> {
        Err(Self::error("sts"))
    }
}

impl ComputeClient for Unavailable {
    fn import_key_pair(&self, _name: &str, _public_key: &str) -> CloudResult<String> {
        Err(Self::error("ec2"))
    }

    fn describe_key_pairs(&self, _name: &str) -> CloudResult<Vec<String>> {
        Err(Self::error("ec2"))
    }

    fn describe_images(&self, _filters: &[Filter]) -> CloudResult<Vec<String>> {
        Err(Self::error("ec2"))
    }

    fn describe_availability_zones(&self) -> CloudResult<Vec<AvailabilityZone>> {
        Err(Self::error("ec2"))
    }
}

/// Root-account ARN for an account id.
pub fn root_user_arn(account: &str) -> String {
    format!("arn:aws:iam::{}:root", account)
}
