//! AWS-backed collaborators.
//!
//! Enable with `--features aws` (on by default).
//!
//! The SDK is async; the provisioning flow is not. One [`AwsSession`] owns a
//! current-thread tokio runtime and the loaded SDK configuration, and every
//! client blocks on it for the duration of a call.
//!
//! Credentials come from the default provider chain (environment, profile,
//! instance metadata).

use std::future::Future;
use std::sync::Arc;

use aws_sdk_sts::error::{DisplayErrorContext, ProvideErrorMetadata};
use tracing::{debug, trace};

use super::{AvailabilityZone, CloudResult, ComputeClient, Filter, IdentityClient, ZoneState};
use crate::error::CloudError;

/// Shared runtime and SDK configuration for one region.
pub struct AwsSession {
    runtime: tokio::runtime::Runtime,
    config: aws_config::SdkConfig,
}

impl AwsSession {
    /// Load the SDK configuration for a region.
    pub fn new(region: &str) -> CloudResult<Arc<Self>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CloudError::new("aws", format!("failed to create runtime: {}", e)))?;

        let config = runtime.block_on(
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(region.to_string()))
                .load(),
        );
        debug!(region, "aws configuration loaded");

        Ok(Arc::new(Self { runtime, config }))
    }

    pub fn config(&self) -> &aws_config::SdkConfig {
        &self.config
    }

    /// Run a future to completion on the session runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Convert an SDK error, keeping the provider's error code.
pub(crate) fn to_cloud_error<E>(service: &'static str, err: E) -> CloudError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    let error = CloudError::new(service, message);
    match err.code() {
        Some(code) => error.with_code(code),
        None => error,
    }
}

/// Caller identity through STS.
pub struct AwsIdentity {
    session: Arc<AwsSession>,
    client: aws_sdk_sts::Client,
}

impl AwsIdentity {
    pub fn new(session: Arc<AwsSession>) -> Self {
        let client = aws_sdk_sts::Client::new(session.config());
        Self { session, client }
    }
}

impl IdentityClient for AwsIdentity {
    fn caller_account(&self) -> CloudResult<String> {
        trace!("calling sts:GetCallerIdentity");
        let output = self
            .session
            .block_on(self.client.get_caller_identity().send())
            .map_err(|e| to_cloud_error("sts", e))?;

        output
            .account()
            .map(str::to_string)
            .ok_or_else(|| CloudError::new("sts", "caller identity did not include an account"))
    }
}

/// EC2 calls.
pub struct AwsCompute {
    session: Arc<AwsSession>,
    client: aws_sdk_ec2::Client,
}

impl AwsCompute {
    pub fn new(session: Arc<AwsSession>) -> Self {
        let client = aws_sdk_ec2::Client::new(session.config());
        Self { session, client }
    }
}

impl ComputeClient for AwsCompute {
    fn import_key_pair(&self, name: &str, public_key: &str) -> CloudResult<String> {
        trace!(key_name = name, "calling ec2:ImportKeyPair");
        let output = self
            .session
            .block_on(
                self.client
                    .import_key_pair()
                    .key_name(name)
                    .public_key_material(aws_sdk_ec2::primitives::Blob::new(public_key.as_bytes()))
                    .send(),
            )
            .map_err(|e| to_cloud_error("ec2", e))?;

        output
            .key_name()
            .map(str::to_string)
            .ok_or_else(|| CloudError::new("ec2", "import did not return a key name"))
    }

    fn describe_key_pairs(&self, name: &str) -> CloudResult<Vec<String>> {
        trace!(key_name = name, "calling ec2:DescribeKeyPairs");
        let output = self
            .session
            .block_on(self.client.describe_key_pairs().key_names(name).send())
            .map_err(|e| to_cloud_error("ec2", e))?;

        Ok(output
            .key_pairs()
            .iter()
            .filter_map(|k| k.key_name().map(str::to_string))
            .collect())
    }

    fn describe_images(&self, filters: &[Filter]) -> CloudResult<Vec<String>> {
        trace!(filters = filters.len(), "calling ec2:DescribeImages");
        let mut request = self.client.describe_images();
        for filter in filters {
            request = request.filters(
                aws_sdk_ec2::types::Filter::builder()
                    .name(&filter.name)
                    .set_values(Some(filter.values.clone()))
                    .build(),
            );
        }

        let output = self
            .session
            .block_on(request.send())
            .map_err(|e| to_cloud_error("ec2", e))?;

        Ok(output
            .images()
            .iter()
            .filter_map(|i| i.image_id().map(str::to_string))
            .collect())
    }

    fn describe_availability_zones(&self) -> CloudResult<Vec<AvailabilityZone>> {
        trace!("calling ec2:DescribeAvailabilityZones");
        let output = self
            .session
            .block_on(self.client.describe_availability_zones().send())
            .map_err(|e| to_cloud_error("ec2", e))?;

        Ok(output
            .availability_zones()
            .iter()
            .filter_map(|z| {
                let name = z.zone_name()?;
                let state = z
                    .state()
                    .map(|s| ZoneState::parse(s.as_str()))
                    .unwrap_or_else(|| ZoneState::Other("unknown".to_string()));
                Some(AvailabilityZone::new(name, state))
            })
            .collect())
    }
}
