//! Idempotency probes over the compute service.
//!
//! Each probe answers "has this side effect already happened". A provider
//! "not found" error is an ordinary `false`; every other error is returned
//! exactly as the client produced it. No polling happens here.

use tracing::debug;

use super::{CloudResult, ComputeClient, Filter, ZoneState};

/// Error code returned when a named key pair does not exist.
pub const KEY_PAIR_NOT_FOUND: &str = "InvalidKeyPair.NotFound";

/// Error code returned when an image id does not exist.
pub const AMI_NOT_FOUND: &str = "InvalidAMIID.NotFound";

/// Read-only EC2 queries used by operations.
pub struct Ec2Service<'a> {
    client: &'a dyn ComputeClient,
}

impl<'a> Ec2Service<'a> {
    pub fn new(client: &'a dyn ComputeClient) -> Self {
        Self { client }
    }

    /// Import a key pair, returning the registered name.
    pub fn import_key(&self, name: &str, public_key: &str) -> CloudResult<String> {
        self.client.import_key_pair(name, public_key)
    }

    /// Whether a key pair with this name exists.
    pub fn is_key_pair_present(&self, name: &str) -> CloudResult<bool> {
        match self.client.describe_key_pairs(name) {
            Ok(pairs) => Ok(!pairs.is_empty()),
            Err(e) if e.has_code(KEY_PAIR_NOT_FOUND) => {
                debug!(key_name = name, "key pair not found");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the image exists and carries the tag value.
    ///
    /// `tag` is the filter name, e.g. `tag:component`.
    pub fn is_ami_with_tag_present(&self, ami_id: &str, tag: &str, value: &str) -> CloudResult<bool> {
        let filters = [Filter::new(tag, value), Filter::new("image-id", ami_id)];
        match self.client.describe_images(&filters) {
            Ok(images) => Ok(!images.is_empty()),
            Err(e) if e.has_code(AMI_NOT_FOUND) => {
                debug!(ami_id, "image not found");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Names of the zones currently in the `available` state, in provider order.
    pub fn availability_zones(&self) -> CloudResult<Vec<String>> {
        Ok(self
            .client
            .describe_availability_zones()?
            .into_iter()
            .filter(|z| z.state == ZoneState::Available)
            .map(|z| z.name)
            .collect())
    }
}
