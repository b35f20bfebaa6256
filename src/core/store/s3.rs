//! S3-backed config store.
//!
//! One bucket per environment. Each key is a single object, so a `put`
//! is all-or-nothing from a reader's point of view.

use std::sync::Arc;

use aws_sdk_s3::error::ProvideErrorMetadata;
use tracing::trace;

use super::ConfigStore;
use crate::core::cloud::aws::{to_cloud_error, AwsSession};
use crate::error::{CloudError, Result, StoreError};

/// Store backed by an S3 bucket.
pub struct S3ConfigStore {
    session: Arc<AwsSession>,
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3ConfigStore {
    pub fn new(session: Arc<AwsSession>, bucket: &str) -> Result<Self> {
        if bucket.trim().is_empty() {
            return Err(crate::error::ConfigError::MissingField {
                field: "environment.bucket",
            }
            .into());
        }
        let client = aws_sdk_s3::Client::new(session.config());
        Ok(Self {
            session,
            client,
            bucket: bucket.to_string(),
        })
    }
}

impl ConfigStore for S3ConfigStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        trace!(bucket = %self.bucket, key, "s3:GetObject");
        let bytes: std::result::Result<Option<Vec<u8>>, CloudError> = self.session.block_on(async {
            match self
                .client
                .get_object()
                .bucket(&self.bucket)
                .key(key)
                .send()
                .await
            {
                Ok(output) => match output.body.collect().await {
                    Ok(data) => Ok(Some(data.into_bytes().to_vec())),
                    Err(e) => Err(CloudError::new("s3", e.to_string())),
                },
                Err(e) if e.code() == Some("NoSuchKey") => Ok(None),
                Err(e) => Err(to_cloud_error("s3", e)),
            }
        });

        match bytes.map_err(StoreError::Backend)? {
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                StoreError::Malformed {
                    key: key.to_string(),
                    reason: e.to_string(),
                }
                .into()
            }),
            None => Ok(None),
        }
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        trace!(bucket = %self.bucket, key, bytes = value.len(), "s3:PutObject");
        self.session
            .block_on(
                self.client
                    .put_object()
                    .bucket(&self.bucket)
                    .key(key)
                    .body(aws_sdk_s3::primitives::ByteStream::from(
                        value.as_bytes().to_vec(),
                    ))
                    .send(),
            )
            .map_err(|e| StoreError::Backend(to_cloud_error("s3", e)))?;
        Ok(())
    }
}
