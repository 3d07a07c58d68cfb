use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use super::{ObjectStore, UploadGrant};
use crate::error::GrantError;

/// S3-backed implementation of [`ObjectStore`].
///
/// Presigns a `PutObject` request. The content type is part of the signature,
/// so the store rejects uploads that declare a different one.
#[derive(Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn presign_upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<UploadGrant, GrantError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| GrantError::Provider(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .presigned(presigning)
            .await
            .map_err(|e| GrantError::Provider(e.to_string()))?;

        let mut fields = HashMap::new();
        fields.insert("key".to_string(), key.to_string());
        fields.insert("Content-Type".to_string(), content_type.to_string());

        Ok(UploadGrant {
            url: presigned.uri().to_string(),
            fields,
        })
    }
}

/// Create an S3 client from a loaded AWS configuration.
pub fn create_s3_client(sdk_config: &aws_config::SdkConfig) -> Client {
    Client::new(sdk_config)
}
