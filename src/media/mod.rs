//! Presigned upload grants.
//!
//! Clients never write to the media bucket with their own credentials;
//! instead the gateway issues a scoped, time-limited grant against a fresh
//! object key. The grant is constrained to a single content type and an
//! advertised size window, and expires after a fixed TTL.

mod s3;

pub use s3::{create_s3_client, S3ObjectStore};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{ApiError, GrantError};

/// Key prefix for all granted uploads.
pub const UPLOAD_KEY_PREFIX: &str = "uploads/";

/// The single content type uploads are restricted to.
pub const UPLOAD_CONTENT_TYPE: &str = "image/jpeg";

/// Minimum accepted upload size in bytes.
pub const MIN_UPLOAD_BYTES: u64 = 100;

/// Maximum accepted upload size in bytes (5 MB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// How long a grant stays valid.
pub const GRANT_TTL: Duration = Duration::from_secs(3600);

/// A scoped, time-limited permission to write one object.
///
/// `url` is the presigned endpoint; `fields` carries the constraints the
/// client must honor (object key, content type, size window).
#[derive(Debug, Clone, Serialize)]
pub struct UploadGrant {
    pub url: String,
    pub fields: HashMap<String, String>,
}

/// An object store able to presign upload requests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn presign_upload(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<UploadGrant, GrantError>;
}

/// Issues upload grants against the configured media bucket.
pub struct UploadGrantIssuer<O> {
    store: Arc<O>,
    bucket: Option<String>,
}

impl<O: ObjectStore> UploadGrantIssuer<O> {
    /// `bucket` is `None` when `MEDIA_BUCKET_NAME` was not configured; the
    /// issuer then rejects every request as misconfigured instead of failing
    /// at startup, since the other endpoints do not need the bucket.
    pub fn new(store: Arc<O>, bucket: Option<String>) -> Self {
        Self { store, bucket }
    }

    /// Issue a grant for one fresh object key.
    pub async fn issue_grant(&self) -> Result<UploadGrant, ApiError> {
        let bucket = self.bucket.as_deref().ok_or_else(|| {
            ApiError::Misconfigured("MEDIA_BUCKET_NAME is not set".to_string())
        })?;

        let key = format!("{}{}", UPLOAD_KEY_PREFIX, Uuid::new_v4());

        let mut grant = self
            .store
            .presign_upload(bucket, &key, UPLOAD_CONTENT_TYPE, GRANT_TTL)
            .await
            .map_err(|err| {
                error!(bucket, %key, error = %err, "failed to presign upload");
                ApiError::from(err)
            })?;

        grant
            .fields
            .insert("minSizeBytes".to_string(), MIN_UPLOAD_BYTES.to_string());
        grant
            .fields
            .insert("maxSizeBytes".to_string(), MAX_UPLOAD_BYTES.to_string());

        debug!(bucket, %key, ttl_secs = GRANT_TTL.as_secs(), "upload grant issued");

        Ok(grant)
    }
}

impl<O> Clone for UploadGrantIssuer<O> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            bucket: self.bucket.clone(),
        }
    }
}
