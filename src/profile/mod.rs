//! Profile persistence abstraction.
//!
//! Profiles are application-level records keyed by the provider-issued
//! account identifier. The store owns the record; the gateway only ever
//! creates it, exactly once per successful signup, guarded by a conditional
//! write that refuses to overwrite an existing key.

mod dynamo;

pub use dynamo::{create_dynamo_client, DynamoProfileStore};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::StoreError;

/// A user profile record.
///
/// Keyed by `account_id` (unique, issued by the identity provider). The
/// friends list is ordered and empty at creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub account_id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub friends: Vec<String>,
}

impl ProfileRecord {
    /// Build a fresh record for a newly created account.
    pub fn new(account_id: String, email: String, username: Option<String>) -> Self {
        Self {
            account_id,
            email,
            username,
            created_at: Utc::now(),
            friends: Vec::new(),
        }
    }
}

/// A managed key-value store for profile records.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Persist a new profile record.
    ///
    /// Must refuse to overwrite an existing record with the same key and
    /// return [`StoreError::AlreadyExists`] in that case.
    async fn create_profile(&self, record: &ProfileRecord) -> Result<(), StoreError>;
}
