use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use super::{ProfileRecord, ProfileStore};
use crate::error::StoreError;

/// Partition key attribute of the profile table.
const KEY_ATTRIBUTE: &str = "accountId";

/// DynamoDB-backed implementation of [`ProfileStore`].
///
/// Writes one item per profile with `attribute_not_exists(accountId)` as the
/// condition, so a duplicate key is rejected by the store rather than
/// silently overwritten.
#[derive(Clone)]
pub struct DynamoProfileStore {
    client: Client,
    table_name: String,
}

impl DynamoProfileStore {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl ProfileStore for DynamoProfileStore {
    async fn create_profile(&self, record: &ProfileRecord) -> Result<(), StoreError> {
        let friends = record
            .friends
            .iter()
            .map(|id| AttributeValue::S(id.clone()))
            .collect();

        let mut request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item(KEY_ATTRIBUTE, AttributeValue::S(record.account_id.clone()))
            .item("email", AttributeValue::S(record.email.clone()))
            .item(
                "createdAt",
                AttributeValue::S(record.created_at.to_rfc3339()),
            )
            .item("friendsList", AttributeValue::L(friends))
            .condition_expression(format!("attribute_not_exists({KEY_ATTRIBUTE})"));

        if let Some(username) = &record.username {
            request = request.item("username", AttributeValue::S(username.clone()));
        }

        request.send().await.map_err(|err| {
            let is_condition_failure = err
                .as_service_error()
                .map(|se| se.is_conditional_check_failed_exception())
                .unwrap_or(false);

            if is_condition_failure {
                StoreError::AlreadyExists(record.account_id.clone())
            } else {
                StoreError::Provider(err.to_string())
            }
        })?;

        debug!(
            account_id = %record.account_id,
            table = %self.table_name,
            "profile record created"
        );

        Ok(())
    }
}

/// Create a DynamoDB client from a loaded AWS configuration.
pub fn create_dynamo_client(sdk_config: &aws_config::SdkConfig) -> Client {
    Client::new(sdk_config)
}
