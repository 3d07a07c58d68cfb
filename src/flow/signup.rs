use std::sync::Arc;

use serde::Deserialize;
use tracing::{error, info, warn};

use crate::error::ApiError;
use crate::identity::IdentityProvider;
use crate::profile::{ProfileRecord, ProfileStore};
use crate::validate::{validate_signup, SignupPolicy};

/// Signup request body.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub username: Option<String>,
}

/// Successful signup outcome carrying the provider-issued account id.
#[derive(Debug, Clone)]
pub struct CreatedAccount {
    pub account_id: String,
}

/// Orchestrates the two-phase signup: account creation in the identity
/// provider, then profile persistence in the key-value store.
///
/// The two writes span independent external systems with no transaction
/// between them. The coordinator guarantees ordering (the profile store is
/// never contacted unless account creation succeeded) and makes the one
/// possible inconsistency — account exists, profile missing — explicit in
/// its outcome instead of hiding it: there is no rollback of the account.
pub struct SignupCoordinator<I, P> {
    identity: Arc<I>,
    profiles: Arc<P>,
    policy: SignupPolicy,
}

impl<I, P> SignupCoordinator<I, P>
where
    I: IdentityProvider,
    P: ProfileStore,
{
    pub fn new(identity: Arc<I>, profiles: Arc<P>, policy: SignupPolicy) -> Self {
        Self {
            identity,
            profiles,
            policy,
        }
    }

    /// Run the signup pipeline.
    ///
    /// Outcome mapping:
    /// - validation failure → `BadInput`, no external call
    /// - provider says the identity exists → `Conflict`, profile untouched
    /// - provider rejects a parameter → `BadInput`
    /// - any other provider failure → `Internal` (we rely on account
    ///   creation being all-or-nothing on the provider side)
    /// - account created but profile write failed → `PartialFailure`
    /// - both writes succeeded → `CreatedAccount`
    pub async fn sign_up(&self, request: &SignupRequest) -> Result<CreatedAccount, ApiError> {
        validate_signup(request, &self.policy)?;

        let account_id = self
            .identity
            .create_account(
                &request.email,
                &request.password,
                request.username.as_deref(),
            )
            .await
            .map_err(|err| {
                warn!(email = %request.email, error = %err, "account creation failed");
                ApiError::from(err)
            })?;

        let record = ProfileRecord::new(
            account_id.clone(),
            request.email.clone(),
            request.username.clone(),
        );

        if let Err(err) = self.profiles.create_profile(&record).await {
            // The account exists but its profile does not. Nothing is rolled
            // back; the orphaned id is logged for out-of-band reconciliation.
            error!(
                account_id = %account_id,
                error = %err,
                "profile persistence failed after account creation"
            );
            return Err(ApiError::PartialFailure { account_id });
        }

        info!(account_id = %account_id, "signup completed");

        Ok(CreatedAccount { account_id })
    }
}
