use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::identity::{AuthTokens, IdentityProvider};
use crate::validate::validate_login;

/// Login request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Orchestrates login: presence check, then provider authentication.
///
/// Login does not apply the full signup policy; the provider is the
/// authority on whether the credentials are acceptable.
pub struct LoginCoordinator<I> {
    identity: Arc<I>,
}

impl<I: IdentityProvider> LoginCoordinator<I> {
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Authenticate and return the provider's tokens verbatim.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthTokens, ApiError> {
        validate_login(request)?;

        let tokens = self
            .identity
            .authenticate(&request.username, &request.password)
            .await
            .map_err(|err| {
                warn!(username = %request.username, error = %err, "authentication failed");
                ApiError::from(err)
            })?;

        debug!(username = %request.username, "login succeeded");

        Ok(tokens)
    }
}
