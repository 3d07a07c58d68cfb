use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::SdkError;
use aws_sdk_cognitoidentityprovider::operation::initiate_auth::InitiateAuthError;
use aws_sdk_cognitoidentityprovider::operation::sign_up::SignUpError;
use aws_sdk_cognitoidentityprovider::types::{AttributeType, AuthFlowType};
use aws_sdk_cognitoidentityprovider::Client;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use super::{AuthTokens, IdentityProvider};
use crate::error::IdentityError;

/// Cognito-backed implementation of [`IdentityProvider`].
///
/// Uses the user-pool `SignUp` and `InitiateAuth` (USER_PASSWORD_AUTH) APIs.
/// When the app client has a secret, every request carries the
/// `SecretHash = base64(HMAC-SHA256(secret, username + client_id))` the
/// provider requires.
#[derive(Clone)]
pub struct CognitoIdentityProvider {
    client: Client,
    client_id: String,
    client_secret: Option<String>,
}

impl CognitoIdentityProvider {
    pub fn new(client: Client, client_id: String, client_secret: Option<String>) -> Self {
        Self {
            client,
            client_id,
            client_secret,
        }
    }

    /// Compute the request secret hash, if a client secret is configured.
    fn secret_hash(&self, username: &str) -> Result<Option<String>, IdentityError> {
        let Some(secret) = self.client_secret.as_deref() else {
            return Ok(None);
        };

        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
            .map_err(|e| IdentityError::Provider(format!("invalid client secret: {e}")))?;
        mac.update(username.as_bytes());
        mac.update(self.client_id.as_bytes());

        Ok(Some(BASE64.encode(mac.finalize().into_bytes())))
    }
}

#[async_trait]
impl IdentityProvider for CognitoIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        preferred_username: Option<&str>,
    ) -> Result<String, IdentityError> {
        let email_attribute = AttributeType::builder()
            .name("email")
            .value(email)
            .build()
            .map_err(|e| IdentityError::Provider(e.to_string()))?;

        let mut request = self
            .client
            .sign_up()
            .client_id(&self.client_id)
            .username(email)
            .password(password)
            .user_attributes(email_attribute);

        if let Some(username) = preferred_username {
            let username_attribute = AttributeType::builder()
                .name("preferred_username")
                .value(username)
                .build()
                .map_err(|e| IdentityError::Provider(e.to_string()))?;
            request = request.user_attributes(username_attribute);
        }

        if let Some(hash) = self.secret_hash(email)? {
            request = request.secret_hash(hash);
        }

        let response = request.send().await.map_err(map_sign_up_error)?;

        let account_id = response.user_sub().to_string();
        debug!(%account_id, "account created");

        Ok(account_id)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthTokens, IdentityError> {
        let mut request = self
            .client
            .initiate_auth()
            .client_id(&self.client_id)
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password);

        if let Some(hash) = self.secret_hash(username)? {
            request = request.auth_parameters("SECRET_HASH", hash);
        }

        let response = request.send().await.map_err(map_initiate_auth_error)?;

        let result = response.authentication_result().ok_or_else(|| {
            IdentityError::Provider("no authentication result in provider response".to_string())
        })?;

        Ok(AuthTokens {
            id_token: result.id_token().unwrap_or_default().to_string(),
            access_token: result.access_token().unwrap_or_default().to_string(),
        })
    }
}

fn map_sign_up_error(err: SdkError<SignUpError>) -> IdentityError {
    match err.as_service_error() {
        Some(e) if e.is_username_exists_exception() => IdentityError::AlreadyExists,
        Some(e) if e.is_invalid_parameter_exception() || e.is_invalid_password_exception() => {
            IdentityError::InvalidParameter(e.to_string())
        }
        _ => IdentityError::Provider(err.to_string()),
    }
}

fn map_initiate_auth_error(err: SdkError<InitiateAuthError>) -> IdentityError {
    match err.as_service_error() {
        Some(e) if e.is_not_authorized_exception() => IdentityError::NotAuthorized,
        Some(e) if e.is_user_not_found_exception() => IdentityError::UserNotFound,
        _ => IdentityError::Provider(err.to_string()),
    }
}

/// Create a Cognito client from a loaded AWS configuration.
pub fn create_cognito_client(sdk_config: &aws_config::SdkConfig) -> Client {
    Client::new(sdk_config)
}
