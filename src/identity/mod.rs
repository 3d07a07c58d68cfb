//! Identity provider abstraction.
//!
//! The gateway never handles password hashing or token issuance itself; a
//! managed identity provider owns the account and its credentials. This
//! module defines the seam ([`IdentityProvider`]) and the Cognito-backed
//! implementation ([`CognitoIdentityProvider`]).
//!
//! Implementations are injected into the coordinators, so tests can
//! substitute in-memory fakes without touching process-wide state.

mod cognito;

pub use cognito::{create_cognito_client, CognitoIdentityProvider};

use async_trait::async_trait;

use crate::error::IdentityError;

/// Opaque bearer credentials returned by a successful authentication.
///
/// The gateway forwards both tokens verbatim and never persists them.
#[derive(Debug, Clone)]
pub struct AuthTokens {
    pub id_token: String,
    pub access_token: String,
}

/// A managed identity provider.
///
/// `create_account` is assumed to be all-or-nothing: on error, no account
/// exists on the provider side. The profile write that follows a successful
/// creation relies on this contract.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account with the email as the sign-in identity.
    ///
    /// Returns the provider-issued stable account identifier. The identifier
    /// is opaque, not chosen by the caller, and immutable once issued.
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        preferred_username: Option<&str>,
    ) -> Result<String, IdentityError>;

    /// Verify credentials and return fresh bearer tokens.
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthTokens, IdentityError>;
}
