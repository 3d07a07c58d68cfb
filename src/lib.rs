//! # Account Gateway
//!
//! A small HTTP gateway for account management: signup, login and presigned
//! media-upload grants, backed by a managed identity provider (Cognito), a
//! managed key-value store (DynamoDB) and an object store (S3).
//!
//! Each endpoint is an independent, stateless pipeline: validate the
//! request, call the external collaborators, and map every outcome into one
//! shared error taxonomy. The only multi-step operation is signup, which
//! performs two dependent writes against independent systems — account
//! creation, then profile persistence — with explicit partial-failure
//! semantics and no cross-system transaction.
//!
//! ## Architecture
//!
//! - [`validate`] - Pure request validation and the signup policy
//! - [`identity`] - Identity provider seam and Cognito implementation
//! - [`profile`] - Profile store seam and DynamoDB implementation
//! - [`media`] - Upload grant issuer and S3 implementation
//! - [`flow`] - Signup and login coordinators
//! - [`server`] - Axum handlers, router and the error-to-status mapping
//! - [`config`] - CLI and environment configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use account_gateway::{
//!     create_cognito_client, create_dynamo_client, create_s3_client, AppState,
//!     CognitoIdentityProvider, DynamoProfileStore, RouterConfig, S3ObjectStore, SignupPolicy,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//!
//!     let identity = Arc::new(CognitoIdentityProvider::new(
//!         create_cognito_client(&sdk_config),
//!         "client-id".to_string(),
//!         None,
//!     ));
//!     let profiles = Arc::new(DynamoProfileStore::new(
//!         create_dynamo_client(&sdk_config),
//!         "user-profiles".to_string(),
//!     ));
//!     let objects = Arc::new(S3ObjectStore::new(create_s3_client(&sdk_config)));
//!
//!     let state = AppState::new(
//!         identity,
//!         profiles,
//!         objects,
//!         SignupPolicy::default(),
//!         Some("media-bucket".to_string()),
//!     );
//!     let router = account_gateway::create_router(state, RouterConfig::new());
//!
//!     // Serve the router...
//! }
//! ```

pub mod config;
pub mod error;
pub mod flow;
pub mod identity;
pub mod media;
pub mod profile;
pub mod server;
pub mod validate;

// Re-export commonly used types
pub use config::{Config, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REGION};
pub use error::{ApiError, GrantError, IdentityError, StoreError, ValidationError};
pub use flow::{CreatedAccount, LoginCoordinator, LoginRequest, SignupCoordinator, SignupRequest};
pub use identity::{create_cognito_client, AuthTokens, CognitoIdentityProvider, IdentityProvider};
pub use media::{
    create_s3_client, ObjectStore, S3ObjectStore, UploadGrant, UploadGrantIssuer, GRANT_TTL,
    MAX_UPLOAD_BYTES, MIN_UPLOAD_BYTES, UPLOAD_CONTENT_TYPE, UPLOAD_KEY_PREFIX,
};
pub use profile::{create_dynamo_client, DynamoProfileStore, ProfileRecord, ProfileStore};
pub use server::{
    create_router, health_handler, login_handler, preflight_handler, signup_handler,
    upload_grant_handler, AppState, ErrorResponse, HealthResponse, LoginResponse, MessageResponse,
    RouterConfig, SignupResponse,
};
pub use validate::{
    is_valid_email, validate_login, validate_signup, SignupPolicy, DEFAULT_MIN_PASSWORD_LEN,
};
