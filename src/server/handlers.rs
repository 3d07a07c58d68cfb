//! HTTP request handlers.
//!
//! # Endpoints
//!
//! - `POST /signup` - Create an account and its profile record
//! - `POST /login` - Authenticate and return bearer tokens
//! - `GET /uploads/grant` - Issue a presigned media upload grant
//! - `GET /health` - Health check endpoint
//!
//! Every API route also answers `OPTIONS` with a fixed CORS preflight body
//! before any validation or external call.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::error::ApiError;
use crate::flow::{LoginCoordinator, LoginRequest, SignupCoordinator, SignupRequest};
use crate::identity::IdentityProvider;
use crate::media::{ObjectStore, UploadGrant, UploadGrantIssuer};
use crate::profile::ProfileStore;
use crate::validate::SignupPolicy;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state holding the three coordinators.
///
/// Generic over the external seams so tests can inject fakes; passed to all
/// handlers via Axum's State extractor.
pub struct AppState<I, P, O> {
    pub signup: Arc<SignupCoordinator<I, P>>,
    pub login: Arc<LoginCoordinator<I>>,
    pub uploads: Arc<UploadGrantIssuer<O>>,
}

impl<I, P, O> AppState<I, P, O>
where
    I: IdentityProvider,
    P: ProfileStore,
    O: ObjectStore,
{
    /// Wire up the coordinators from the injected collaborators.
    ///
    /// `media_bucket` is optional: the signup and login pipelines do not
    /// need it, and the upload endpoint reports the misconfiguration itself.
    pub fn new(
        identity: Arc<I>,
        profiles: Arc<P>,
        objects: Arc<O>,
        policy: SignupPolicy,
        media_bucket: Option<String>,
    ) -> Self {
        Self {
            signup: Arc::new(SignupCoordinator::new(
                Arc::clone(&identity),
                profiles,
                policy,
            )),
            login: Arc::new(LoginCoordinator::new(identity)),
            uploads: Arc::new(UploadGrantIssuer::new(objects, media_bucket)),
        }
    }
}

impl<I, P, O> Clone for AppState<I, P, O> {
    fn clone(&self) -> Self {
        Self {
            signup: Arc::clone(&self.signup),
            login: Arc::clone(&self.login),
            uploads: Arc::clone(&self.uploads),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error kind identifier (e.g. "conflict", "bad_input")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// Successful signup response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub account_id: String,
}

/// Successful login response carrying the provider tokens verbatim.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub id_token: String,
    pub access_token: String,
}

/// Fixed-message response (preflight acknowledgements).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// The single error-to-status table for every handler.
///
/// 5xx outcomes are logged at ERROR level, 4xx at WARN (except 404, which is
/// common and expected, logged at DEBUG). Provider-internal detail carried by
/// `Internal` is logged here and never rendered into the body.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = match &self {
            ApiError::BadInput(_) => (StatusCode::BAD_REQUEST, "bad_input"),
            ApiError::Conflict => (StatusCode::CONFLICT, "conflict"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::PartialFailure { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "partial_failure")
            }
            ApiError::Misconfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, "misconfigured"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = self.to_string();

        if let ApiError::Internal(detail) = &self {
            error!(
                error_type = kind,
                status = status.as_u16(),
                detail = %detail,
                "Server error"
            );
        } else if status.is_server_error() {
            error!(
                error_type = kind,
                status = status.as_u16(),
                "Server error: {}",
                message
            );
        } else if status == StatusCode::NOT_FOUND {
            debug!(
                error_type = kind,
                status = status.as_u16(),
                "Not found: {}",
                message
            );
        } else {
            warn!(
                error_type = kind,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        (status, Json(ErrorResponse::new(kind, message))).into_response()
    }
}

/// Unwrap a JSON body, mapping deserialization failures to `BadInput`.
fn require_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            debug!(reason = %rejection, "rejected malformed request body");
            Err(ApiError::BadInput(
                "invalid JSON in request body".to_string(),
            ))
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle signup requests.
///
/// # Endpoint
///
/// `POST /signup` with body `{ "email", "password", "username" }`
///
/// # Response
///
/// - `201 Created`: `{ "message", "accountId" }`
/// - `400 Bad Request`: validation failure or malformed body
/// - `409 Conflict`: the identity already exists
/// - `500 Internal Server Error`: provider failure, or partial failure
///   (account created, profile missing — the message says so explicitly)
pub async fn signup_handler<I, P, O>(
    State(state): State<AppState<I, P, O>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError>
where
    I: IdentityProvider,
    P: ProfileStore,
    O: ObjectStore,
{
    let request = require_json(payload)?;

    let created = state.signup.sign_up(&request).await?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully. Please check your email to verify your account."
                .to_string(),
            account_id: created.account_id,
        }),
    ))
}

/// Handle login requests.
///
/// # Endpoint
///
/// `POST /login` with body `{ "username", "password" }`
///
/// # Response
///
/// - `200 OK`: `{ "message", "idToken", "accessToken" }`
/// - `400 Bad Request`: missing credentials or malformed body
/// - `401 Unauthorized`: credentials rejected
/// - `404 Not Found`: no such account
pub async fn login_handler<I, P, O>(
    State(state): State<AppState<I, P, O>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, ApiError>
where
    I: IdentityProvider,
    P: ProfileStore,
    O: ObjectStore,
{
    let request = require_json(payload)?;

    let tokens = state.login.login(&request).await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        id_token: tokens.id_token,
        access_token: tokens.access_token,
    }))
}

/// Handle upload grant requests.
///
/// # Endpoint
///
/// `GET /uploads/grant`
///
/// # Response
///
/// - `200 OK`: the grant object, `{ "url", "fields" }`
/// - `500 Internal Server Error`: bucket unconfigured, or object store
///   failure (generic message, provider detail logged only)
pub async fn upload_grant_handler<I, P, O>(
    State(state): State<AppState<I, P, O>>,
) -> Result<Json<UploadGrant>, ApiError>
where
    I: IdentityProvider,
    P: ProfileStore,
    O: ObjectStore,
{
    let grant = state.uploads.issue_grant().await?;
    Ok(Json(grant))
}

/// Answer CORS preflight requests.
///
/// Registered as the `OPTIONS` handler on every API route; short-circuits
/// before any validation or external call.
pub async fn preflight_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "CORS preflight OK".to_string(),
    })
}

/// Handle health check requests.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
