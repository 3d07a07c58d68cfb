use thiserror::Error;

/// Errors returned by the managed identity provider.
#[derive(Debug, Clone, Error)]
pub enum IdentityError {
    /// An account with the requested identity already exists
    #[error("this username already exists")]
    AlreadyExists,

    /// The provider rejected one of the request parameters
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Credentials were rejected
    #[error("invalid username or password")]
    NotAuthorized,

    /// No account exists for the given identity
    #[error("user not found")]
    UserNotFound,

    /// Any other provider failure (throttling, connectivity, internal)
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Errors returned by the profile store.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// A record with this key already exists (conditional write refused)
    #[error("profile record already exists for account {0}")]
    AlreadyExists(String),

    /// Any other store failure
    #[error("profile store error: {0}")]
    Provider(String),
}

/// Errors issuing presigned upload grants.
#[derive(Debug, Clone, Error)]
pub enum GrantError {
    /// Any object store failure, including signing errors
    #[error("object store error: {0}")]
    Provider(String),
}

/// Request validation errors. Detected locally, before any external call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is absent or empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Email does not match the `local@domain.tld` shape
    #[error("invalid email format")]
    InvalidEmailFormat,

    /// Password is shorter than the configured minimum
    #[error("password must be at least {minimum} characters")]
    PasswordTooShort { minimum: usize },
}

/// The boundary error taxonomy.
///
/// Every failure a handler can produce is mapped into one of these variants,
/// and a single `IntoResponse` impl (in [`crate::server`]) turns each variant
/// into its HTTP status. Provider-internal detail is carried for server-side
/// logging only and never rendered to the caller.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Client-correctable input problem (400)
    #[error("{0}")]
    BadInput(String),

    /// Duplicate identity (409)
    #[error("this username already exists")]
    Conflict,

    /// Credentials rejected (401)
    #[error("invalid username or password")]
    Unauthorized,

    /// No such account (404)
    #[error("user not found")]
    NotFound,

    /// The account was created but the profile write failed (500).
    ///
    /// There is no rollback of the account; the message is deliberately
    /// explicit so an operator can reconcile the orphaned account.
    #[error("account {account_id} created but profile persistence failed; manual reconciliation required")]
    PartialFailure { account_id: String },

    /// Deployment defect, e.g. a missing environment setting (500)
    #[error("server configuration error: {0}")]
    Misconfigured(String),

    /// Catch-all (500). The inner detail is logged, not returned.
    #[error("an internal server error occurred")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadInput(err.to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::AlreadyExists => ApiError::Conflict,
            IdentityError::InvalidParameter(msg) => {
                ApiError::BadInput(format!("invalid parameter: {msg}"))
            }
            IdentityError::NotAuthorized => ApiError::Unauthorized,
            IdentityError::UserNotFound => ApiError::NotFound,
            IdentityError::Provider(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<GrantError> for ApiError {
    fn from(err: GrantError) -> Self {
        match err {
            GrantError::Provider(detail) => ApiError::Internal(detail),
        }
    }
}
