//! Request validation.
//!
//! Pure, deterministic field checks run before any external service is
//! contacted. The signup policy (minimum password length, whether a username
//! is required) is deployment-configurable; see [`SignupPolicy`].

use crate::error::ValidationError;
use crate::flow::{LoginRequest, SignupRequest};

/// Default minimum password length.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 8;

/// Signup validation policy.
///
/// Earlier deployments ran with a 6-character minimum and no separate
/// username (the email doubled as the sign-in identity); the current default
/// is an 8-character minimum with a required username. Both knobs are
/// configurable so either policy can be deployed without code changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignupPolicy {
    /// Minimum password length in characters
    pub min_password_len: usize,

    /// Whether the `username` field is required at signup
    pub username_required: bool,
}

impl Default for SignupPolicy {
    fn default() -> Self {
        Self {
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            username_required: true,
        }
    }
}

/// Validate a signup request against the given policy.
///
/// Checks, in order: required fields, email shape, password length.
pub fn validate_signup(
    request: &SignupRequest,
    policy: &SignupPolicy,
) -> Result<(), ValidationError> {
    if request.email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if request.password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    if policy.username_required
        && request
            .username
            .as_deref()
            .map_or(true, |u| u.trim().is_empty())
    {
        return Err(ValidationError::MissingField("username"));
    }

    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    if request.password.chars().count() < policy.min_password_len {
        return Err(ValidationError::PasswordTooShort {
            minimum: policy.min_password_len,
        });
    }

    Ok(())
}

/// Validate a login request.
///
/// Login only checks presence; the identity provider is the authority on
/// whether the credentials are acceptable.
pub fn validate_login(request: &LoginRequest) -> Result<(), ValidationError> {
    if request.username.trim().is_empty() {
        return Err(ValidationError::MissingField("username"));
    }
    if request.password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    Ok(())
}

/// Check that an email matches the basic `local@domain.tld` shape.
///
/// Equivalent to `^[^@]+@[^@]+\.[^@]+$`: exactly one `@`, a non-empty local
/// part, and a domain containing a `.` with non-empty parts on both sides.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}
