//! Configuration management.
//!
//! All settings come from command-line arguments or environment variables
//! via clap. The recognized environment keys:
//!
//! - `IDENTITY_POOL_ID` - Identity provider user pool id (required)
//! - `IDENTITY_CLIENT_ID` - Identity provider app client id (required)
//! - `IDENTITY_CLIENT_SECRET` - App client secret; enables secret-hash
//!   signing of provider requests (optional)
//! - `PROFILE_TABLE_NAME` - Profile store table name (required)
//! - `MEDIA_BUCKET_NAME` - Media bucket for upload grants (optional; the
//!   upload endpoint reports a misconfiguration when absent)
//! - `REGION` - AWS region (default: us-east-1)
//! - `MIN_PASSWORD_LENGTH` - Signup password policy minimum (default: 8)
//! - `GATEWAY_HOST` / `GATEWAY_PORT` - Server bind address
//! - `CORS_ORIGINS` - Comma-separated allowed origins (default: any)
//!
//! Missing or empty required settings are rejected by [`Config::validate`]
//! at startup, before any request is processed.

use clap::Parser;

use crate::validate::{SignupPolicy, DEFAULT_MIN_PASSWORD_LEN};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default AWS region.
pub const DEFAULT_REGION: &str = "us-east-1";

// =============================================================================
// CLI Arguments
// =============================================================================

/// Account Gateway - signup, login and media upload grants.
///
/// Validates HTTP requests, drives the managed identity provider and the
/// profile store, and issues presigned upload grants for the media bucket.
#[derive(Parser, Debug, Clone)]
#[command(name = "account-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GATEWAY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GATEWAY_PORT")]
    pub port: u16,

    // =========================================================================
    // Identity Provider Configuration
    // =========================================================================
    /// Identity provider user pool id.
    #[arg(long, env = "IDENTITY_POOL_ID")]
    pub identity_pool_id: String,

    /// Identity provider app client id.
    #[arg(long, env = "IDENTITY_CLIENT_ID")]
    pub identity_client_id: String,

    /// App client secret. When set, provider requests carry a secret hash.
    #[arg(long, env = "IDENTITY_CLIENT_SECRET")]
    pub identity_client_secret: Option<String>,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Profile store table name.
    #[arg(long, env = "PROFILE_TABLE_NAME")]
    pub profile_table_name: String,

    /// Media bucket for upload grants.
    ///
    /// If not set, the upload-grant endpoint reports a misconfiguration;
    /// signup and login are unaffected.
    #[arg(long, env = "MEDIA_BUCKET_NAME")]
    pub media_bucket_name: Option<String>,

    /// AWS region.
    #[arg(long, default_value = DEFAULT_REGION, env = "REGION")]
    pub region: String,

    // =========================================================================
    // Signup Policy Configuration
    // =========================================================================
    /// Minimum password length for signup.
    #[arg(long, default_value_t = DEFAULT_MIN_PASSWORD_LEN, env = "MIN_PASSWORD_LENGTH")]
    pub min_password_length: usize,

    /// Whether signup requires a username.
    #[arg(long, default_value_t = true, env = "USERNAME_REQUIRED")]
    pub username_required: bool,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.identity_pool_id.is_empty() {
            return Err(
                "Identity pool id is required. Set --identity-pool-id or IDENTITY_POOL_ID"
                    .to_string(),
            );
        }
        if self.identity_client_id.is_empty() {
            return Err(
                "Identity client id is required. Set --identity-client-id or IDENTITY_CLIENT_ID"
                    .to_string(),
            );
        }
        if self.profile_table_name.is_empty() {
            return Err(
                "Profile table name is required. Set --profile-table-name or PROFILE_TABLE_NAME"
                    .to_string(),
            );
        }
        if self.min_password_length == 0 {
            return Err("min_password_length must be greater than 0".to_string());
        }
        if let Some(secret) = &self.identity_client_secret {
            if secret.is_empty() {
                return Err(
                    "IDENTITY_CLIENT_SECRET is set but empty; unset it or provide a value"
                        .to_string(),
                );
            }
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The signup validation policy selected by this deployment.
    pub fn signup_policy(&self) -> SignupPolicy {
        SignupPolicy {
            min_password_len: self.min_password_length,
            username_required: self.username_required,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
