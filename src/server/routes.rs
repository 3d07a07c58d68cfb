//! Router configuration.
//!
//! # Route Structure
//!
//! ```text
//! /health             - Health check
//! /signup             - POST: create account + profile; OPTIONS: preflight
//! /login              - POST: authenticate; OPTIONS: preflight
//! /uploads/grant      - GET: issue upload grant; OPTIONS: preflight
//! ```

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::cors::{cors_middleware, CorsSettings};
use super::handlers::{
    health_handler, login_handler, preflight_handler, signup_handler, upload_grant_handler,
    AppState,
};
use crate::identity::IdentityProvider;
use crate::media::ObjectStore;
use crate::profile::ProfileStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Defaults: any origin allowed, tracing enabled.
    pub fn new() -> Self {
        Self {
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router.
///
/// Every API route answers `OPTIONS` with the fixed preflight body; the CORS
/// middleware adds the allow-* headers to every response uniformly.
pub fn create_router<I, P, O>(state: AppState<I, P, O>, config: RouterConfig) -> Router
where
    I: IdentityProvider + 'static,
    P: ProfileStore + 'static,
    O: ObjectStore + 'static,
{
    let cors_settings = match config.cors_origins {
        None => CorsSettings::any_origin(),
        Some(origins) => CorsSettings::with_origins(origins),
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .route(
            "/signup",
            post(signup_handler::<I, P, O>).options(preflight_handler),
        )
        .route(
            "/login",
            post(login_handler::<I, P, O>).options(preflight_handler),
        )
        .route(
            "/uploads/grant",
            get(upload_grant_handler::<I, P, O>).options(preflight_handler),
        )
        .with_state(state)
        .layer(middleware::from_fn_with_state(
            cors_settings,
            cors_middleware,
        ));

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

// =============================================================================
// Tests
// =============================================================================
