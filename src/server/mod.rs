//! Axum-based HTTP boundary.
//!
//! Thin adapters only: handlers deserialize the request body, call the
//! matching coordinator, and let the single [`crate::error::ApiError`]
//! status mapping translate failures. No business decision lives here.

mod cors;
mod handlers;
mod routes;

pub use cors::{cors_middleware, CorsSettings};
pub use handlers::{
    health_handler, login_handler, preflight_handler, signup_handler, upload_grant_handler,
    AppState, ErrorResponse, HealthResponse, LoginResponse, MessageResponse, SignupResponse,
};
pub use routes::{create_router, RouterConfig};
