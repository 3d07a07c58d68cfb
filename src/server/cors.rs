//! CORS header injection.
//!
//! Every response carries the fixed allow-* headers, and `OPTIONS` requests
//! are answered by the explicit preflight handlers on each route, so the
//! preflight body stays under our control. Note that tower-http's CorsLayer
//! short-circuits all OPTIONS requests itself, which is why the headers are
//! injected by this middleware instead.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{header, HeaderMap, HeaderValue};

/// Allowed request headers advertised to browsers.
const ALLOW_HEADERS: HeaderValue = HeaderValue::from_static("Content-Type");

/// Allowed methods advertised to browsers.
const ALLOW_METHODS: HeaderValue = HeaderValue::from_static("GET,POST,OPTIONS");

/// CORS configuration shared with the middleware.
#[derive(Debug, Clone, Default)]
pub struct CorsSettings {
    /// Allowed origins. `None` allows any origin (`*`).
    pub allow_origins: Option<Vec<String>>,
}

impl CorsSettings {
    pub fn any_origin() -> Self {
        Self {
            allow_origins: None,
        }
    }

    pub fn with_origins(origins: Vec<String>) -> Self {
        Self {
            allow_origins: Some(origins),
        }
    }
}

/// Middleware injecting the CORS headers into every response.
pub async fn cors_middleware(
    State(settings): State<CorsSettings>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN).cloned();
    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut(), origin.as_ref(), &settings);
    response
}

/// Apply the allow-* headers.
///
/// With an origin allow-list, the request origin is echoed back only when it
/// is on the list; otherwise the allow-origin header is omitted and the
/// browser blocks the response.
fn apply_cors_headers(
    headers: &mut HeaderMap,
    origin: Option<&HeaderValue>,
    settings: &CorsSettings,
) {
    let allow_origin = match &settings.allow_origins {
        None => Some(HeaderValue::from_static("*")),
        Some(allowed) => origin
            .filter(|o| {
                o.to_str()
                    .map(|o| allowed.iter().any(|a| a == o))
                    .unwrap_or(false)
            })
            .cloned(),
    };

    if let Some(value) = allow_origin {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS);
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS);
}
