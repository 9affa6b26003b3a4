use axum::http::{HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer for a read-only API.
///
/// # Arguments
/// * `allowed_origins` - Explicit list of allowed origin header values
///
/// The layer allows GET/OPTIONS, the Content-Type and Accept headers,
/// and caches preflight responses for one hour.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer for development.
///
/// Allows any origin. Not intended for production deployments.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
