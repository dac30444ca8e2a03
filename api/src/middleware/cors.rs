//! CORS middleware configuration for cross-origin requests.
//!
//! The web frontend is served from a single origin (`FRONTEND_URL`) and sends
//! credentials, so CORS allows exactly that origin with credentials enabled.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use bomato_shared::config::ServerConfig;

/// Preflight cache lifetime in seconds
const CORS_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance for the configured frontend origin.
pub fn create_cors(config: &ServerConfig) -> Cors {
    tracing::debug!(origin = %config.frontend_url, "Configuring CORS");

    Cors::default()
        .allowed_origin(config.frontend_url.trim_end_matches('/'))
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-request-id"),
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
        ])
        .max_age(CORS_MAX_AGE)
        .supports_credentials()
}
