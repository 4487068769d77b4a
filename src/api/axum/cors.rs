//! CORS configuration using tower-http.

use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Any origin; the methods and headers the back office routes use.
pub fn default() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(std::time::Duration::from_secs(3600))
}
