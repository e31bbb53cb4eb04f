//! Server-wide middleware configuration helpers.
//!
//! Keeps the Actix application setup focused by providing reusable
//! constructors for the CORS and request logging layers.

use actix_cors::Cors;
use actix_web::http::{header::HeaderName, Method};
use actix_web::middleware;
use bioindex_configs::ServerConfig;
use log::debug;

/// Build CORS middleware from server configuration using actix-cors.
pub fn build_cors_from_config(config: &ServerConfig) -> Cors {
    let cors_config = &config.security.cors;

    let mut cors = Cors::default();

    if cors_config.allowed_origins.is_empty() || cors_config.allowed_origins.iter().any(|o| o == "*") {
        cors = cors.allow_any_origin();
        debug!("CORS: Allowing any origin");
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: Allowed origins: {:?}", cors_config.allowed_origins);
    }

    let methods: Vec<Method> = cors_config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    if cors_config.allowed_headers.iter().any(|h| h == "*") {
        cors = cors.allow_any_header();
    } else {
        let headers: Vec<HeaderName> = cors_config
            .allowed_headers
            .iter()
            .filter_map(|h| h.parse().ok())
            .collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }
    }

    cors.max_age(cors_config.max_age)
}

/// Build the request logger middleware.
///
/// One line per request: peer, request line, status, size, elapsed seconds.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new(r#"%a "%r" %s %b %Ts"#)
}
