//! Liveness probe handler

use actix_web::{HttpResponse, Responder};

use crate::models::HealthResponse;

/// GET /healthz
///
/// Returns 200 OK while the process is serving requests. Does not touch
/// either store.
pub async fn healthz_handler() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
