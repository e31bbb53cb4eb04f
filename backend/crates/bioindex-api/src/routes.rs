//! API routes configuration

use crate::error::ApiError;
use crate::handlers;
use actix_web::web;

/// Configure BioIndex routes:
/// - GET /api/indexes
/// - GET /api/keys/{index}
/// - GET /api/query/{index}
/// - GET /api/portal/DiseaseGroups
/// - GET /api/portal/Phenotypes
/// - GET /healthz
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::bad_request(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/indexes", web::get().to(handlers::indexes_handler))
            .route("/keys/{index}", web::get().to(handlers::keys_handler))
            .route("/query/{index}", web::get().to(handlers::query_handler))
            .service(
                web::scope("/portal")
                    .route("/DiseaseGroups", web::get().to(handlers::disease_groups_handler))
                    .route("/Phenotypes", web::get().to(handlers::phenotypes_handler)),
            ),
    )
    .route("/healthz", web::get().to(handlers::healthz_handler));
}
