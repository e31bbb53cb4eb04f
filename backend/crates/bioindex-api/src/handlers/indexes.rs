//! Index listing and key enumeration.

use actix_web::{web, HttpResponse};
use bioindex_core::AppContext;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::models::{IndexesResponse, KeysResponse, Profile};
use crate::profile::profile;

/// GET /api/indexes
pub async fn indexes_handler(ctx: web::Data<Arc<AppContext>>) -> HttpResponse {
    let start = Instant::now();
    let indexes: Vec<String> = ctx
        .registry()
        .table_ids()
        .map(|id| id.as_str().to_string())
        .collect();

    HttpResponse::Ok().json(IndexesResponse {
        profile: Profile::query(start.elapsed().as_secs_f64()),
        count: indexes.len(),
        indexes,
    })
}

/// GET /api/keys/{index}
pub async fn keys_handler(
    path: web::Path<String>,
    ctx: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let index = path.into_inner();
    let (keys, query_s) = profile(ctx.key_indexer().keys(&index)).await;
    let keys = keys?;

    Ok(HttpResponse::Ok().json(KeysResponse {
        profile: Profile::query(query_s),
        index,
        count: keys.len(),
        keys,
    }))
}
