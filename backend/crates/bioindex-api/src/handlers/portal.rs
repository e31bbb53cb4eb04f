//! Portal metadata handlers.

use actix_web::{web, HttpResponse};
use bioindex_core::AppContext;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::ListResponse;
use crate::profile::profile;

#[derive(Debug, Deserialize)]
pub struct PhenotypeParams {
    /// Disease group name
    pub q: Option<String>,
}

/// GET /api/portal/DiseaseGroups
pub async fn disease_groups_handler(
    ctx: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let (groups, query_s) = profile(ctx.portal().disease_groups()).await;
    Ok(HttpResponse::Ok().json(ListResponse::new(groups?, query_s)))
}

/// GET /api/portal/Phenotypes?q=
pub async fn phenotypes_handler(
    params: web::Query<PhenotypeParams>,
    ctx: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let (phenotypes, query_s) = profile(ctx.portal().phenotypes(params.q.as_deref())).await;
    Ok(HttpResponse::Ok().json(ListResponse::new(phenotypes?, query_s)))
}
