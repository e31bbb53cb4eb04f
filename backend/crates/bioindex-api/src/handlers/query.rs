//! Filtered record queries.

use actix_web::{web, HttpResponse};
use bioindex_core::{AppContext, QuerySpec, ResultFormatter};
use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{Profile, QueryParams, QueryResponse};
use crate::profile::profile;

/// GET /api/query/{index}?q=&format=&limit=
///
/// Plans the relational query, hydrates each matched row from object
/// storage, and shapes the records per `format` (`object`, the default, or
/// `column`). `limit` must be positive when given. `q` is echoed as sent;
/// a blank one matches every row.
pub async fn query_handler(
    path: web::Path<String>,
    params: web::Query<QueryParams>,
    ctx: web::Data<Arc<AppContext>>,
) -> Result<HttpResponse, ApiError> {
    let index = path.into_inner();
    let params = params.into_inner();

    let cap = match params.limit {
        Some(0) => return Err(ApiError::bad_request("limit must be a positive integer")),
        Some(limit) => NonZeroUsize::new(limit),
        None => None,
    };
    let spec = QuerySpec::new(index.as_str())
        .with_filter(params.q.as_deref())
        .with_cap(cap);

    let (row_ids, query_s) = profile(ctx.planner().plan(&spec)).await;
    let row_ids = row_ids?;

    let hydrator = ctx.hydrator();
    let (hydrated, fetch_s) = profile(hydrator.hydrate_until_cancelled(
        &spec.table,
        &row_ids,
        spec.cap,
        ctx.shutdown_token(),
    ))
    .await;
    let hydrated = hydrated?;

    log::debug!(
        "Query {} q={:?}: {} rows, {} omitted, {:.3}s query, {:.3}s fetch",
        index,
        spec.filter,
        row_ids.len(),
        hydrated.omitted,
        query_s,
        fetch_s
    );

    let data = ResultFormatter::format(hydrated.records, params.format)?;
    Ok(HttpResponse::Ok().json(QueryResponse {
        profile: Profile::query(query_s).with_fetch(fetch_s),
        index,
        q: params.q,
        count: data.len(),
        omitted: hydrated.omitted,
        data,
    }))
}
