use super::Profile;
use bioindex_core::{FormattedRecords, IndexKey, OutputFormat};
use serde::{Deserialize, Serialize};

/// `GET /api/indexes`
#[derive(Debug, Serialize)]
pub struct IndexesResponse {
    pub profile: Profile,
    pub indexes: Vec<String>,
    pub count: usize,
}

/// `GET /api/keys/{index}`
#[derive(Debug, Serialize)]
pub struct KeysResponse {
    pub profile: Profile,
    pub index: String,
    pub count: usize,
    pub keys: Vec<IndexKey>,
}

/// Query string of `GET /api/query/{index}`.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    pub q: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
    pub limit: Option<usize>,
}

/// `GET /api/query/{index}`
///
/// # Example Response
/// ```json
/// {
///   "profile": {"query": 0.002, "fetch": 0.031},
///   "index": "patients",
///   "q": "A",
///   "count": 2,
///   "omitted": 0,
///   "data": [{"id": 11, "code": "A"}, {"id": 12, "code": "A"}]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub profile: Profile,
    pub index: String,
    pub q: Option<String>,
    pub count: usize,
    /// Matched rows whose objects were missing or corrupt
    pub omitted: usize,
    pub data: FormattedRecords,
}

/// Portal listings: `{profile, data, count}`.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub profile: Profile,
    pub data: Vec<T>,
    pub count: usize,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, query_secs: f64) -> Self {
        Self {
            profile: Profile::query(query_secs),
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
