//! API error type and its HTTP mapping.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use bioindex_core::QueryError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Malformed request parameters
    #[error("{0}")]
    BadRequest(String),
}

/// `{"error": {"code": ..., "message": ...}}`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Stable machine-readable code.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Query(e) => match e {
                QueryError::UnknownTable(_) => "UNKNOWN_INDEX",
                QueryError::NotValueIndexed(_) => "NOT_VALUE_INDEXED",
                QueryError::InvalidFilter { .. } => "INVALID_FILTER",
                QueryError::HeterogeneousRecords { .. } => "HETEROGENEOUS_RECORDS",
                QueryError::HydrationFailed { .. } => "HYDRATION_FAILED",
                QueryError::Cancelled => "CANCELLED",
                QueryError::Store(_) => "STORE_ERROR",
            },
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Query(e) => match e {
                QueryError::UnknownTable(_) => StatusCode::NOT_FOUND,
                QueryError::NotValueIndexed(_)
                | QueryError::InvalidFilter { .. }
                | QueryError::HeterogeneousRecords { .. } => StatusCode::BAD_REQUEST,
                QueryError::HydrationFailed { .. } => StatusCode::BAD_GATEWAY,
                QueryError::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
                QueryError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed ({}): {}", status, self);
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
        }

        HttpResponse::build(status).json(ErrorBody {
            error: ErrorDetail {
                code: self.error_code(),
                message: self.to_string(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (QueryError::UnknownTable("x".into()), StatusCode::NOT_FOUND),
            (QueryError::NotValueIndexed("x".into()), StatusCode::BAD_REQUEST),
            (
                QueryError::InvalidFilter {
                    table: "x".into(),
                    reason: "bad".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (QueryError::HeterogeneousRecords { index: 1 }, StatusCode::BAD_REQUEST),
            (
                QueryError::HydrationFailed {
                    table: "x".into(),
                    omitted: 3,
                    total: 4,
                },
                StatusCode::BAD_GATEWAY,
            ),
            (QueryError::Cancelled, StatusCode::SERVICE_UNAVAILABLE),
        ];

        for (error, status) in cases {
            assert_eq!(ApiError::from(error).status_code(), status);
        }
        assert_eq!(ApiError::bad_request("no").status_code(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_error_body() {
        let response = ApiError::from(QueryError::UnknownTable("genes".into())).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["code"], "UNKNOWN_INDEX");
        assert_eq!(json["error"]["message"], "Unknown index: genes");
    }
}
