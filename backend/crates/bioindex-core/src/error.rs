// Error types module
use bioindex_store::StoreError;
use thiserror::Error;

/// Errors returned by the retrieval engine.
///
/// The engine never maps these to transport concerns; the API layer decides
/// status codes.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Unknown index: {0}")]
    UnknownTable(String),

    #[error("Index {0} is not indexed by value")]
    NotValueIndexed(String),

    #[error("Invalid filter for index {table}: {reason}")]
    InvalidFilter { table: String, reason: String },

    #[error("Failed to fetch {omitted} of {total} records for index {table}")]
    HydrationFailed {
        table: String,
        omitted: usize,
        total: usize,
    },

    #[error("Record {index} does not have the same fields as the first record")]
    HeterogeneousRecords { index: usize },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Index store error: {0}")]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, QueryError>;
