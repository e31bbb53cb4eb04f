//! Error types for bioindex-store

use thiserror::Error;

/// Errors raised while talking to the relational store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Timed out after {0}ms waiting for a database connection")]
    PoolTimeout(u64),

    #[error("Connection pool is closed")]
    PoolClosed,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Query task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
