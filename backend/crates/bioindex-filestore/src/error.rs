//! Error types for bioindex-filestore

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilestoreError {
    #[error("Storage configuration error: {0}")]
    Config(String),

    #[error("Invalid object path: {0}")]
    Path(String),

    #[error("Object store error: {0}")]
    ObjectStore(String),
}

pub type Result<T> = std::result::Result<T, FilestoreError>;
