//! Test utilities for bioindex-store.
//!
//! Provides a scratch SQLite database that is deleted on drop.

use crate::error::Result;
use crate::pool::PoolConfig;
use crate::sqlite::SqliteIndexStore;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary index database wrapper that cleans up on drop.
pub struct TestIndexDb {
    path: PathBuf,
    /// Kept alive for the duration of the test
    _temp_dir: TempDir,
}

impl TestIndexDb {
    /// Create an empty database file.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().map_err(|e| {
            crate::error::StoreError::InvalidConfig(format!("temp dir: {}", e))
        })?;
        let path = temp_dir.path().join("index.db");

        let conn = Connection::open(&path)?;
        conn.execute_batch("PRAGMA user_version = 1;")?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run setup SQL on a writable connection.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(sql)?;
        Ok(())
    }

    /// Read-only store over this database.
    pub fn store(&self, max_connections: usize) -> Result<SqliteIndexStore> {
        SqliteIndexStore::open(PoolConfig::new(&self.path).max_connections(max_connections))
    }
}
