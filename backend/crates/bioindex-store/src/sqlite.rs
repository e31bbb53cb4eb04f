//! SQLite-backed `IndexStore`.

use crate::error::{Result, StoreError};
use crate::pool::{ConnectionPool, PoolConfig};
use crate::row::SqlRow;
use crate::statement::Statement;
use crate::traits::IndexStore;
use crate::value::SqlValue;
use async_trait::async_trait;
use rusqlite::Connection;
use std::sync::Arc;
use std::time::Instant;

/// Executes statements on pooled SQLite connections.
///
/// Each query checks out one connection, runs on the blocking thread pool,
/// and returns the connection when the blocking task finishes.
#[derive(Clone)]
pub struct SqliteIndexStore {
    pool: ConnectionPool,
}

impl SqliteIndexStore {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Build a store with its own pool.
    pub fn open(config: PoolConfig) -> Result<Self> {
        Ok(Self::new(ConnectionPool::new(config)?))
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Check that the database can be opened and queried.
    pub async fn ping(&self) -> Result<()> {
        self.query(Statement::new("SELECT 1")).await.map(|_| ())
    }
}

#[async_trait]
impl IndexStore for SqliteIndexStore {
    async fn query(&self, statement: Statement) -> Result<Vec<SqlRow>> {
        let mut slot = self.pool.acquire().await?;

        tokio::task::spawn_blocking(move || {
            let started = Instant::now();
            let result = slot.connection().and_then(|conn| run_statement(conn, &statement));

            match &result {
                Ok(rows) => log::debug!(
                    "Index query returned {} rows in {:.2}ms: {}",
                    rows.len(),
                    started.elapsed().as_secs_f64() * 1000.0,
                    statement.sql()
                ),
                Err(e) => {
                    log::warn!("Index query failed: {}: {}", statement.sql(), e);
                    slot.discard();
                },
            }
            result
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

fn run_statement(conn: &Connection, statement: &Statement) -> Result<Vec<SqlRow>> {
    let mut stmt = conn.prepare_cached(statement.sql())?;
    let columns: Arc<[String]> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>()
        .into();
    let width = columns.len();

    let mut rows = stmt.query(rusqlite::params_from_iter(statement.params()))?;
    let mut out = Vec::new();
    while let Some(row) = rows.next()? {
        let mut values = Vec::with_capacity(width);
        for idx in 0..width {
            let value: rusqlite::types::Value = row.get(idx)?;
            values.push(SqlValue::from(value));
        }
        out.push(SqlRow::new(Arc::clone(&columns), values));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestIndexDb;

    #[tokio::test]
    async fn test_query_named_columns() {
        let db = TestIndexDb::new().unwrap();
        db.execute_batch(
            "CREATE TABLE patients (id INTEGER, code TEXT);
             INSERT INTO patients VALUES (1, 'B'), (2, 'A');",
        )
        .unwrap();

        let store = db.store(2).unwrap();
        let rows = store
            .query(Statement::new("SELECT id AS row_id, code FROM patients WHERE code = ?").bind("A"))
            .await
            .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("row_id"), Some(&SqlValue::Integer(2)));
        assert_eq!(rows[0].get("code"), Some(&SqlValue::from("A")));
        assert_eq!(store.pool().stats().active_connections, 0);
    }

    #[tokio::test]
    async fn test_failed_query_releases_connection() {
        let db = TestIndexDb::new().unwrap();
        let store = db.store(1).unwrap();

        let err = store.query(Statement::new("SELECT * FROM missing_table")).await;
        assert!(matches!(err, Err(StoreError::Sqlite(_))));

        // The single slot is free again
        store.ping().await.unwrap();
        assert_eq!(store.pool().stats().active_connections, 0);
    }

    #[tokio::test]
    async fn test_store_is_read_only() {
        let db = TestIndexDb::new().unwrap();
        db.execute_batch("CREATE TABLE t (x INTEGER);").unwrap();
        let store = db.store(1).unwrap();

        let result = store.query(Statement::new("INSERT INTO t VALUES (1)")).await;
        assert!(result.is_err());
    }
}
