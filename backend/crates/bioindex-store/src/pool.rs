//! Connection pool for SQLite index databases.
//!
//! A semaphore bounds the number of checked-out connections. Idle
//! connections are kept for reuse; a `PooledConnection` guard returns its
//! connection when dropped, including on error and unwind paths.

use crate::error::{Result, StoreError};
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Connection pool configuration.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Database file path.
    pub path: PathBuf,
    /// Maximum number of checked-out connections.
    pub max_connections: usize,
    /// How long to wait for a connection.
    pub acquire_timeout: Duration,
    /// Open connections read-only.
    pub read_only: bool,
}

impl PoolConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 8,
            acquire_timeout: Duration::from_secs(30),
            read_only: true,
        }
    }

    /// Sets the maximum connections.
    pub fn max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the acquire timeout.
    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(StoreError::InvalidConfig(
                "max_connections must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    fn open_flags(&self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_NO_MUTEX | OpenFlags::SQLITE_OPEN_URI;
        if self.read_only {
            base | OpenFlags::SQLITE_OPEN_READ_ONLY
        } else {
            base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
        }
    }
}

/// Pool statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Total connections opened.
    pub connections_opened: u64,
    /// Total acquisitions.
    pub acquisitions: u64,
    /// Acquisition timeouts.
    pub timeouts: u64,
    /// Connections currently idle in the pool.
    pub idle_connections: usize,
    /// Connections currently checked out.
    pub active_connections: usize,
}

struct PoolInner {
    config: PoolConfig,
    idle: Mutex<VecDeque<Connection>>,
    semaphore: Arc<Semaphore>,
    connections_opened: AtomicU64,
    acquisitions: AtomicU64,
    timeouts: AtomicU64,
}

impl PoolInner {
    fn release(&self, conn: Connection) {
        if self.semaphore.is_closed() {
            return;
        }
        self.idle.lock().push_back(conn);
    }
}

/// A bounded pool of SQLite connections. Cheap to clone.
#[derive(Clone)]
pub struct ConnectionPool {
    inner: Arc<PoolInner>,
}

impl ConnectionPool {
    /// Creates a new connection pool. Connections are opened lazily.
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            inner: Arc::new(PoolInner {
                semaphore: Arc::new(Semaphore::new(config.max_connections)),
                idle: Mutex::new(VecDeque::new()),
                connections_opened: AtomicU64::new(0),
                acquisitions: AtomicU64::new(0),
                timeouts: AtomicU64::new(0),
                config,
            }),
        })
    }

    /// Acquires a connection slot, waiting up to the configured timeout.
    ///
    /// The returned guard opens its connection on first use when no idle
    /// connection was available.
    pub async fn acquire(&self) -> Result<PooledConnection> {
        let timeout = self.inner.config.acquire_timeout;
        let permit = match tokio::time::timeout(timeout, self.inner.semaphore.clone().acquire_owned()).await {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(StoreError::PoolClosed),
            Err(_) => {
                self.inner.timeouts.fetch_add(1, Ordering::Relaxed);
                return Err(StoreError::PoolTimeout(timeout.as_millis() as u64));
            },
        };

        self.inner.acquisitions.fetch_add(1, Ordering::Relaxed);
        let conn = self.inner.idle.lock().pop_front();

        Ok(PooledConnection {
            conn,
            pool: Arc::clone(&self.inner),
            discard: false,
            _permit: permit,
        })
    }

    /// Closes the pool: pending and future acquisitions fail and idle
    /// connections are dropped.
    pub fn close(&self) {
        self.inner.semaphore.close();
        self.inner.idle.lock().clear();
    }

    /// Returns pool statistics.
    pub fn stats(&self) -> PoolStats {
        let max = self.inner.config.max_connections;
        PoolStats {
            connections_opened: self.inner.connections_opened.load(Ordering::Relaxed),
            acquisitions: self.inner.acquisitions.load(Ordering::Relaxed),
            timeouts: self.inner.timeouts.load(Ordering::Relaxed),
            idle_connections: self.inner.idle.lock().len(),
            active_connections: max.saturating_sub(self.inner.semaphore.available_permits()),
        }
    }

    pub fn config(&self) -> &PoolConfig {
        &self.inner.config
    }
}

/// A checked-out connection slot.
///
/// Holds a semaphore permit for its whole lifetime. On drop the connection,
/// unless discarded, goes back to the idle queue and the permit is released.
pub struct PooledConnection {
    conn: Option<Connection>,
    pool: Arc<PoolInner>,
    discard: bool,
    _permit: OwnedSemaphorePermit,
}

impl PooledConnection {
    /// Borrow the connection, opening it if this slot has none yet.
    ///
    /// Blocking; call from a blocking context.
    pub fn connection(&mut self) -> Result<&mut Connection> {
        if self.conn.is_none() {
            let config = &self.pool.config;
            let conn = Connection::open_with_flags(&config.path, config.open_flags())?;
            self.pool.connections_opened.fetch_add(1, Ordering::Relaxed);
            log::debug!("Opened index database connection: {}", config.path.display());
            self.conn = Some(conn);
        }

        self.conn
            .as_mut()
            .ok_or_else(|| StoreError::TaskFailed("connection unavailable".to_string()))
    }

    /// Drop the connection instead of returning it to the pool.
    pub fn discard(&mut self) {
        self.discard = true;
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if !self.discard {
                self.pool.release(conn);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestIndexDb;

    #[test]
    fn test_config_validation() {
        assert!(PoolConfig::new("x.db").max_connections(0).validate().is_err());
        assert!(PoolConfig::new("x.db").validate().is_ok());
    }

    #[tokio::test]
    async fn test_connection_returned_on_drop() {
        let db = TestIndexDb::new().unwrap();
        let pool = ConnectionPool::new(PoolConfig::new(db.path()).max_connections(2)).unwrap();

        {
            let mut slot = pool.acquire().await.unwrap();
            slot.connection().unwrap();
            assert_eq!(pool.stats().active_connections, 1);
        }

        let stats = pool.stats();
        assert_eq!(stats.active_connections, 0);
        assert_eq!(stats.idle_connections, 1);
        assert_eq!(stats.connections_opened, 1);

        // Reuses the idle connection
        let mut slot = pool.acquire().await.unwrap();
        slot.connection().unwrap();
        assert_eq!(pool.stats().connections_opened, 1);
    }

    #[tokio::test]
    async fn test_discarded_connection_not_reused() {
        let db = TestIndexDb::new().unwrap();
        let pool = ConnectionPool::new(PoolConfig::new(db.path())).unwrap();

        {
            let mut slot = pool.acquire().await.unwrap();
            slot.connection().unwrap();
            slot.discard();
        }

        assert_eq!(pool.stats().idle_connections, 0);
    }

    #[tokio::test]
    async fn test_acquire_times_out_when_exhausted() {
        let db = TestIndexDb::new().unwrap();
        let pool = ConnectionPool::new(
            PoolConfig::new(db.path())
                .max_connections(1)
                .acquire_timeout(Duration::from_millis(20)),
        )
        .unwrap();

        let _held = pool.acquire().await.unwrap();
        let err = pool.acquire().await.err().unwrap();
        assert!(matches!(err, StoreError::PoolTimeout(20)));
        assert_eq!(pool.stats().timeouts, 1);
    }

    #[tokio::test]
    async fn test_closed_pool_rejects_acquire() {
        let db = TestIndexDb::new().unwrap();
        let pool = ConnectionPool::new(PoolConfig::new(db.path())).unwrap();
        pool.close();
        assert!(matches!(pool.acquire().await.err().unwrap(), StoreError::PoolClosed));
    }
}
