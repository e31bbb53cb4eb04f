//! # bioindex-store
//!
//! Read-only access to the relational index database.
//!
//! ## Architecture
//!
//! - **`IndexStore`**: async query trait consumed by the core; one statement
//!   in, named rows out
//! - **`Statement`** / **`SqlValue`** / **`SqlRow`**: backend-neutral query
//!   and result types
//! - **`ConnectionPool`**: bounded pool of SQLite connections with scoped
//!   checkout; a connection returns to the pool when its guard drops
//! - **`SqliteIndexStore`**: `IndexStore` over the pool, executing on the
//!   blocking thread pool

pub mod error;
pub mod pool;
pub mod row;
pub mod sqlite;
pub mod statement;
pub mod traits;
pub mod value;

// Make test_utils available for testing in dependent crates
pub mod test_utils;

pub use error::{Result, StoreError};
pub use pool::{ConnectionPool, PoolConfig, PoolStats, PooledConnection};
pub use row::SqlRow;
pub use sqlite::SqliteIndexStore;
pub use statement::{quote_identifier, Statement};
pub use traits::IndexStore;
pub use value::SqlValue;
