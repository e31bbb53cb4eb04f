use crate::error::Result;
use crate::row::SqlRow;
use crate::statement::Statement;
use async_trait::async_trait;

/// Read access to the relational index store.
///
/// Implementations check out one connection for the duration of a statement
/// and release it on every exit path.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Execute a read-only statement and materialize its rows in result order.
    async fn query(&self, statement: Statement) -> Result<Vec<SqlRow>>;
}
