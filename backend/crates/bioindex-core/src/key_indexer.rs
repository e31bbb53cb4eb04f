//! Distinct key listing for value-indexed tables.

use crate::error::{QueryError, Result};
use bioindex_commons::TableSchema;
use bioindex_configs::TableRegistry;
use bioindex_store::{quote_identifier, IndexStore, SqlRow, SqlValue, Statement};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A key value as stored in the index.
///
/// Ordered the way the relational store sorts mixed columns: numbers
/// (integers and floats compared by value) before text, text by bytes.
/// Serializes as the bare JSON number or string.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum IndexKey {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl IndexKey {
    /// `None` for NULL and blobs.
    fn from_sql(value: &SqlValue) -> Option<Self> {
        match value {
            SqlValue::Integer(i) => Some(IndexKey::Integer(*i)),
            SqlValue::Real(f) => Some(IndexKey::Float(*f)),
            SqlValue::Text(s) => Some(IndexKey::Text(s.clone())),
            SqlValue::Null | SqlValue::Blob(_) => None,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            IndexKey::Integer(i) => Some(*i as f64),
            IndexKey::Float(f) => Some(*f),
            IndexKey::Text(_) => None,
        }
    }
}

impl Ord for IndexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (IndexKey::Integer(a), IndexKey::Integer(b)) => a.cmp(b),
            (IndexKey::Text(a), IndexKey::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
            (IndexKey::Text(_), _) => Ordering::Greater,
            (_, IndexKey::Text(_)) => Ordering::Less,
            (a, b) => match (a.as_number(), b.as_number()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => Ordering::Equal,
            },
        }
    }
}

impl PartialOrd for IndexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for IndexKey {}

impl From<i64> for IndexKey {
    fn from(value: i64) -> Self {
        IndexKey::Integer(value)
    }
}

impl From<f64> for IndexKey {
    fn from(value: f64) -> Self {
        IndexKey::Float(value)
    }
}

impl From<&str> for IndexKey {
    fn from(value: &str) -> Self {
        IndexKey::Text(value.to_string())
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKey::Integer(i) => write!(f, "{}", i),
            IndexKey::Float(x) => write!(f, "{}", x),
            IndexKey::Text(s) => f.write_str(s),
        }
    }
}

/// Typed row of the key query.
struct KeyRow {
    key: IndexKey,
}

impl KeyRow {
    const COLUMN: &'static str = "key";

    /// `None` for NULL or non-scalar keys.
    fn from_row(row: &SqlRow) -> Option<Self> {
        row.get(Self::COLUMN)
            .and_then(IndexKey::from_sql)
            .map(|key| Self { key })
    }
}

/// Lists the distinct key values of a value-indexed table.
///
/// Issues one relational query per call and never touches object storage.
pub struct KeyIndexer {
    registry: Arc<TableRegistry>,
    store: Arc<dyn IndexStore>,
}

impl KeyIndexer {
    pub fn new(registry: Arc<TableRegistry>, store: Arc<dyn IndexStore>) -> Self {
        Self { registry, store }
    }

    /// Distinct key values in strictly ascending order.
    pub async fn keys(&self, table: &str) -> Result<Vec<IndexKey>> {
        let schema = self
            .registry
            .get(table)
            .ok_or_else(|| QueryError::UnknownTable(table.to_string()))?;

        if !schema.value_indexed {
            return Err(QueryError::NotValueIndexed(table.to_string()));
        }

        let rows = self.store.query(key_statement(&schema)).await?;

        // Collation and column affinity vary by store; the set fixes the
        // order and folds numerically equal keys such as 1 and 1.0.
        let keys: BTreeSet<IndexKey> = rows
            .iter()
            .filter_map(KeyRow::from_row)
            .map(|row| row.key)
            .collect();

        log::debug!("Listed {} keys for index {}", keys.len(), table);
        Ok(keys.into_iter().collect())
    }
}

fn key_statement(schema: &TableSchema) -> Statement {
    let key = quote_identifier(&schema.key_field);
    Statement::new(format!(
        "SELECT DISTINCT {key} AS {alias} FROM {table} ORDER BY {key}",
        alias = quote_identifier(KeyRow::COLUMN),
        table = quote_identifier(schema.id.as_str()),
    ))
}
