//! Test utilities for bioindex-filestore.

use crate::error::{FilestoreError, Result};
use crate::keys::ObjectKey;
use crate::reader::ObjectStoreReader;
use bioindex_commons::{RowId, TableId};
use bytes::Bytes;
use object_store::memory::InMemory;
use object_store::ObjectStore;
use std::sync::Arc;

/// In-memory object store seeded with record bodies.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    store: Arc<InMemory>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes as the object for `table`/`row`.
    pub async fn put_raw(&self, table: &str, row: &str, body: impl Into<Bytes>) -> Result<()> {
        let row = RowId::new(row)
            .ok_or_else(|| FilestoreError::Path("empty row identifier".to_string()))?;
        let key = ObjectKey::for_row(&TableId::from(table), &row);

        let body: Bytes = body.into();
        self.store
            .put(key.path(), body.into())
            .await
            .map_err(|e| FilestoreError::ObjectStore(e.to_string()))?;
        Ok(())
    }

    /// Store a JSON value as the object for `table`/`row`.
    pub async fn put_json(&self, table: &str, row: &str, value: &serde_json::Value) -> Result<()> {
        let body = serde_json::to_vec(value).map_err(|e| FilestoreError::ObjectStore(e.to_string()))?;
        self.put_raw(table, row, body).await
    }

    pub fn reader(&self) -> ObjectStoreReader {
        ObjectStoreReader::new(self.store.clone() as Arc<dyn ObjectStore>)
    }
}
