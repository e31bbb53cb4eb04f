//! Object reads for record hydration.

use crate::error::{FilestoreError, Result};
use crate::keys::ObjectKey;
use async_trait::async_trait;
use bioindex_configs::StorageSettings;
use bytes::Bytes;
use object_store::ObjectStore;
use std::sync::Arc;

/// Point reads of stored record bodies.
#[async_trait]
pub trait ObjectReader: Send + Sync {
    /// Read an object's full contents; `Ok(None)` when it does not exist.
    async fn read(&self, key: &ObjectKey) -> Result<Option<Bytes>>;
}

/// `ObjectReader` over any `object_store` backend. Cheap to clone; the
/// underlying client is shared process-wide.
#[derive(Clone)]
pub struct ObjectStoreReader {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreReader {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    pub fn from_settings(settings: &StorageSettings) -> Result<Self> {
        Ok(Self::new(crate::build_object_store(settings)?))
    }
}

impl std::fmt::Debug for ObjectStoreReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectStoreReader({})", self.store)
    }
}

#[async_trait]
impl ObjectReader for ObjectStoreReader {
    async fn read(&self, key: &ObjectKey) -> Result<Option<Bytes>> {
        let result = match self.store.get(key.path()).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(FilestoreError::ObjectStore(e.to_string())),
        };

        let bytes = result
            .bytes()
            .await
            .map_err(|e| FilestoreError::ObjectStore(e.to_string()))?;

        Ok(Some(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryRecordStore;
    use bioindex_commons::{RowId, TableId};
    use serde_json::json;

    fn key(row: &str) -> ObjectKey {
        ObjectKey::for_row(&TableId::from("patients"), &RowId::new(row).unwrap())
    }

    #[tokio::test]
    async fn test_read_existing_object() {
        let store = MemoryRecordStore::new();
        store.put_json("patients", "1", &json!({"code": "A"})).await.unwrap();

        let bytes = store.reader().read(&key("1")).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, json!({"code": "A"}));
    }

    #[tokio::test]
    async fn test_missing_object_is_none() {
        let store = MemoryRecordStore::new();
        assert!(store.reader().read(&key("404")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_local_filesystem_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let settings = StorageSettings {
            url: temp_dir.path().to_string_lossy().into_owned(),
            ..Default::default()
        };

        std::fs::create_dir_all(temp_dir.path().join("patients")).unwrap();
        std::fs::write(temp_dir.path().join("patients").join("7"), br#"{"code":"B"}"#).unwrap();

        let reader = ObjectStoreReader::from_settings(&settings).unwrap();
        let bytes = reader.read(&key("7")).await.unwrap().unwrap();
        assert_eq!(&bytes[..], br#"{"code":"B"}"#);
        assert!(reader.read(&key("8")).await.unwrap().is_none());
    }
}
