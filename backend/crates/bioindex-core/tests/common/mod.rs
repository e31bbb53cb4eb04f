//! Shared fixtures for bioindex-core integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bioindex_commons::{FieldDescriptor, FieldType, TableSchema};
use bioindex_configs::TableRegistry;
use bioindex_core::{KeyIndexer, RecordHydrator, RecordQueryPlanner};
use bioindex_filestore::test_utils::MemoryRecordStore;
use bioindex_filestore::{ObjectKey, ObjectReader, ObjectStoreReader};
use bioindex_store::test_utils::TestIndexDb;
use bioindex_store::IndexStore;
use bytes::Bytes;
use serde_json::json;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// `(id, code)` rows of the `patients` index, in insertion order.
pub const PATIENTS: &[(i64, &str)] = &[(10, "B"), (11, "A"), (12, "A"), (13, "C"), (14, "A")];

pub fn registry() -> Arc<TableRegistry> {
    let fields = vec![
        FieldDescriptor::new("id", FieldType::Integer),
        FieldDescriptor::new("code", FieldType::String),
        FieldDescriptor::new("name", FieldType::String),
    ];
    Arc::new(
        TableRegistry::from_schemas([
            TableSchema::new("patients", "code", fields.clone())
                .with_id_field("id")
                .with_value_indexed(true),
            TableSchema::new("visits", "code", fields).with_id_field("id"),
        ])
        .unwrap(),
    )
}

/// Index database and object store seeded with every patient.
pub struct Fixture {
    pub db: TestIndexDb,
    pub objects: MemoryRecordStore,
    pub registry: Arc<TableRegistry>,
    pub store: Arc<dyn IndexStore>,
}

impl Fixture {
    pub async fn new() -> Self {
        Self::without_objects(&[]).await
    }

    /// Seed everything except the objects of `missing` ids.
    pub async fn without_objects(missing: &[i64]) -> Self {
        let db = TestIndexDb::new().unwrap();
        let mut sql = String::from(
            "CREATE TABLE patients (id INTEGER, code TEXT, name TEXT);
             CREATE TABLE visits (id INTEGER, code TEXT, name TEXT);",
        );
        for (id, code) in PATIENTS {
            sql.push_str(&format!(
                "INSERT INTO patients VALUES ({}, '{}', 'patient {}');",
                id, code, id
            ));
        }
        db.execute_batch(&sql).unwrap();

        let objects = MemoryRecordStore::new();
        for (id, code) in PATIENTS.iter().filter(|(id, _)| !missing.contains(id)) {
            objects
                .put_json(
                    "patients",
                    &id.to_string(),
                    &json!({"id": id, "code": code, "name": format!("patient {}", id)}),
                )
                .await
                .unwrap();
        }

        let store: Arc<dyn IndexStore> = Arc::new(db.store(4).unwrap());
        Self {
            db,
            objects,
            registry: registry(),
            store,
        }
    }

    pub fn key_indexer(&self) -> KeyIndexer {
        KeyIndexer::new(self.registry.clone(), self.store.clone())
    }

    pub fn planner(&self) -> RecordQueryPlanner {
        RecordQueryPlanner::new(self.registry.clone(), self.store.clone())
    }

    pub fn hydrator(&self) -> RecordHydrator {
        RecordHydrator::new(self.registry.clone(), Arc::new(self.objects.reader()))
    }

    pub fn delayed_reader(&self, max_delay: Duration, seed: u64) -> Arc<DelayedReader> {
        Arc::new(DelayedReader::new(self.objects.reader(), max_delay, seed))
    }

    /// Reader whose every fetch takes at least `stall`.
    pub fn stalled_reader(&self, stall: Duration) -> Arc<DelayedReader> {
        Arc::new(
            DelayedReader::new(self.objects.reader(), Duration::from_millis(5), 0)
                .with_min_delay(stall),
        )
    }

    pub fn delayed_hydrator(&self, max_delay: Duration, seed: u64) -> RecordHydrator {
        self.hydrator_over(self.delayed_reader(max_delay, seed))
    }

    pub fn hydrator_over(&self, reader: Arc<DelayedReader>) -> RecordHydrator {
        RecordHydrator::new(self.registry.clone(), reader)
    }
}

/// Object reader that sleeps a key-dependent pseudo-random time before each
/// read, so fetches complete out of request order. Tracks the peak number of
/// reads in flight.
pub struct DelayedReader {
    inner: ObjectStoreReader,
    min_delay: Duration,
    max_delay: Duration,
    seed: u64,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl DelayedReader {
    pub fn new(inner: ObjectStoreReader, max_delay: Duration, seed: u64) -> Self {
        Self {
            inner,
            min_delay: Duration::ZERO,
            max_delay,
            seed,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Every read sleeps at least `min_delay` on top of the jitter.
    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn delay_for(&self, key: &ObjectKey) -> Duration {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        key.as_str().hash(&mut hasher);
        let millis = self.max_delay.as_millis().max(1) as u64;
        self.min_delay + Duration::from_millis(1 + hasher.finish() % millis)
    }
}

#[async_trait]
impl ObjectReader for DelayedReader {
    async fn read(&self, key: &ObjectKey) -> bioindex_filestore::Result<Option<Bytes>> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay_for(key)).await;
        let result = self.inner.read(key).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
