//! Concurrent record hydration from object storage.

use crate::error::{QueryError, Result};
use bioindex_commons::{Record, RowId, TableSchema};
use bioindex_configs::{defaults, TableRegistry};
use bioindex_filestore::{ObjectKey, ObjectReader};
use futures_util::stream::{self, StreamExt};
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Records hydrated for one batch, in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HydratedRecords {
    pub records: Vec<Record>,
    /// Ids whose object was missing, unreadable, or did not decode
    pub omitted: usize,
}

/// Fetches and decodes the stored object of each row id.
///
/// Fetches run concurrently up to `concurrency` at a time; the output is
/// reassembled in input order once every fetch has settled. A missing or
/// corrupt object drops that record and counts it as omitted. The whole
/// batch fails only when the omitted fraction exceeds `max_omission_ratio`.
pub struct RecordHydrator {
    registry: Arc<TableRegistry>,
    reader: Arc<dyn ObjectReader>,
    concurrency: usize,
    max_omission_ratio: f64,
}

impl RecordHydrator {
    pub fn new(registry: Arc<TableRegistry>, reader: Arc<dyn ObjectReader>) -> Self {
        Self {
            registry,
            reader,
            concurrency: defaults::default_hydration_concurrency(),
            max_omission_ratio: defaults::default_max_omission_ratio(),
        }
    }

    /// Maximum concurrent fetches; zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_max_omission_ratio(mut self, ratio: f64) -> Self {
        self.max_omission_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Hydrate the first `cap` ids (all when `None`).
    ///
    /// Dropping the returned future cancels any fetches still in flight.
    pub async fn hydrate(
        &self,
        table: &str,
        row_ids: &[RowId],
        cap: Option<NonZeroUsize>,
    ) -> Result<HydratedRecords> {
        let schema = self
            .registry
            .get(table)
            .ok_or_else(|| QueryError::UnknownTable(table.to_string()))?;

        let row_ids = match cap {
            Some(cap) if cap.get() < row_ids.len() => &row_ids[..cap.get()],
            _ => row_ids,
        };
        if row_ids.is_empty() {
            return Ok(HydratedRecords::default());
        }

        let reader = self.reader.as_ref();
        let schema_ref = schema.as_ref();
        let fetches = row_ids.iter().enumerate().map(|(index, row_id)| async move {
            (index, fetch_record(reader, schema_ref, row_id).await)
        });

        let mut settled: Vec<(usize, Option<Record>)> = stream::iter(fetches)
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        settled.sort_unstable_by_key(|(index, _)| *index);

        let total = settled.len();
        let records: Vec<Record> = settled.into_iter().filter_map(|(_, record)| record).collect();
        let omitted = total - records.len();

        if omitted > 0 {
            log::warn!(
                "Omitted {} of {} records from index {}",
                omitted,
                total,
                schema.id
            );
        }
        if omitted as f64 > self.max_omission_ratio * total as f64 {
            return Err(QueryError::HydrationFailed {
                table: schema.id.to_string(),
                omitted,
                total,
            });
        }

        Ok(HydratedRecords { records, omitted })
    }

    /// Like [`hydrate`](Self::hydrate), but stops early with
    /// `QueryError::Cancelled` once `token` fires.
    pub async fn hydrate_until_cancelled(
        &self,
        table: &str,
        row_ids: &[RowId],
        cap: Option<NonZeroUsize>,
        token: &CancellationToken,
    ) -> Result<HydratedRecords> {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                log::debug!("Hydration of index {} cancelled", table);
                Err(QueryError::Cancelled)
            }
            result = self.hydrate(table, row_ids, cap) => result,
        }
    }
}

/// Fetch and decode one object; `None` means omitted.
async fn fetch_record(
    reader: &dyn ObjectReader,
    schema: &TableSchema,
    row_id: &RowId,
) -> Option<Record> {
    let key = ObjectKey::for_row(&schema.id, row_id);
    let bytes = match reader.read(&key).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::warn!("Missing object {} for row {}", key, row_id);
            return None;
        }
        Err(e) => {
            log::warn!("Failed to read object {}: {}", key, e);
            return None;
        }
    };

    match Record::decode(schema, &bytes) {
        Ok(record) => Some(record),
        Err(e) => {
            log::warn!("Corrupt object {}: {}", key, e);
            None
        }
    }
}
