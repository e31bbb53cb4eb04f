//! Shared resources of a running server.
//!
//! Built once at startup and handed to every request handler. Holds the
//! process-wide relational pools and object-storage client; the per-request
//! components are cheap views constructed from them on demand.

use crate::hydrator::RecordHydrator;
use crate::key_indexer::KeyIndexer;
use crate::planner::RecordQueryPlanner;
use crate::portal::PortalService;
use bioindex_configs::{ServerConfig, TableRegistry};
use bioindex_filestore::ObjectReader;
use bioindex_store::IndexStore;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub struct AppContext {
    /// Server configuration loaded once at startup
    config: Arc<ServerConfig>,

    // ===== Registry =====
    registry: Arc<TableRegistry>,

    // ===== Stores =====
    index_store: Arc<dyn IndexStore>,
    portal_store: Arc<dyn IndexStore>,
    objects: Arc<dyn ObjectReader>,

    /// Fired when the server begins shutting down
    shutdown: CancellationToken,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("tables", &self.registry.len())
            .field("hydration", &self.config.hydration)
            .field("shutdown", &self.shutdown.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl AppContext {
    pub fn new(
        config: Arc<ServerConfig>,
        registry: Arc<TableRegistry>,
        index_store: Arc<dyn IndexStore>,
        portal_store: Arc<dyn IndexStore>,
        objects: Arc<dyn ObjectReader>,
    ) -> Self {
        Self {
            config,
            registry,
            index_store,
            portal_store,
            objects,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn config(&self) -> &Arc<ServerConfig> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<TableRegistry> {
        &self.registry
    }

    pub fn index_store(&self) -> &Arc<dyn IndexStore> {
        &self.index_store
    }

    pub fn portal_store(&self) -> &Arc<dyn IndexStore> {
        &self.portal_store
    }

    pub fn objects(&self) -> &Arc<dyn ObjectReader> {
        &self.objects
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown
    }

    pub fn key_indexer(&self) -> KeyIndexer {
        KeyIndexer::new(self.registry.clone(), self.index_store.clone())
    }

    pub fn planner(&self) -> RecordQueryPlanner {
        RecordQueryPlanner::new(self.registry.clone(), self.index_store.clone())
    }

    pub fn hydrator(&self) -> RecordHydrator {
        RecordHydrator::new(self.registry.clone(), self.objects.clone())
            .with_concurrency(self.config.hydration.concurrency)
            .with_max_omission_ratio(self.config.hydration.max_omission_ratio)
    }

    pub fn portal(&self) -> PortalService {
        PortalService::new(self.portal_store.clone())
    }
}
