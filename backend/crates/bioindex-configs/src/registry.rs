//! Table registry: table identifier to schema descriptor.
//!
//! Built once at startup and read-only afterwards, so lookups need no
//! synchronization.

use crate::config::TableConfig;
use bioindex_commons::{TableId, TableSchema};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    /// Configuration order, for listing
    order: Vec<TableId>,
    tables: HashMap<TableId, Arc<TableSchema>>,
}

impl TableRegistry {
    /// Build the registry from `[[tables]]` entries.
    pub fn from_config(tables: &[TableConfig]) -> anyhow::Result<Self> {
        let schemas = tables
            .iter()
            .map(TableConfig::to_schema)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Self::from_schemas(schemas)
    }

    /// Build the registry from already-constructed schemas.
    pub fn from_schemas(schemas: impl IntoIterator<Item = TableSchema>) -> anyhow::Result<Self> {
        let mut registry = Self::default();
        for schema in schemas {
            if registry.tables.contains_key(&schema.id) {
                return Err(anyhow::anyhow!("Duplicate table '{}'", schema.id));
            }
            registry.order.push(schema.id.clone());
            registry.tables.insert(schema.id.clone(), Arc::new(schema));
        }
        Ok(registry)
    }

    pub fn get(&self, table: &str) -> Option<Arc<TableSchema>> {
        self.tables.get(&TableId::from(table)).cloned()
    }

    /// Table identifiers in configuration order.
    pub fn table_ids(&self) -> impl Iterator<Item = &TableId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
