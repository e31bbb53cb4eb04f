//! HTTP handlers
//!
//! ## Endpoints
//! - GET /api/indexes - configured index names
//! - GET /api/keys/{index} - distinct keys of a value-indexed index
//! - GET /api/query/{index} - filtered, hydrated records
//! - GET /api/portal/DiseaseGroups, /api/portal/Phenotypes - portal metadata
//! - GET /healthz - liveness probe

mod health;
mod indexes;
mod portal;
mod query;

pub use health::healthz_handler;
pub use indexes::{indexes_handler, keys_handler};
pub use portal::{disease_groups_handler, phenotypes_handler};
pub use query::query_handler;
