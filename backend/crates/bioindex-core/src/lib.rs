//! # bioindex-core
//!
//! The record retrieval engine behind the BioIndex HTTP API.
//!
//! A query flows through four components:
//!
//! 1. **`KeyIndexer`** lists the distinct key values of a value-indexed table
//! 2. **`RecordQueryPlanner`** turns a `QuerySpec` into one relational query
//!    and returns matching row identifiers in result order
//! 3. **`RecordHydrator`** fetches each row's object concurrently, decodes it
//!    against the table schema, and restores row order
//! 4. **`ResultFormatter`** reshapes records into row or column form
//!
//! Portal reads (`PortalService`) sit beside the engine and go straight to
//! the relational store.

pub mod app_context;
pub mod error;
pub mod formatter;
pub mod hydrator;
pub mod key_indexer;
pub mod planner;
pub mod portal;

pub use app_context::AppContext;
pub use error::{QueryError, Result};
pub use formatter::{ColumnarRecords, FormattedRecords, OutputFormat, ResultFormatter};
pub use hydrator::{HydratedRecords, RecordHydrator};
pub use key_indexer::{IndexKey, KeyIndexer};
pub use planner::{normalize_filter, QuerySpec, RecordQueryPlanner};
pub use portal::{DiseaseGroup, Phenotype, PortalService};
