//! # bioindex-commons
//!
//! Shared models used by every BioIndex crate:
//! - `TableId`, `TableSchema`, `FieldDescriptor`, `FieldType` describe a
//!   queryable table as loaded from configuration
//! - `GroupSet` / `GroupMembership` hold parsed group allow-lists
//! - `RowId` addresses one matched relational row
//! - `Record` is a hydrated, schema-validated object body

pub mod models;
pub mod naming;

pub use models::*;
pub use naming::is_valid_identifier;
