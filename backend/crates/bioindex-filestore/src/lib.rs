//! # bioindex-filestore
//!
//! Object storage for hydrated record bodies.
//!
//! - **Factory**: builds an `ObjectStore` from `[storage]` settings (local
//!   directory, `memory://`, or `s3://bucket/prefix`)
//! - **Keys**: deterministic `{table}/{row}` object addressing
//! - **Reader**: `ObjectReader` trait used by hydration, and its
//!   `object_store` implementation
//!
//! Nobody except bioindex-filestore depends on the object_store crate.

pub mod core;
pub mod error;
pub mod keys;
pub mod reader;
pub mod test_utils;

pub use crate::core::factory::build_object_store;
pub use error::{FilestoreError, Result};
pub use keys::ObjectKey;
pub use reader::{ObjectReader, ObjectStoreReader};
