//! bioindex-configs
//!
//! Server configuration types, loader, and the table registry built from the
//! `[[tables]]` section.

pub mod config;
pub mod file_helpers;
pub mod registry;

pub use config::*;
pub use config::defaults;
pub use registry::TableRegistry;
