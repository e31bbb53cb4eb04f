pub mod defaults;
mod loader;
pub mod tables;
pub mod types;

pub use tables::{GroupConfig, MembershipConfig, TableConfig};
pub use types::*;
