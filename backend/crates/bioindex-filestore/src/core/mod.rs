pub mod factory;
pub(crate) mod paths;
