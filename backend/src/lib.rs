//! BioIndex Server Library
//!
//! Exposes the server wiring (bootstrap, middleware, logging) for
//! integration testing.

pub mod lifecycle;
pub mod logging;
pub mod middleware;
