// BioIndex API Library
//
// REST layer over bioindex-core: handlers, routes, response models, and the
// mapping from query errors to HTTP statuses.

pub mod error;
pub mod handlers;
pub mod models;
pub mod profile;
pub mod routes;

pub use error::ApiError;
pub use routes::configure_routes;
