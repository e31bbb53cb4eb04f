//! Response models for the BioIndex API.

mod profile;
mod responses;

pub use profile::Profile;
pub use responses::{
    HealthResponse, IndexesResponse, KeysResponse, ListResponse, QueryParams, QueryResponse,
};
