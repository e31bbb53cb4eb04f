use serde::{Deserialize, Serialize};

/// Elapsed seconds of each phase of a request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Relational query time
    pub query: f64,
    /// Object fetch time; only for hydrated queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<f64>,
}

impl Profile {
    pub fn query(secs: f64) -> Self {
        Self {
            query: secs,
            fetch: None,
        }
    }

    pub fn with_fetch(mut self, secs: f64) -> Self {
        self.fetch = Some(secs);
        self
    }
}
