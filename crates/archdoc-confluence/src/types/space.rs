//! Confluence space types.

use serde::Deserialize;

/// v2 spaces API response.
#[derive(Debug, Clone, Deserialize)]
pub struct SpacesResponse {
    pub results: Vec<Space>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Space {
    pub id: String,
    pub key: String,
}
