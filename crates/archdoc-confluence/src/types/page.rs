//! Confluence page types.

use serde::Deserialize;

/// Page as returned by the v2 pages API.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Space the page lives in.
    pub space_id: String,
    /// Parent page, absent for space root pages.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Version information.
    pub version: Version,
}

/// Page version.
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
}

/// Result of a v1 content search.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentSearchResponse {
    pub results: Vec<ContentRef>,
}

/// Search hit; only the id is needed.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentRef {
    pub id: String,
}
