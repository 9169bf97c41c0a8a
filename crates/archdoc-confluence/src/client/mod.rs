//! Confluence Cloud REST API client.
//!
//! Provides a sync HTTP client for the Confluence Cloud REST APIs with
//! Basic authentication (account email plus API token). Page bodies use the
//! v2 pages API; search and attachments use the v1 content API.

mod attachments;
mod pages;

use std::sync::OnceLock;
use std::time::Duration;

use archdoc_config::ConfluenceConfig;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use ureq::Agent;
use ureq::http::Response;

use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
    space_key: String,
    /// Resolved lazily from `space_key` on first page creation.
    space_id: OnceLock<String>,
}

impl ConfluenceClient {
    /// Create a client for `space_key` on the site at `base_url`.
    ///
    /// `base_url` may be given with or without the `/wiki` context path.
    pub fn new(base_url: &str, username: &str, api_token: &str, space_key: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: normalize_base_url(base_url),
            auth_header: basic_auth(username, api_token),
            space_key: space_key.to_owned(),
            space_id: OnceLock::new(),
        }
    }

    /// Create client from the `[confluence]` config section.
    pub fn from_config(config: &ConfluenceConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.username,
            &config.api_token,
            &config.space_key,
        )
    }

    /// Site URL without trailing slash or `/wiki`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn space_key(&self) -> &str {
        &self.space_key
    }

    /// Browser URL of a page.
    pub fn page_url(&self, page_id: &str) -> String {
        format!("{}/wiki/pages/viewpage.action?pageId={}", self.base_url, page_id)
    }

    /// v1 REST API base URL.
    fn api_url(&self) -> String {
        format!("{}/wiki/rest/api", self.base_url)
    }

    /// v2 REST API base URL.
    fn api_v2_url(&self) -> String {
        format!("{}/wiki/api/v2", self.base_url)
    }
}

/// Turn an error status into [`ConfluenceError::HttpResponse`].
fn check_status(response: Response<ureq::Body>) -> Result<ureq::Body, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::HttpResponse {
            status,
            body: error_body,
        });
    }

    Ok(body_reader)
}

fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    trimmed
        .strip_suffix("/wiki")
        .unwrap_or(trimmed)
        .trim_end_matches('/')
        .to_owned()
}

fn basic_auth(username: &str, api_token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{api_token}")))
}
