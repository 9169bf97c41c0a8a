//! Page operations for Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::json;
use tracing::{debug, info};

use super::{ConfluenceClient, check_status};
use crate::error::ConfluenceError;
use crate::types::{ContentSearchResponse, PageInfo, SpacesResponse};

/// Children fetched per page tree level.
const CHILD_PAGE_LIMIT: u32 = 200;

impl ConfluenceClient {
    /// Find a page of the configured space by exact title.
    pub fn find_page_id_by_title(&self, title: &str) -> Result<Option<String>, ConfluenceError> {
        let url = format!(
            "{}/content?type=page&title={}&spaceKey={}",
            self.api_url(),
            utf8_percent_encode(title, NON_ALPHANUMERIC),
            utf8_percent_encode(&self.space_key, NON_ALPHANUMERIC)
        );

        info!("Searching page '{}' in space {}", title, self.space_key);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        let search: ContentSearchResponse = check_status(response)?.read_json()?;
        Ok(search.results.into_iter().next().map(|page| page.id))
    }

    /// Get page metadata by ID.
    pub fn get_page(&self, page_id: &str) -> Result<PageInfo, ConfluenceError> {
        let url = format!("{}/pages/{}", self.api_v2_url(), page_id);

        info!("Getting page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        Ok(check_status(response)?.read_json()?)
    }

    /// Create a page in the configured space.
    ///
    /// `adf_json` is the serialized ADF document.
    pub fn create_page(
        &self,
        title: &str,
        adf_json: &str,
        parent_id: Option<&str>,
    ) -> Result<PageInfo, ConfluenceError> {
        let url = format!("{}/pages", self.api_v2_url());

        let mut payload = json!({
            "spaceId": self.space_id()?,
            "status": "current",
            "title": title,
            "body": {
                "representation": "atlas_doc_format",
                "value": adf_json
            }
        });
        if let Some(parent) = parent_id {
            payload["parentId"] = json!(parent);
        }

        info!("Creating page '{}' in space {}", title, self.space_key);

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: PageInfo = check_status(response)?.read_json()?;
        info!("Created page '{}' (id={})", page.title, page.id);
        Ok(page)
    }

    /// Replace title and body of an existing page (auto-increments version).
    ///
    /// The page keeps its space and parent.
    pub fn update_page(
        &self,
        page_id: &str,
        title: &str,
        adf_json: &str,
    ) -> Result<PageInfo, ConfluenceError> {
        let current = self.get_page(page_id)?;
        let url = format!("{}/pages/{}", self.api_v2_url(), page_id);

        let mut payload = json!({
            "id": page_id,
            "status": "current",
            "title": title,
            "spaceId": current.space_id,
            "version": {"number": current.version.number + 1},
            "body": {
                "representation": "atlas_doc_format",
                "value": adf_json
            }
        });
        if let Some(parent) = &current.parent_id {
            payload["parentId"] = json!(parent);
        }

        info!(
            "Updating page {} from version {} to {}",
            page_id,
            current.version.number,
            current.version.number + 1
        );

        let payload_bytes = serde_json::to_vec(&payload)?;

        let response = self
            .agent
            .put(&url)
            .header("Authorization", &self.auth_header)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .send(&payload_bytes[..])?;

        let page: PageInfo = check_status(response)?.read_json()?;
        info!("Updated page {} to version {}", page_id, page.version.number);
        Ok(page)
    }

    /// Ids of the direct children of a page.
    ///
    /// Reads a single result page of up to 200 children.
    pub fn child_page_ids(&self, page_id: &str) -> Result<Vec<String>, ConfluenceError> {
        let url = format!(
            "{}/content/{}/child/page?limit={}",
            self.api_url(),
            page_id,
            CHILD_PAGE_LIMIT
        );

        debug!("Listing child pages of {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let children: ContentSearchResponse = check_status(response)?.read_json()?;
        Ok(children.results.into_iter().map(|page| page.id).collect())
    }

    /// Move a page to the trash.
    pub fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
        let url = format!("{}/pages/{}", self.api_v2_url(), page_id);

        info!("Deleting page {}", page_id);

        let response = self
            .agent
            .delete(&url)
            .header("Authorization", &self.auth_header)
            .call()?;

        check_status(response)?;
        Ok(())
    }

    /// Numeric id of the configured space, resolved once per client.
    pub fn space_id(&self) -> Result<String, ConfluenceError> {
        if let Some(id) = self.space_id.get() {
            return Ok(id.clone());
        }

        let url = format!(
            "{}/spaces?keys={}",
            self.api_v2_url(),
            utf8_percent_encode(&self.space_key, NON_ALPHANUMERIC)
        );

        info!("Resolving space {}", self.space_key);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        let spaces: SpacesResponse = check_status(response)?.read_json()?;
        let id = spaces
            .results
            .into_iter()
            .find(|space| space.key.eq_ignore_ascii_case(&self.space_key))
            .map(|space| space.id)
            .ok_or_else(|| ConfluenceError::SpaceNotFound(self.space_key.clone()))?;

        debug!("Space {} has id {}", self.space_key, id);
        Ok(self.space_id.get_or_init(|| id).clone())
    }
}
