//! Collaborator seams between the exporter and Confluence.

use archdoc_adf::Document;
use archdoc_convert::{AttachmentUploader, CollaboratorError};
use tracing::debug;

use crate::client::ConfluenceClient;
use crate::error::ConfluenceError;
use crate::mime::content_type_for;

/// Page operations used by [`PageExporter`](crate::exporter::PageExporter).
pub trait PagePublisher {
    /// Id of the page titled `title`, if one exists.
    fn find_page_by_title(&self, title: &str) -> Result<Option<String>, ConfluenceError>;

    /// Update the page titled `title`, or create it under `parent_id`.
    ///
    /// Returns the page id.
    fn create_or_update_page(
        &self,
        title: &str,
        body: &Document,
        parent_id: Option<&str>,
    ) -> Result<String, ConfluenceError>;

    /// Replace title and body of the page `page_id`.
    fn update_page_by_id(
        &self,
        page_id: &str,
        title: &str,
        body: &Document,
    ) -> Result<(), ConfluenceError>;

    /// Ids of the direct children of `page_id`.
    fn child_page_ids(&self, page_id: &str) -> Result<Vec<String>, ConfluenceError>;

    /// Delete the page `page_id`.
    fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError>;
}

impl PagePublisher for ConfluenceClient {
    fn find_page_by_title(&self, title: &str) -> Result<Option<String>, ConfluenceError> {
        self.find_page_id_by_title(title)
    }

    fn create_or_update_page(
        &self,
        title: &str,
        body: &Document,
        parent_id: Option<&str>,
    ) -> Result<String, ConfluenceError> {
        let adf_json = body.to_json()?;
        match self.find_page_id_by_title(title)? {
            Some(page_id) => {
                debug!("Page '{}' exists as {}", title, page_id);
                self.update_page(&page_id, title, &adf_json)?;
                Ok(page_id)
            }
            None => Ok(self.create_page(title, &adf_json, parent_id)?.id),
        }
    }

    fn update_page_by_id(
        &self,
        page_id: &str,
        title: &str,
        body: &Document,
    ) -> Result<(), ConfluenceError> {
        self.update_page(page_id, title, &body.to_json()?)?;
        Ok(())
    }

    fn child_page_ids(&self, page_id: &str) -> Result<Vec<String>, ConfluenceError> {
        ConfluenceClient::child_page_ids(self, page_id)
    }

    fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
        ConfluenceClient::delete_page(self, page_id)
    }
}

impl AttachmentUploader for ConfluenceClient {
    fn upload_or_replace(
        &self,
        page_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, CollaboratorError> {
        let attachment =
            self.upload_attachment(page_id, filename, bytes, content_type_for(filename))?;
        Ok(attachment.media_id().to_owned())
    }
}
