//! Attachment operations for Confluence API.

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use rand::RngExt;
use tracing::{debug, info, warn};

use super::{ConfluenceClient, check_status};
use crate::error::ConfluenceError;
use crate::types::{Attachment, AttachmentsResponse};

impl ConfluenceClient {
    /// Upload or update attachment (upsert by filename).
    ///
    /// The returned attachment carries its Media Services `extensions` when
    /// the server reports them.
    pub fn upload_attachment(
        &self,
        page_id: &str,
        filename: &str,
        data: &[u8],
        content_type: &str,
    ) -> Result<Attachment, ConfluenceError> {
        let existing = self.find_attachment_by_name(page_id, filename)?;

        let url = if let Some(ref att) = existing {
            info!(
                "Updating existing attachment '{}' (id={})",
                filename, att.id
            );
            format!(
                "{}/content/{}/child/attachment/{}/data",
                self.api_url(),
                page_id,
                att.id
            )
        } else {
            info!(
                "Uploading new attachment '{}' to page {}",
                filename, page_id
            );
            format!("{}/content/{}/child/attachment", self.api_url(), page_id)
        };

        let boundary = format!("----ArchdocFormBoundary{:016x}", rand::rng().random::<u64>());
        let body = multipart_body(&boundary, filename, content_type, data);

        let response = self
            .agent
            .post(&url)
            .header("Authorization", &self.auth_header)
            .header(
                "Content-Type",
                &format!("multipart/form-data; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "nocheck")
            .header("Accept", "application/json")
            .send(&body[..])?;

        let mut body_reader = check_status(response)?;

        // Response is a list for new uploads, single object for updates
        let attachment: Attachment = if existing.is_some() {
            body_reader.read_json()?
        } else {
            let response: AttachmentsResponse = body_reader.read_json()?;
            response.results.into_iter().next().ok_or_else(|| {
                ConfluenceError::UnexpectedResponse("empty attachment response".to_owned())
            })?
        };

        if attachment
            .extensions
            .as_ref()
            .is_some_and(|ext| ext.file_id.is_some())
        {
            return Ok(attachment);
        }
        self.with_extensions(attachment)
    }

    /// List attachments on a page, optionally filtered by filename.
    pub fn get_attachments(
        &self,
        page_id: &str,
        filename: Option<&str>,
    ) -> Result<AttachmentsResponse, ConfluenceError> {
        let mut url = format!("{}/content/{}/child/attachment", self.api_url(), page_id);
        if let Some(name) = filename {
            url.push_str("?filename=");
            url.push_str(&utf8_percent_encode(name, NON_ALPHANUMERIC).to_string());
        }

        info!("Getting attachments for page {}", page_id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        Ok(check_status(response)?.read_json()?)
    }

    /// Find attachment by filename on a page.
    fn find_attachment_by_name(
        &self,
        page_id: &str,
        filename: &str,
    ) -> Result<Option<Attachment>, ConfluenceError> {
        let attachments = self.get_attachments(page_id, Some(filename))?;
        Ok(attachments
            .results
            .into_iter()
            .find(|a| a.title == filename))
    }

    /// Re-read an attachment with `expand=extensions` to learn its file id.
    ///
    /// A failed lookup keeps the attachment as uploaded.
    fn with_extensions(&self, attachment: Attachment) -> Result<Attachment, ConfluenceError> {
        let url = format!(
            "{}/content/{}?expand=extensions",
            self.api_url(),
            attachment.id
        );

        debug!("Fetching media file id of attachment {}", attachment.id);

        let response = self
            .agent
            .get(&url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        match check_status(response) {
            Ok(mut body_reader) => Ok(body_reader.read_json()?),
            Err(e) => {
                warn!(
                    "No media file id for attachment {}, using attachment id: {}",
                    attachment.id, e
                );
                Ok(attachment)
            }
        }
    }
}

/// Build a single-file `multipart/form-data` body.
fn multipart_body(boundary: &str, filename: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 256);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(b"Content-Disposition: form-data; name=\"minorEdit\"\r\n\r\ntrue\r\n");

    // End boundary
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
