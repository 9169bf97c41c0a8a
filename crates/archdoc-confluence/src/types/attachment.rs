//! Confluence attachment types.

use serde::Deserialize;

/// Confluence attachment.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Attachment {
    /// Attachment ID.
    pub id: String,
    /// Attachment title/filename.
    pub title: String,
    /// Media Services identifiers, present when requested with `expand=extensions`.
    #[serde(default)]
    pub extensions: Option<AttachmentExtensions>,
}

impl Attachment {
    /// Identifier ADF `media` nodes refer to.
    ///
    /// Confluence renders file media by Media Services file id; the
    /// attachment id is the fallback when the server does not report one.
    pub fn media_id(&self) -> &str {
        self.extensions
            .as_ref()
            .and_then(|ext| ext.file_id.as_deref())
            .filter(|id| !id.is_empty())
            .unwrap_or(&self.id)
    }
}

/// Attachment `extensions` block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentExtensions {
    #[serde(default)]
    pub file_id: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
}

/// Attachments API response.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsResponse {
    /// List of attachments.
    pub results: Vec<Attachment>,
}
