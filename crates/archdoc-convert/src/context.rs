//! Per-page conversion state and the attachment upload cache.

use std::collections::HashMap;

use tracing::info;

use crate::images::{AttachmentUploader, DiagramArtifactProvider, ResolveError};

/// Attachment known to exist on a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAttachment {
    /// Media identifier returned by the uploader.
    pub id: String,
    pub filename: String,
}

/// Attachments uploaded so far, keyed by page and source.
///
/// Source keys are `diagram:<viewKey>` for rendered views and
/// `sha256:<hex>` for inline payloads. Only successful uploads are stored.
/// Keep one cache alive across all pages of an export run.
#[derive(Debug, Default)]
pub struct UploadCache {
    pages: HashMap<String, HashMap<String, CachedAttachment>>,
}

impl UploadCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, page_id: &str, source_key: &str) -> Option<&CachedAttachment> {
        self.pages.get(page_id)?.get(source_key)
    }

    pub fn insert(&mut self, page_id: &str, source_key: &str, attachment: CachedAttachment) {
        self.pages
            .entry(page_id.to_owned())
            .or_default()
            .insert(source_key.to_owned(), attachment);
    }

    /// Forget every attachment of `page_id`, returning how many were dropped.
    pub fn invalidate_page(&mut self, page_id: &str) -> usize {
        self.pages.remove(page_id).map_or(0, |entries| entries.len())
    }

    /// Total cached attachments across pages.
    pub fn len(&self) -> usize {
        self.pages.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.pages.clear();
    }
}

/// Everything one page conversion needs besides the HTML.
pub struct ConversionContext<'a> {
    page_id: String,
    cache: &'a mut UploadCache,
    uploader: &'a dyn AttachmentUploader,
    artifacts: &'a dyn DiagramArtifactProvider,
    uploads: usize,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        page_id: impl Into<String>,
        cache: &'a mut UploadCache,
        uploader: &'a dyn AttachmentUploader,
        artifacts: &'a dyn DiagramArtifactProvider,
    ) -> Self {
        Self {
            page_id: page_id.into(),
            cache,
            uploader,
            artifacts,
            uploads: 0,
        }
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Uploads performed through this context (cache hits excluded).
    pub fn uploads(&self) -> usize {
        self.uploads
    }

    /// Media collection of attachments on this page.
    pub(crate) fn media_collection(&self) -> String {
        format!("contentId-{}", self.page_id)
    }

    pub(crate) fn cached(&self, source_key: &str) -> Option<&CachedAttachment> {
        self.cache.get(&self.page_id, source_key)
    }

    pub(crate) fn artifacts(&self) -> &'a dyn DiagramArtifactProvider {
        self.artifacts
    }

    /// Upload `bytes` and remember the attachment under `source_key`.
    pub(crate) fn upload(
        &mut self,
        source_key: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<CachedAttachment, ResolveError> {
        info!(
            "Uploading attachment '{}' ({} bytes) to page {}",
            filename,
            bytes.len(),
            self.page_id
        );
        let id = self
            .uploader
            .upload_or_replace(&self.page_id, filename, bytes)
            .map_err(|source| ResolveError::Upload {
                filename: filename.to_owned(),
                source,
            })?;
        let attachment = CachedAttachment {
            id,
            filename: filename.to_owned(),
        };
        self.cache
            .insert(&self.page_id, source_key, attachment.clone());
        self.uploads += 1;
        Ok(attachment)
    }
}
