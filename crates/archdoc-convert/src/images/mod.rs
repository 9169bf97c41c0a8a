//! Image reference classification and resolution.
//!
//! `img` sources come in three forms:
//! - `local:diagram:<viewKey>`: a rendered architecture view, fetched from a
//!   [`DiagramArtifactProvider`] and uploaded as a page attachment
//! - `data:` URIs: decoded inline and uploaded as a page attachment
//! - anything else: left as an external media reference
//!
//! Uploads go through the [`UploadCache`](crate::UploadCache) so the same
//! source is attached to a page at most once.

mod data_uri;
mod resolver;

pub use data_uri::{DataUri, DataUriError};
pub use resolver::ResolveError;
pub(crate) use resolver::{ImageFailure, resolve_image};

/// Source prefix marking a locally rendered diagram.
pub const LOCAL_DIAGRAM_SCHEME: &str = "local:diagram:";

/// Error type returned by collaborators.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Rendered diagram bytes and the filename to attach them under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramArtifact {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Source of rendered diagram artifacts, keyed by view key.
pub trait DiagramArtifactProvider {
    fn artifact(&self, view_key: &str) -> Result<DiagramArtifact, CollaboratorError>;
}

impl<F> DiagramArtifactProvider for F
where
    F: Fn(&str) -> Result<DiagramArtifact, CollaboratorError>,
{
    fn artifact(&self, view_key: &str) -> Result<DiagramArtifact, CollaboratorError> {
        self(view_key)
    }
}

/// Attachment store of the target page.
pub trait AttachmentUploader {
    /// Upload `bytes` as `filename` on `page_id`, replacing an existing
    /// attachment with the same name. Returns the media identifier to
    /// reference from the document.
    fn upload_or_replace(
        &self,
        page_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, CollaboratorError>;
}

/// Classified `img` source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageReference {
    /// Remote or relative URL, referenced as-is.
    Remote(String),
    /// View key of a locally rendered diagram.
    LocalDiagram(String),
    /// Decoded `data:` URI payload.
    DataUri(DataUri),
    /// `data:` URI that could not be decoded.
    InvalidDataUri(DataUriError),
}

impl ImageReference {
    pub fn classify(src: &str) -> Self {
        let src = src.trim();
        if let Some(key) = src.strip_prefix(LOCAL_DIAGRAM_SCHEME) {
            return Self::LocalDiagram(key.trim().to_owned());
        }
        if src.len() >= 5 && src.is_char_boundary(5) && src[..5].eq_ignore_ascii_case("data:") {
            return match DataUri::parse(src) {
                Ok(data) => Self::DataUri(data),
                Err(e) => Self::InvalidDataUri(e),
            };
        }
        Self::Remote(src.to_owned())
    }
}
