use archdoc_adf::Node;
use tracing::debug;

use super::{CollaboratorError, DataUri, DataUriError, ImageReference};
use crate::context::{CachedAttachment, ConversionContext};

/// Reason an image could not be turned into media.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("empty diagram view key")]
    EmptyViewKey,

    #[error("diagram artifact for '{key}' unavailable: {source}")]
    Artifact {
        key: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("upload of '{filename}' failed: {source}")]
    Upload {
        filename: String,
        #[source]
        source: CollaboratorError,
    },

    #[error(transparent)]
    DataUri(#[from] DataUriError),
}

/// Failed resolution with the key shown in the placeholder.
#[derive(Debug)]
pub(crate) struct ImageFailure {
    pub key: String,
    pub error: ResolveError,
}

impl ImageFailure {
    /// Text standing in for the image.
    pub fn placeholder(&self) -> String {
        format!("[image: {}] (upload failed)", self.key)
    }
}

/// Resolve an `img` source to a `mediaSingle` node.
pub(crate) fn resolve_image(
    ctx: &mut ConversionContext<'_>,
    src: &str,
    alt: Option<&str>,
) -> Result<Node, ImageFailure> {
    match ImageReference::classify(src) {
        ImageReference::Remote(url) => {
            debug!("Keeping external image {}", url);
            Ok(Node::media_single(Node::external_media(&url, alt)))
        }
        ImageReference::LocalDiagram(key) => {
            resolve_diagram(ctx, &key, alt).map_err(|error| ImageFailure {
                key: if key.is_empty() { src.trim().to_owned() } else { key },
                error,
            })
        }
        ImageReference::InvalidDataUri(e) => Err(ImageFailure {
            key: "data URI".to_owned(),
            error: e.into(),
        }),
        ImageReference::DataUri(data) => {
            let filename = data.filename();
            resolve_inline(ctx, &data, &filename, alt).map_err(|error| ImageFailure {
                key: filename,
                error,
            })
        }
    }
}

fn resolve_diagram(
    ctx: &mut ConversionContext<'_>,
    key: &str,
    alt: Option<&str>,
) -> Result<Node, ResolveError> {
    if key.is_empty() {
        return Err(ResolveError::EmptyViewKey);
    }
    let source_key = format!("diagram:{key}");
    if let Some(hit) = ctx.cached(&source_key) {
        debug!("Diagram {} already attached to page {}", key, ctx.page_id());
        return Ok(file_media(ctx, &hit.clone(), alt));
    }

    let artifact = ctx
        .artifacts()
        .artifact(key)
        .map_err(|source| ResolveError::Artifact {
            key: key.to_owned(),
            source,
        })?;
    let attachment = ctx.upload(&source_key, &artifact.filename, &artifact.bytes)?;
    Ok(file_media(ctx, &attachment, alt))
}

fn resolve_inline(
    ctx: &mut ConversionContext<'_>,
    data: &DataUri,
    filename: &str,
    alt: Option<&str>,
) -> Result<Node, ResolveError> {
    let source_key = format!("sha256:{}", data.content_hash());
    if let Some(hit) = ctx.cached(&source_key) {
        debug!("Inline image {} already attached to page {}", filename, ctx.page_id());
        return Ok(file_media(ctx, &hit.clone(), alt));
    }
    let attachment = ctx.upload(&source_key, filename, &data.bytes)?;
    Ok(file_media(ctx, &attachment, alt))
}

fn file_media(
    ctx: &ConversionContext<'_>,
    attachment: &CachedAttachment,
    alt: Option<&str>,
) -> Node {
    Node::media_single(Node::file_media(
        &attachment.id,
        &ctx.media_collection(),
        alt,
    ))
}
