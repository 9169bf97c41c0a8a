//! HTML to Atlassian Document Format conversion for archdoc.
//!
//! The conversion pipeline for one page:
//! 1. [`parse_html`]: tolerant HTML parsing into a normalized DOM
//! 2. tag mapping onto the closed ADF node set of [`archdoc_adf`]
//! 3. image resolution: `local:diagram:<key>` and `data:` images are
//!    uploaded once per page through the [`UploadCache`], remote images are
//!    referenced as external media
//! 4. title extraction from the converted headings
//!
//! Collaborators are traits so the converter never talks to the network
//! itself:
//! - [`AttachmentUploader`]: stores attachments on the target page
//! - [`DiagramArtifactProvider`]: supplies rendered diagram bytes by view key
//!
//! Content problems never abort a conversion. They are reported as
//! [`Diagnostic`](archdoc_adf::Diagnostic)s on the [`Conversion`].

mod context;
mod converter;
mod dom;
mod images;
mod inline;
mod mapper;
mod markdown;
mod tags;

pub use context::{CachedAttachment, ConversionContext, UploadCache};
pub use converter::{Conversion, HtmlConverter, title_from_html};
pub use dom::{DomNode, Element, MAX_DEPTH, ParseError, parse_html};
pub use images::{
    AttachmentUploader, CollaboratorError, DataUri, DataUriError, DiagramArtifact,
    DiagramArtifactProvider, ImageReference, LOCAL_DIAGRAM_SCHEME, ResolveError,
};
pub use markdown::markdown_to_html;
