//! Confluence Cloud publishing for archdoc.
//!
//! This crate connects the converter to a Confluence Cloud site:
//! - [`ConfluenceClient`]: REST client with Basic (API token) authentication
//! - [`PagePublisher`]: page operations the exporter needs, implemented by the client
//! - [`PageExporter`](exporter::PageExporter): HTML to published page workflow
//! - [`decisions`]: architecture decision records read from an adr-tools directory
//!
//! The client also implements [`archdoc_convert::AttachmentUploader`], so it
//! can be handed to a [`archdoc_convert::ConversionContext`] directly.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use archdoc_confluence::ConfluenceClient;
//! use archdoc_confluence::exporter::{ExportRequest, ExportSettings, PageExporter};
//! use archdoc_diagrams::DirectoryArtifacts;
//!
//! let client = ConfluenceClient::new(
//!     "https://acme.atlassian.net/wiki",
//!     "architect@acme.com",
//!     "api-token",
//!     "ARCH",
//! );
//! let artifacts = DirectoryArtifacts::new("diagrams");
//! let mut exporter = PageExporter::new(&client, &client, &artifacts, ExportSettings::default());
//!
//! let report = exporter.export(&ExportRequest::new("<h1>Overview</h1><p>Text</p>"))?;
//! println!("Published '{}' as page {}", report.title, report.page_id);
//! # Ok(())
//! # }
//! ```

// API client
mod client;
pub use client::ConfluenceClient;

mod mime;
pub use mime::content_type_for;

mod publisher;
pub use publisher::PagePublisher;

// Types (internal, exposed via client results)
mod types;
pub use types::{Attachment, AttachmentExtensions, PageInfo, Version};

// Export workflow
pub mod decisions;
pub mod exporter;

// Errors
pub mod error;
pub use error::ConfluenceError;
