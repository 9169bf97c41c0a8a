//! Page exporter for Confluence.
//!
//! This module provides the [`PageExporter`] struct that encapsulates the
//! workflow for publishing one HTML page:
//!
//! 1. Choose the page title (hint, else first top-level heading)
//! 2. Find or create the target page to learn its id
//! 3. Convert the HTML, uploading diagrams and embedded images to that page
//! 4. Assemble preamble, converted body and appendix
//! 5. Update the page
//!
//! On top of it, [`PageExporter::export_decisions`] publishes architecture
//! decision records as a page tree, and [`clean_page_tree`] removes a page
//! with everything below it.
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use archdoc_confluence::ConfluenceClient;
//! use archdoc_confluence::exporter::{ExportRequest, ExportSettings, PageExporter};
//! use archdoc_diagrams::DirectoryArtifacts;
//!
//! let client =
//!     ConfluenceClient::new("https://acme.atlassian.net", "me@acme.com", "token", "ARCH");
//! let artifacts = DirectoryArtifacts::new("diagrams");
//! let settings = ExportSettings {
//!     strip_title_heading: true,
//!     parent_page_id: Some("65537".to_owned()),
//! };
//! let mut exporter = PageExporter::new(&client, &client, &artifacts, settings);
//!
//! let request =
//!     ExportRequest::new(r#"<h1>Context</h1><img src="local:diagram:SystemContext">"#);
//! let report = exporter.export(&request)?;
//! assert_eq!(report.title, "Context");
//! # Ok(())
//! # }
//! ```

mod clean;
mod decisions;
mod error;
mod executor;
mod result;
#[cfg(test)]
mod testing;
mod views;

pub use clean::{CleanReport, clean_page_tree, clean_page_tree_by_title};
pub use decisions::{
    DECISIONS_PAGE_TITLE, DecisionsReport, decision_information, decision_page_title,
    decisions_index, related_decisions,
};
pub use error::ExportError;
pub use executor::{ExportRequest, PageExporter};
pub use result::ExportReport;
pub use views::{VIEWS_PAGE_TITLE, views_page_html};

use archdoc_config::ExportConfig;

/// Configuration for exporting pages.
#[derive(Debug, Clone, Default)]
pub struct ExportSettings {
    /// Remove the title heading from the body (Confluence shows the title).
    pub strip_title_heading: bool,
    /// Parent of pages that do not exist yet.
    pub parent_page_id: Option<String>,
}

impl From<&ExportConfig> for ExportSettings {
    fn from(config: &ExportConfig) -> Self {
        Self {
            strip_title_heading: config.strip_title_heading,
            parent_page_id: config.parent_page_id.clone(),
        }
    }
}
