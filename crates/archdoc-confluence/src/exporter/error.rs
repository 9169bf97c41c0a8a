//! Error types for page export operations.

use crate::error::ConfluenceError;

/// Error during page export operation.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Neither a title hint nor a heading to take the title from.
    #[error("page has no title: pass one explicitly or start the page with a heading")]
    MissingTitle,

    /// The HTML was rejected; the page was left untouched.
    #[error("HTML rejected: {0}")]
    Parse(String),

    /// Confluence API error.
    #[error("Confluence API error: {0}")]
    Confluence(#[from] ConfluenceError),
}
