//! Result types for page export operations.

use archdoc_adf::Diagnostic;

/// Result of a successful page export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Id of the published page.
    pub page_id: String,
    /// Title the page was published with.
    pub title: String,
    /// Whether the page had to be created.
    pub created: bool,
    /// Attachments uploaded by this export (cache hits excluded).
    pub uploads: usize,
    /// Degradations from conversion and assembly, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl ExportReport {
    /// Published without any degradation.
    pub fn is_faithful(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
