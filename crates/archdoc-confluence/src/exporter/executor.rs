//! Page exporter implementation.

use archdoc_adf::{Diagnostic, Document, DocumentAssembler, PartialDocument};
use archdoc_convert::{
    AttachmentUploader, ConversionContext, DiagramArtifactProvider, HtmlConverter, UploadCache,
    parse_html, title_from_html,
};
use tracing::{error, info, warn};

use crate::publisher::PagePublisher;

use super::ExportSettings;
use super::error::ExportError;
use super::result::ExportReport;

/// One page to publish.
#[derive(Debug, Clone, Default)]
pub struct ExportRequest {
    /// Page body.
    pub html: String,
    /// Title to publish under; the first heading is used when absent.
    pub title: Option<String>,
    /// Parent for a newly created page, overriding the exporter setting.
    pub parent_id: Option<String>,
    /// Parts placed before the converted body.
    pub preamble: Vec<PartialDocument>,
    /// Parts placed after the converted body.
    pub appendix: Vec<PartialDocument>,
}

impl ExportRequest {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent_id: Option<String>) -> Self {
        self.parent_id = parent_id;
        self
    }

    #[must_use]
    pub fn prepend(mut self, part: impl Into<PartialDocument>) -> Self {
        self.preamble.push(part.into());
        self
    }

    #[must_use]
    pub fn append(mut self, part: impl Into<PartialDocument>) -> Self {
        self.appendix.push(part.into());
        self
    }

    /// Title hint if it has visible text, else the page's own title.
    fn resolve_title(&self) -> Option<PageTitle> {
        if let Some(hint) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            return Some(PageTitle::Hint(hint.to_owned()));
        }
        Some(title_from_html(&self.html))
            .filter(|t| !t.is_empty())
            .map(PageTitle::Heading)
    }
}

/// Where the published title came from.
enum PageTitle {
    Hint(String),
    /// Text of the page's title heading.
    Heading(String),
}

impl PageTitle {
    fn into_parts(self) -> (String, bool) {
        match self {
            Self::Hint(title) => (title, false),
            Self::Heading(title) => (title, true),
        }
    }
}

/// Publishes HTML pages to Confluence.
///
/// The exporter owns the upload cache, so exporting the same page twice in
/// one run uploads each diagram once.
pub struct PageExporter<'a> {
    publisher: &'a dyn PagePublisher,
    uploader: &'a dyn AttachmentUploader,
    artifacts: &'a dyn DiagramArtifactProvider,
    settings: ExportSettings,
    cache: UploadCache,
}

impl<'a> PageExporter<'a> {
    /// Create a new page exporter.
    #[must_use]
    pub fn new(
        publisher: &'a dyn PagePublisher,
        uploader: &'a dyn AttachmentUploader,
        artifacts: &'a dyn DiagramArtifactProvider,
        settings: ExportSettings,
    ) -> Self {
        Self {
            publisher,
            uploader,
            artifacts,
            settings,
            cache: UploadCache::new(),
        }
    }

    /// Attachments uploaded so far, per page and source.
    pub fn cache(&self) -> &UploadCache {
        &self.cache
    }

    pub(super) fn publisher(&self) -> &'a dyn PagePublisher {
        self.publisher
    }

    pub(super) fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Publish one page.
    ///
    /// Content problems (unknown tags, unresolvable images, malformed
    /// partial documents) are reported in [`ExportReport::diagnostics`] and
    /// do not stop the export.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the HTML is rejected by the parser (no page is created or changed)
    /// - no title can be determined
    /// - Confluence API calls for the page itself fail
    pub fn export(&mut self, request: &ExportRequest) -> Result<ExportReport, ExportError> {
        if let Err(e) = parse_html(&request.html) {
            error!("Not exporting page: {}", e);
            return Err(ExportError::Parse(e.to_string()));
        }
        let (title, from_heading) = request
            .resolve_title()
            .ok_or(ExportError::MissingTitle)?
            .into_parts();

        // Resolve the target page first: uploads need its id
        let (page_id, created) = match self.publisher.find_page_by_title(&title)? {
            Some(page_id) => {
                info!("Exporting '{}' to existing page {}", title, page_id);
                (page_id, false)
            }
            None => {
                let parent = request
                    .parent_id
                    .as_deref()
                    .or(self.settings.parent_page_id.as_deref());
                let page_id = self.publisher.create_or_update_page(
                    &title,
                    &Document::new(),
                    parent,
                )?;
                info!("Created page '{}' ({})", title, page_id);
                (page_id, true)
            }
        };

        // A hinted title leaves the page's own heading in the body
        let converter = HtmlConverter::new()
            .strip_title_heading(self.settings.strip_title_heading && from_heading);
        let mut ctx =
            ConversionContext::new(&page_id, &mut self.cache, self.uploader, self.artifacts);
        let conversion = converter.convert(&request.html, &mut ctx);
        let uploads = ctx.uploads();

        if let Some(fatal) = conversion.diagnostics.iter().find(|d| d.is_fatal()) {
            return Err(ExportError::Parse(fatal.to_string()));
        }

        let mut assembler = DocumentAssembler::new();
        for part in &request.preamble {
            assembler.append(part.clone());
        }
        assembler.append(conversion.document);
        for part in &request.appendix {
            assembler.append(part.clone());
        }
        let assembled = assembler.finish();

        let mut diagnostics: Vec<Diagnostic> = conversion.diagnostics;
        diagnostics.extend(assembled.diagnostics);
        if !diagnostics.is_empty() {
            warn!(
                "Page '{}' published with {} diagnostic(s)",
                title,
                diagnostics.len()
            );
        }

        self.publisher
            .update_page_by_id(&page_id, &title, &assembled.document)?;
        info!(
            "Exported '{}' to page {} ({} upload(s))",
            title, page_id, uploads
        );

        Ok(ExportReport {
            page_id,
            title,
            created,
            uploads,
            diagnostics,
        })
    }
}
