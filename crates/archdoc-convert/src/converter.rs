//! HTML to ADF conversion entry point.

use archdoc_adf::{Diagnostic, Document, extract_title, remove_title_heading};
use tracing::{debug, error, warn};

use crate::context::ConversionContext;
use crate::dom::{Element, collapse_whitespace, parse_html};
use crate::mapper::map_document;
use crate::tags::TagRule;

/// Outcome of converting one page.
///
/// Conversion always yields a document. A [`Diagnostic::ParseFailure`]
/// means the document is empty because the input was rejected; other
/// diagnostics describe content that was flattened, dropped or replaced.
#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub document: Document,
    /// Title extracted from the converted headings, empty if none.
    pub title: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Conversion {
    /// No content was degraded.
    pub fn is_faithful(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The input was rejected and the document is empty.
    pub fn parse_failed(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// Extracted title, or `fallback` when the page has no heading.
    pub fn page_title<'s>(&'s self, fallback: Option<&'s str>) -> Option<&'s str> {
        if self.title.is_empty() {
            fallback.map(str::trim).filter(|t| !t.is_empty())
        } else {
            Some(&self.title)
        }
    }
}

/// Converts HTML pages to ADF documents.
///
/// # Example
///
/// ```
/// use archdoc_convert::{
///     AttachmentUploader, CollaboratorError, ConversionContext, DiagramArtifact, HtmlConverter,
///     UploadCache,
/// };
///
/// struct Offline;
///
/// impl AttachmentUploader for Offline {
///     fn upload_or_replace(
///         &self,
///         _: &str,
///         _: &str,
///         _: &[u8],
///     ) -> Result<String, CollaboratorError> {
///         Err("offline".into())
///     }
/// }
///
/// let artifacts = |_: &str| -> Result<DiagramArtifact, CollaboratorError> { Err("none".into()) };
/// let mut cache = UploadCache::new();
/// let mut ctx = ConversionContext::new("123", &mut cache, &Offline, &artifacts);
///
/// let conversion = HtmlConverter::new().convert("<h1>Hello</h1><p>World</p>", &mut ctx);
/// assert_eq!(conversion.title, "Hello");
/// assert_eq!(conversion.document.content().len(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlConverter {
    strip_title_heading: bool,
}

impl HtmlConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the title heading from the body when it is a top-level node.
    ///
    /// Confluence shows the page title above the body, so keeping the
    /// heading renders it twice.
    #[must_use]
    pub fn strip_title_heading(mut self, enabled: bool) -> Self {
        self.strip_title_heading = enabled;
        self
    }

    /// Convert one page.
    ///
    /// Images are resolved through `ctx`; its cache decides which sources
    /// are uploaded.
    pub fn convert(&self, html: &str, ctx: &mut ConversionContext<'_>) -> Conversion {
        debug!(
            "Converting {} bytes of HTML for page {}",
            html.len(),
            ctx.page_id()
        );
        let root = match parse_html(html) {
            Ok(root) => root,
            Err(e) => {
                error!("Cannot convert page {}: {}", ctx.page_id(), e);
                return Conversion {
                    document: Document::new(),
                    title: String::new(),
                    diagnostics: vec![Diagnostic::ParseFailure {
                        reason: e.to_string(),
                    }],
                };
            }
        };

        let (content, diagnostics) = map_document(&root, ctx);
        let mut document = Document::from_content(content);
        let title = extract_title(document.content());
        if self.strip_title_heading && remove_title_heading(&mut document).is_some() {
            debug!("Removed title heading '{}' from body", title);
        }

        if !diagnostics.is_empty() {
            warn!(
                "Page {} converted with {} diagnostic(s)",
                ctx.page_id(),
                diagnostics.len()
            );
        }
        Conversion {
            document,
            title,
            diagnostics,
        }
    }
}

/// Title of an HTML page without converting it.
///
/// Uses the same rule as conversion: the first non-empty heading at the
/// lowest level present, text trimmed. Returns an empty string when there
/// is no such heading or the input is rejected.
pub fn title_from_html(html: &str) -> String {
    let Ok(root) = parse_html(html) else {
        return String::new();
    };
    let mut best: Option<(u8, String)> = None;
    find_heading(&root, &mut best);
    best.map(|(_, title)| title).unwrap_or_default()
}

fn find_heading(el: &Element, best: &mut Option<(u8, String)>) {
    for child in el.child_elements() {
        let TagRule::Heading(level) = TagRule::for_tag(&child.name) else {
            find_heading(child, best);
            continue;
        };
        if best.as_ref().is_some_and(|(best_level, _)| *best_level <= level) {
            continue;
        }
        let text = collapse_whitespace(&child.text_content()).trim().to_owned();
        if !text.is_empty() {
            *best = Some((level, text));
        }
    }
}
