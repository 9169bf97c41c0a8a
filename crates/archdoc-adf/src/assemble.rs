//! Assembly of partial documents into one export unit.
//!
//! A page is often built from several pieces: a generated metadata block,
//! the converted body, a related-items block. [`DocumentAssembler`]
//! concatenates their top-level content in call order. Serialized parts are
//! parsed first; a part that does not parse is skipped and reported, and the
//! document accumulated so far is kept.

use tracing::warn;

use crate::diagnostic::Diagnostic;
use crate::document::Document;

/// One piece of a page.
#[derive(Debug, Clone)]
pub enum PartialDocument {
    /// Already-typed document.
    Typed(Document),
    /// Serialized ADF JSON, parsed during assembly.
    Serialized(String),
}

impl From<Document> for PartialDocument {
    fn from(doc: Document) -> Self {
        Self::Typed(doc)
    }
}

impl From<String> for PartialDocument {
    fn from(json: String) -> Self {
        Self::Serialized(json)
    }
}

impl From<&str> for PartialDocument {
    fn from(json: &str) -> Self {
        Self::Serialized(json.to_owned())
    }
}

/// Result of assembling partial documents.
#[derive(Debug, Clone, Default)]
pub struct Assembled {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

/// Incremental document assembler.
#[derive(Debug, Default)]
pub struct DocumentAssembler {
    document: Document,
    diagnostics: Vec<Diagnostic>,
    parts: usize,
}

impl DocumentAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing base document.
    pub fn with_base(base: Document) -> Self {
        Self {
            document: base,
            diagnostics: Vec::new(),
            parts: 1,
        }
    }

    /// Append the top-level content of `part`.
    ///
    /// No schema validation happens here: nesting rules are the producer's
    /// responsibility.
    pub fn append(&mut self, part: impl Into<PartialDocument>) -> &mut Self {
        let index = self.parts;
        self.parts += 1;
        match part.into() {
            PartialDocument::Typed(doc) => self.document.extend(doc.into_content()),
            PartialDocument::Serialized(json) => match Document::from_json(&json) {
                Ok(doc) => self.document.extend(doc.into_content()),
                Err(e) => {
                    warn!(
                        "Partial document #{} does not parse, keeping {} accumulated node(s): {}",
                        index,
                        self.document.content().len(),
                        e
                    );
                    self.diagnostics.push(Diagnostic::MergeFailure {
                        part: index,
                        reason: e.to_string(),
                    });
                }
            },
        }
        self
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn finish(self) -> Assembled {
        Assembled {
            document: self.document,
            diagnostics: self.diagnostics,
        }
    }
}

/// Assemble `parts` in order into one document.
pub fn assemble<I, P>(parts: I) -> Assembled
where
    I: IntoIterator<Item = P>,
    P: Into<PartialDocument>,
{
    let mut assembler = DocumentAssembler::new();
    for part in parts {
        assembler.append(part);
    }
    assembler.finish()
}
