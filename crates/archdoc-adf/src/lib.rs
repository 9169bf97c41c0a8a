//! Atlassian Document Format (ADF) model for archdoc.
//!
//! This crate defines the strict node tree that Confluence Cloud accepts as
//! page body (`atlas_doc_format` representation):
//! - [`Document`]: root with fixed `version = 1` and `type = "doc"`
//! - [`Node`]: container, text leaf or void node, with a closed [`NodeKind`] set
//! - [`Mark`]: inline formatting applied to text leaves
//!
//! It also hosts the pure document-level operations of the export pipeline:
//! - [`extract_title`]: first heading at the lowest level present
//! - [`DocumentAssembler`]: concatenation of partial documents
//! - [`Diagnostic`]: degradation record shared by conversion and assembly
//!
//! # Example
//!
//! ```
//! use archdoc_adf::{Document, Node, extract_title};
//!
//! let doc = Document::from_content(vec![
//!     Node::heading(1, vec![Node::text("Architecture")]),
//!     Node::paragraph(vec![Node::text("Overview")]),
//! ]);
//!
//! assert_eq!(extract_title(doc.content()), "Architecture");
//! let json = doc.to_json().unwrap();
//! assert!(json.starts_with(r#"{"version":1,"type":"doc""#));
//! ```

mod assemble;
mod diagnostic;
mod document;
mod mark;
mod node;
mod title;

pub use assemble::{Assembled, DocumentAssembler, PartialDocument, assemble};
pub use diagnostic::{Diagnostic, Severity};
pub use document::{Document, DocumentError};
pub use mark::{Mark, MarkKind};
pub use node::{AttrValue, Attrs, Body, Node, NodeKind, NodeShapeError, Shape};
pub use title::{extract_title, remove_title_heading};
