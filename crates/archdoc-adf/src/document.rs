//! ADF document root.

use serde::{Deserialize, Serialize};

use crate::node::Node;

/// ADF format version emitted and accepted.
const ADF_VERSION: u32 = 1;

/// Root of an ADF tree: `{version: 1, type: "doc", content: [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawDocument", into = "RawDocument")]
pub struct Document {
    content: Vec<Node>,
}

impl Document {
    /// Empty document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_content(content: Vec<Node>) -> Self {
        Self { content }
    }

    /// Top-level block nodes.
    pub fn content(&self) -> &[Node] {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut Vec<Node> {
        &mut self.content
    }

    pub fn into_content(self) -> Vec<Node> {
        self.content
    }

    pub fn push(&mut self, node: Node) {
        self.content.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.content.extend(nodes);
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Compact JSON form, as sent to Confluence.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a serialized document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Error raised when a JSON document root is not a version 1 `doc`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("unsupported ADF version {0} (expected 1)")]
    UnsupportedVersion(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DocTag {
    Doc,
}

#[derive(Serialize, Deserialize)]
struct RawDocument {
    version: u32,
    #[serde(rename = "type")]
    tag: DocTag,
    content: Vec<Node>,
}

impl TryFrom<RawDocument> for Document {
    type Error = DocumentError;

    fn try_from(raw: RawDocument) -> Result<Self, Self::Error> {
        if raw.version != ADF_VERSION {
            return Err(DocumentError::UnsupportedVersion(raw.version));
        }
        Ok(Self {
            content: raw.content,
        })
    }
}

impl From<Document> for RawDocument {
    fn from(doc: Document) -> Self {
        Self {
            version: ADF_VERSION,
            tag: DocTag::Doc,
            content: doc.content,
        }
    }
}
