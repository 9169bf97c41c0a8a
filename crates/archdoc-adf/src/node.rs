//! ADF nodes.
//!
//! A [`Node`] is one of three shapes, decided by its [`NodeKind`]:
//! - container: ordered child nodes in `content`
//! - text leaf: a `text` string plus optional `marks`
//! - void: neither (`hardBreak`, `rule`, `media`)
//!
//! The shape is held in [`Body`], so a node can never carry both `content`
//! and `text`. Deserialization goes through [`RawNode`] and rejects JSON that
//! breaks the shape rules.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mark::Mark;

/// Node attributes (`attrs` in JSON), ordered for stable output.
pub type Attrs = BTreeMap<String, AttrValue>;

/// Scalar attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value (heading level, list order, colspan).
    Int(i64),
    /// Floating point value (media width).
    Float(f64),
    /// String value.
    Str(String),
}

impl AttrValue {
    /// String value, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer value, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Boolean value, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Closed set of node types produced and accepted by archdoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    Table,
    TableRow,
    /// Header cell (`th`).
    TableHeader,
    TableCell,
    CodeBlock,
    Blockquote,
    Rule,
    MediaSingle,
    Media,
    Text,
    HardBreak,
}

/// Structural shape implied by a [`NodeKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Container,
    Leaf,
    Void,
}

impl NodeKind {
    /// Shape every node of this kind must have.
    pub fn shape(self) -> Shape {
        match self {
            Self::Text => Shape::Leaf,
            Self::Rule | Self::HardBreak | Self::Media => Shape::Void,
            _ => Shape::Container,
        }
    }

    /// Whether nodes of this kind live inside paragraphs and headings.
    pub fn is_inline(self) -> bool {
        matches!(self, Self::Text | Self::HardBreak)
    }

    /// JSON type name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BulletList => "bulletList",
            Self::OrderedList => "orderedList",
            Self::ListItem => "listItem",
            Self::Table => "table",
            Self::TableRow => "tableRow",
            Self::TableHeader => "tableHeader",
            Self::TableCell => "tableCell",
            Self::CodeBlock => "codeBlock",
            Self::Blockquote => "blockquote",
            Self::Rule => "rule",
            Self::MediaSingle => "mediaSingle",
            Self::Media => "media",
            Self::Text => "text",
            Self::HardBreak => "hardBreak",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of a node, one variant per [`Shape`].
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Child nodes of a container.
    Content(Vec<Node>),
    /// Text leaf with its marks.
    Text { text: String, marks: Vec<Mark> },
    /// No payload.
    Void,
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawNode", into = "RawNode")]
pub struct Node {
    kind: NodeKind,
    attrs: Attrs,
    body: Body,
}

impl Node {
    /// Container node with the given children.
    ///
    /// Non-container kinds get the body their shape requires, so the
    /// children are discarded for them.
    pub fn container(kind: NodeKind, content: Vec<Node>) -> Self {
        let body = match kind.shape() {
            Shape::Container => Body::Content(content),
            Shape::Leaf => Body::Text {
                text: String::new(),
                marks: Vec::new(),
            },
            Shape::Void => Body::Void,
        };
        Self {
            kind,
            attrs: Attrs::new(),
            body,
        }
    }

    /// Plain text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::text_with_marks(text, Vec::new())
    }

    /// Text leaf carrying marks.
    pub fn text_with_marks(text: impl Into<String>, marks: Vec<Mark>) -> Self {
        Self {
            kind: NodeKind::Text,
            attrs: Attrs::new(),
            body: Body::Text {
                text: text.into(),
                marks,
            },
        }
    }

    /// Set an attribute, returning the node.
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.to_owned(), value.into());
        self
    }

    pub fn paragraph(content: Vec<Node>) -> Self {
        Self::container(NodeKind::Paragraph, content)
    }

    /// Heading, level clamped to 1..=6.
    pub fn heading(level: u8, content: Vec<Node>) -> Self {
        Self::container(NodeKind::Heading, content).with_attr("level", u32::from(level.clamp(1, 6)))
    }

    pub fn bullet_list(items: Vec<Node>) -> Self {
        Self::container(NodeKind::BulletList, items)
    }

    pub fn ordered_list(order: u32, items: Vec<Node>) -> Self {
        Self::container(NodeKind::OrderedList, items).with_attr("order", order)
    }

    pub fn list_item(content: Vec<Node>) -> Self {
        Self::container(NodeKind::ListItem, content)
    }

    /// Table with default ADF layout attributes.
    pub fn table(rows: Vec<Node>) -> Self {
        Self::container(NodeKind::Table, rows)
            .with_attr("isNumberColumnEnabled", false)
            .with_attr("layout", "default")
    }

    pub fn table_row(cells: Vec<Node>) -> Self {
        Self::container(NodeKind::TableRow, cells)
    }

    pub fn table_cell(content: Vec<Node>) -> Self {
        Self::container(NodeKind::TableCell, content)
    }

    pub fn table_header(content: Vec<Node>) -> Self {
        Self::container(NodeKind::TableHeader, content)
    }

    /// Code block holding `code` verbatim.
    pub fn code_block(language: Option<&str>, code: &str) -> Self {
        let content = if code.is_empty() {
            Vec::new()
        } else {
            vec![Self::text(code)]
        };
        let node = Self::container(NodeKind::CodeBlock, content);
        match language {
            Some(lang) if !lang.is_empty() => node.with_attr("language", lang),
            _ => node,
        }
    }

    pub fn blockquote(content: Vec<Node>) -> Self {
        Self::container(NodeKind::Blockquote, content)
    }

    pub fn rule() -> Self {
        Self::container(NodeKind::Rule, Vec::new())
    }

    pub fn hard_break() -> Self {
        Self::container(NodeKind::HardBreak, Vec::new())
    }

    /// Block wrapper around a single media node.
    pub fn media_single(media: Node) -> Self {
        Self::container(NodeKind::MediaSingle, vec![media]).with_attr("layout", "center")
    }

    /// Media stored as a page attachment.
    pub fn file_media(id: &str, collection: &str, alt: Option<&str>) -> Self {
        let node = Self::container(NodeKind::Media, Vec::new())
            .with_attr("type", "file")
            .with_attr("id", id)
            .with_attr("collection", collection);
        with_alt(node, alt)
    }

    /// Media referenced by URL.
    pub fn external_media(url: &str, alt: Option<&str>) -> Self {
        let node = Self::container(NodeKind::Media, Vec::new())
            .with_attr("type", "external")
            .with_attr("url", url);
        with_alt(node, alt)
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Children, empty for leaves and void nodes.
    pub fn content(&self) -> &[Node] {
        match &self.body {
            Body::Content(nodes) => nodes,
            _ => &[],
        }
    }

    /// Mutable children, `None` for leaves and void nodes.
    pub fn content_mut(&mut self) -> Option<&mut Vec<Node>> {
        match &mut self.body {
            Body::Content(nodes) => Some(nodes),
            _ => None,
        }
    }

    /// Consume the node, returning its children.
    pub fn into_content(self) -> Vec<Node> {
        match self.body {
            Body::Content(nodes) => nodes,
            _ => Vec::new(),
        }
    }

    pub fn text_value(&self) -> Option<&str> {
        match &self.body {
            Body::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Mutable text, `None` unless this is a text leaf.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.body {
            Body::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn marks(&self) -> &[Mark] {
        match &self.body {
            Body::Text { marks, .. } => marks,
            _ => &[],
        }
    }

    /// Heading level, if this is a heading.
    pub fn heading_level(&self) -> Option<u8> {
        if self.kind != NodeKind::Heading {
            return None;
        }
        self.attr("level")
            .and_then(AttrValue::as_i64)
            .and_then(|level| u8::try_from(level).ok())
    }

    /// Concatenated text of all descendant text leaves.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match &self.body {
            Body::Text { text, .. } => out.push_str(text),
            Body::Content(nodes) => nodes.iter().for_each(|n| n.collect_text(out)),
            Body::Void => {}
        }
    }
}

fn with_alt(node: Node, alt: Option<&str>) -> Node {
    match alt {
        Some(alt) if !alt.is_empty() => node.with_attr("alt", alt),
        _ => node,
    }
}

/// Violation of the node shape rules found while deserializing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeShapeError {
    #[error("`{0}` node requires `content`")]
    MissingContent(NodeKind),

    #[error("`{0}` node requires `text`")]
    MissingText(NodeKind),

    #[error("`{0}` node cannot carry `content`")]
    UnexpectedContent(NodeKind),

    #[error("`{0}` node cannot carry `text`")]
    UnexpectedText(NodeKind),

    #[error("`{0}` node cannot carry `marks`")]
    UnexpectedMarks(NodeKind),
}

/// JSON form of a node: `{type, attrs?, content?, text?, marks?}`.
#[derive(Serialize, Deserialize)]
struct RawNode {
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    attrs: Attrs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    marks: Vec<Mark>,
}

impl TryFrom<RawNode> for Node {
    type Error = NodeShapeError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let kind = raw.kind;
        if !raw.marks.is_empty() && kind.shape() != Shape::Leaf {
            return Err(NodeShapeError::UnexpectedMarks(kind));
        }
        let body = match (kind.shape(), raw.content, raw.text) {
            (Shape::Container, Some(content), None) => Body::Content(content),
            (Shape::Leaf, None, Some(text)) => Body::Text {
                text,
                marks: raw.marks,
            },
            (Shape::Void, None, None) => Body::Void,
            (Shape::Container, None, None) => return Err(NodeShapeError::MissingContent(kind)),
            (Shape::Leaf, None, None) => return Err(NodeShapeError::MissingText(kind)),
            (Shape::Leaf | Shape::Void, Some(_), _) => {
                return Err(NodeShapeError::UnexpectedContent(kind));
            }
            (_, _, Some(_)) => return Err(NodeShapeError::UnexpectedText(kind)),
        };
        Ok(Self {
            kind,
            attrs: raw.attrs,
            body,
        })
    }
}

impl From<Node> for RawNode {
    fn from(node: Node) -> Self {
        let (content, text, marks) = match node.body {
            Body::Content(content) => (Some(content), None, Vec::new()),
            Body::Text { text, marks } => (None, Some(text), marks),
            Body::Void => (None, None, Vec::new()),
        };
        Self {
            kind: node.kind,
            attrs: node.attrs,
            content,
            text,
            marks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mark::MarkKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_text_node_json() {
        let node = Node::text_with_marks("bold", vec![Mark::new(MarkKind::Strong)]);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({"type": "text", "text": "bold", "marks": [{"type": "strong"}]})
        );
    }

    #[test]
    fn test_container_json_omits_empty_fields() {
        let node = Node::paragraph(vec![Node::text("hi")]);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({"type": "paragraph", "content": [{"type": "text", "text": "hi"}]})
        );
    }

    #[test]
    fn test_void_node_json() {
        let value = serde_json::to_value(Node::hard_break()).unwrap();
        assert_eq!(value, json!({"type": "hardBreak"}));
    }

    #[test]
    fn test_heading_level_attr() {
        let node = Node::heading(3, vec![Node::text("x")]);
        assert_eq!(node.heading_level(), Some(3));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["attrs"], json!({"level": 3}));
    }

    #[test]
    fn test_heading_level_clamped() {
        assert_eq!(Node::heading(9, Vec::new()).heading_level(), Some(6));
        assert_eq!(Node::heading(0, Vec::new()).heading_level(), Some(1));
    }

    #[test]
    fn test_deserialize_rejects_content_and_text() {
        let value = json!({"type": "paragraph", "content": [], "text": "x"});
        let err = serde_json::from_value::<Node>(value).unwrap_err();
        assert!(err.to_string().contains("cannot carry `text`"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_text_without_text() {
        let value = json!({"type": "text"});
        let err = serde_json::from_value::<Node>(value).unwrap_err();
        assert!(err.to_string().contains("requires `text`"), "{err}");
    }

    #[test]
    fn test_deserialize_rejects_marks_on_container() {
        let value = json!({"type": "paragraph", "content": [], "marks": [{"type": "em"}]});
        assert!(serde_json::from_value::<Node>(value).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_type() {
        let value = json!({"type": "extension", "content": []});
        assert!(serde_json::from_value::<Node>(value).is_err());
    }

    #[test]
    fn test_deserialize_media_attrs() {
        let value = json!({
            "type": "media",
            "attrs": {"type": "file", "id": "att1", "collection": "contentId-1", "width": 640.5}
        });
        let node: Node = serde_json::from_value(value).unwrap();
        assert_eq!(node.kind(), NodeKind::Media);
        assert_eq!(node.attr("id").and_then(AttrValue::as_str), Some("att1"));
        assert_eq!(node.attr("width"), Some(&AttrValue::Float(640.5)));
        assert_eq!(node.body(), &Body::Void);
    }

    #[test]
    fn test_container_constructor_respects_shape() {
        let node = Node::container(NodeKind::Rule, vec![Node::text("ignored")]);
        assert_eq!(node.body(), &Body::Void);
        assert!(node.content().is_empty());
    }

    #[test]
    fn test_plain_text_collects_descendants() {
        let node = Node::bullet_list(vec![
            Node::list_item(vec![Node::paragraph(vec![Node::text("a")])]),
            Node::list_item(vec![Node::paragraph(vec![
                Node::text("b"),
                Node::hard_break(),
                Node::text("c"),
            ])]),
        ]);
        assert_eq!(node.plain_text(), "abc");
    }

    #[test]
    fn test_code_block_empty_has_no_text_child() {
        let node = Node::code_block(Some("rust"), "");
        assert!(node.content().is_empty());
        assert_eq!(node.attr("language").and_then(AttrValue::as_str), Some("rust"));
    }
}
