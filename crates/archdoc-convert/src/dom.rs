//! HTML parsing and normalization.
//!
//! HTML is parsed with html5ever's tree builder, which repairs malformed
//! markup the way browsers do (auto-closing, misnesting, implied `tbody`).
//! The resulting `RcDom` is copied into a small owned tree:
//! - comments, doctypes and processing instructions are dropped
//! - `script`, `style`, `template`, `noscript` and `head` are dropped with
//!   their content
//! - whitespace runs collapse to one space outside `pre`/`textarea`
//! - adjacent text nodes are merged

use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{ParseOpts, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Deepest element nesting accepted before the input is rejected.
pub const MAX_DEPTH: usize = 512;

/// Elements removed together with their content.
const DROPPED_ELEMENTS: &[&str] = &["script", "style", "template", "noscript", "head"];

/// Node of the normalized DOM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomNode {
    Element(Element),
    Text(String),
}

/// Normalized element: lowercase tag name, attributes in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<DomNode>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            ..Self::default()
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whitespace-separated tokens of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            DomNode::Element(el) => Some(el),
            DomNode::Text(_) => None,
        })
    }

    /// Concatenated descendant text, as stored.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                DomNode::Text(text) => out.push_str(text),
                DomNode::Element(el) => el.collect_text(out),
            }
        }
    }
}

/// Unrecoverable input structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("element nesting exceeds {limit} levels")]
    TooDeep { limit: usize },
}

/// Parse `html` into a normalized `body` element.
///
/// Always returns a root for well-formed and malformed input alike; only
/// nesting deeper than [`MAX_DEPTH`] is rejected.
pub fn parse_html(html: &str) -> Result<Element, ParseError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .one(html.as_bytes());

    let mut root = Element::new("body");
    if let Some(body) = find_body(&dom.document) {
        copy_children(&body, 1, false, &mut root.children)?;
    }
    Ok(root)
}

/// The `body` element below the document node (`#document > html > body`).
fn find_body(document: &Handle) -> Option<Handle> {
    for html in document.children.borrow().iter() {
        if !is_element(html, "html") {
            continue;
        }
        for child in html.children.borrow().iter() {
            if is_element(child, "body") {
                return Some(child.clone());
            }
        }
    }
    None
}

fn is_element(handle: &Handle, tag: &str) -> bool {
    matches!(&handle.data, NodeData::Element { name, .. } if name.local.as_ref() == tag)
}

fn copy_children(
    handle: &Handle,
    depth: usize,
    preformatted: bool,
    out: &mut Vec<DomNode>,
) -> Result<(), ParseError> {
    if depth > MAX_DEPTH {
        return Err(ParseError::TooDeep { limit: MAX_DEPTH });
    }
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Text { contents } => {
                let contents = contents.borrow();
                if preformatted {
                    push_text(out, &contents);
                } else {
                    push_text(out, &collapse_whitespace(&contents));
                }
            }
            NodeData::Element { name, attrs, .. } => {
                let tag = name.local.as_ref().to_ascii_lowercase();
                if DROPPED_ELEMENTS.contains(&tag.as_str()) {
                    continue;
                }
                let attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                let pre = preformatted || tag == "pre" || tag == "textarea";
                let mut element = Element {
                    name: tag,
                    attrs,
                    children: Vec::new(),
                };
                copy_children(child, depth + 1, pre, &mut element.children)?;
                out.push(DomNode::Element(element));
            }
            _ => {}
        }
    }
    Ok(())
}

fn push_text(out: &mut Vec<DomNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(DomNode::Text(last)) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(DomNode::Text(text.to_owned()));
    }
}

/// Collapse runs of ASCII whitespace into a single space.
///
/// Non-breaking spaces are content and are kept.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
