//! Inline marks applied to text leaves.

use serde::{Deserialize, Serialize};

use crate::node::{AttrValue, Attrs};

/// Mark type. Declaration order is the canonical order of marks on a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkKind {
    Link,
    Strong,
    Em,
    Underline,
    Strike,
    Code,
}

/// Inline formatting annotation: `{type, attrs?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    #[serde(rename = "type")]
    pub kind: MarkKind,
    #[serde(default, skip_serializing_if = "Attrs::is_empty")]
    pub attrs: Attrs,
}

impl Mark {
    /// Mark without attributes.
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
        }
    }

    /// Link mark pointing at `href`.
    pub fn link(href: &str) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("href".to_owned(), AttrValue::from(href));
        Self {
            kind: MarkKind::Link,
            attrs,
        }
    }

    /// Link target, if this is a link mark.
    pub fn href(&self) -> Option<&str> {
        self.attrs.get("href").and_then(AttrValue::as_str)
    }
}
