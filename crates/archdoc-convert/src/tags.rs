//! Tag classification.
//!
//! Every tag name maps to exactly one [`TagRule`]. The mapper dispatches on
//! the rule, never on raw tag names, so supporting a new tag is one line here.

use archdoc_adf::MarkKind;

/// How an HTML element is translated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagRule {
    Heading(u8),
    Paragraph,
    List { ordered: bool },
    ListItem,
    DescriptionList,
    DescriptionTerm,
    DescriptionDetails,
    Table,
    TableSection,
    TableRow,
    TableCell { header: bool },
    TableCaption,
    Preformatted,
    Mark(MarkKind),
    Link,
    Image,
    LineBreak,
    Rule,
    Blockquote,
    /// Figure caption, rendered as a plain paragraph.
    Caption,
    /// Known wrapper without ADF counterpart; children are mapped in place.
    Transparent,
    /// Unknown tag; flattened with a diagnostic.
    Unknown,
}

impl TagRule {
    pub(crate) fn for_tag(tag: &str) -> Self {
        match tag {
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "p" => Self::Paragraph,
            "ul" | "menu" => Self::List { ordered: false },
            "ol" => Self::List { ordered: true },
            "li" => Self::ListItem,
            "dl" => Self::DescriptionList,
            "dt" => Self::DescriptionTerm,
            "dd" => Self::DescriptionDetails,
            "table" => Self::Table,
            "thead" | "tbody" | "tfoot" => Self::TableSection,
            "tr" => Self::TableRow,
            "th" => Self::TableCell { header: true },
            "td" => Self::TableCell { header: false },
            "caption" => Self::TableCaption,
            "pre" => Self::Preformatted,
            "b" | "strong" => Self::Mark(MarkKind::Strong),
            "i" | "em" | "cite" | "dfn" => Self::Mark(MarkKind::Em),
            "u" | "ins" => Self::Mark(MarkKind::Underline),
            "s" | "strike" | "del" => Self::Mark(MarkKind::Strike),
            "code" | "kbd" | "samp" | "var" | "tt" => Self::Mark(MarkKind::Code),
            "a" => Self::Link,
            "img" => Self::Image,
            "br" => Self::LineBreak,
            "hr" => Self::Rule,
            "blockquote" => Self::Blockquote,
            "figcaption" => Self::Caption,
            "html" | "body" | "div" | "section" | "article" | "main" | "header" | "footer"
            | "nav" | "aside" | "figure" | "span" | "small" | "big" | "mark" | "abbr"
            | "acronym" | "time" | "sub" | "sup" | "q" | "label" | "details" | "summary"
            | "picture" | "source" | "center" | "font" | "address" | "hgroup" | "colgroup"
            | "col" | "wbr" | "bdi" | "bdo" | "data" => Self::Transparent,
            _ => Self::Unknown,
        }
    }
}
