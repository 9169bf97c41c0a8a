//! Mapping of the normalized DOM onto ADF nodes.
//!
//! Each element is dispatched on its [`TagRule`]. Inline content is produced
//! with the active marks applied; block containers then group inline runs
//! into paragraphs, hoisting blocks that appeared in inline context.

use archdoc_adf::{Diagnostic, Mark, MarkKind, Node, NodeKind};
use tracing::{debug, warn};

use crate::context::ConversionContext;
use crate::dom::{DomNode, Element};
use crate::images::resolve_image;
use crate::inline::{Marks, merge_text_runs, split_inline, wrap_blocks};
use crate::tags::TagRule;

/// Map the children of `root` to top-level block nodes.
pub(crate) fn map_document(
    root: &Element,
    ctx: &mut ConversionContext<'_>,
) -> (Vec<Node>, Vec<Diagnostic>) {
    let mut mapper = Mapper {
        ctx,
        diagnostics: Vec::new(),
    };
    let nodes = mapper.children(root, &Marks::default());
    (wrap_blocks(nodes), mapper.diagnostics)
}

struct Mapper<'c, 'a> {
    ctx: &'c mut ConversionContext<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl Mapper<'_, '_> {
    fn children(&mut self, el: &Element, marks: &Marks) -> Vec<Node> {
        let mut out = Vec::new();
        for child in &el.children {
            out.extend(self.node(child, marks));
        }
        out
    }

    fn node(&mut self, node: &DomNode, marks: &Marks) -> Vec<Node> {
        match node {
            DomNode::Text(text) if text.is_empty() => Vec::new(),
            DomNode::Text(text) => vec![Node::text_with_marks(text.clone(), marks.for_text())],
            DomNode::Element(el) => self.element(el, marks),
        }
    }

    fn element(&mut self, el: &Element, marks: &Marks) -> Vec<Node> {
        match TagRule::for_tag(&el.name) {
            TagRule::Heading(level) => {
                split_inline(self.children(el, marks), |inline| Node::heading(level, inline))
            }
            TagRule::Paragraph | TagRule::Caption => {
                split_inline(self.children(el, marks), Node::paragraph)
            }
            TagRule::List { ordered } => self.list(el, ordered, marks),
            TagRule::ListItem => vec![self.list_item(el, marks)],
            TagRule::DescriptionList => self.description_list(el, marks),
            TagRule::Table => self.table(el, marks),
            TagRule::Preformatted => vec![code_block(el)],
            TagRule::Mark(kind) => self.children(el, &marks.with(Mark::new(kind))),
            TagRule::Link => self.link(el, marks),
            TagRule::Image => self.image(el),
            TagRule::LineBreak => vec![Node::hard_break()],
            TagRule::Rule => vec![Node::rule()],
            TagRule::Blockquote => {
                let blocks = wrap_blocks(self.children(el, marks));
                let blocks = self.fit_blocks(NodeKind::Blockquote, blocks);
                if blocks.is_empty() {
                    Vec::new()
                } else {
                    vec![Node::blockquote(blocks)]
                }
            }
            TagRule::Transparent
            | TagRule::TableSection
            | TagRule::TableRow
            | TagRule::TableCell { .. }
            | TagRule::TableCaption
            | TagRule::DescriptionTerm
            | TagRule::DescriptionDetails => self.children(el, marks),
            TagRule::Unknown => {
                debug!("Flattening unknown tag <{}>", el.name);
                self.warn(&el.name, "unknown tag flattened");
                self.children(el, marks)
            }
        }
    }

    fn warn(&mut self, tag: &str, message: &str) {
        self.diagnostics.push(Diagnostic::MappingWarning {
            tag: tag.to_owned(),
            message: message.to_owned(),
        });
    }

    fn list(&mut self, el: &Element, ordered: bool, marks: &Marks) -> Vec<Node> {
        let mut items = Vec::new();
        let mut loose = Vec::new();
        for child in &el.children {
            match child {
                DomNode::Element(li) if li.name == "li" => {
                    self.flush_loose(&mut loose, &mut items);
                    items.push(self.list_item(li, marks));
                }
                other => loose.extend(self.node(other, marks)),
            }
        }
        self.flush_loose(&mut loose, &mut items);

        if items.is_empty() {
            return Vec::new();
        }
        if !ordered {
            return vec![Node::bullet_list(items)];
        }
        let order = match el.attr("start").map(str::trim) {
            None => 1,
            Some(start) => start.parse::<u32>().unwrap_or_else(|_| {
                self.warn("ol", &format!("invalid start '{start}' ignored"));
                1
            }),
        };
        vec![Node::ordered_list(order, items)]
    }

    fn list_item(&mut self, li: &Element, marks: &Marks) -> Node {
        let blocks = wrap_blocks(self.children(li, marks));
        Node::list_item(item_content(self.fit_blocks(NodeKind::ListItem, blocks)))
    }

    /// Content found between `li` elements joins the previous item, or
    /// becomes an item of its own at the start of the list.
    fn flush_loose(&mut self, loose: &mut Vec<Node>, items: &mut Vec<Node>) {
        let blocks = wrap_blocks(std::mem::take(loose));
        let blocks = self.fit_blocks(NodeKind::ListItem, blocks);
        if blocks.is_empty() {
            return;
        }
        match items.last_mut().and_then(Node::content_mut) {
            Some(content) => content.extend(blocks),
            None => items.push(Node::list_item(item_content(blocks))),
        }
    }

    /// `dt` becomes a bold item, `dd` a plain item.
    fn description_list(&mut self, el: &Element, marks: &Marks) -> Vec<Node> {
        let mut items = Vec::new();
        self.description_items(el, marks, &mut items);
        if items.is_empty() {
            Vec::new()
        } else {
            vec![Node::bullet_list(items)]
        }
    }

    fn description_items(&mut self, el: &Element, marks: &Marks, items: &mut Vec<Node>) {
        for child in el.child_elements() {
            match TagRule::for_tag(&child.name) {
                TagRule::DescriptionTerm => {
                    let term = self.children(child, &marks.with(Mark::new(MarkKind::Strong)));
                    let blocks = self.fit_blocks(NodeKind::ListItem, wrap_blocks(term));
                    items.push(Node::list_item(item_content(blocks)));
                }
                TagRule::DescriptionDetails => items.push(self.list_item(child, marks)),
                TagRule::Transparent => self.description_items(child, marks, items),
                _ => {}
            }
        }
    }

    fn table(&mut self, el: &Element, marks: &Marks) -> Vec<Node> {
        let mut rows = Vec::new();
        let mut out = Vec::new();
        self.collect_rows(el, marks, &mut rows, &mut out);
        if rows.is_empty() {
            self.warn("table", "table without rows dropped");
        } else {
            out.push(Node::table(rows));
        }
        out
    }

    /// Rows through `thead`/`tbody`/`tfoot` in document order; captions go
    /// to `captions` as paragraphs.
    fn collect_rows(
        &mut self,
        el: &Element,
        marks: &Marks,
        rows: &mut Vec<Node>,
        captions: &mut Vec<Node>,
    ) {
        for child in el.child_elements() {
            match TagRule::for_tag(&child.name) {
                TagRule::TableSection => self.collect_rows(child, marks, rows, captions),
                TagRule::TableRow => {
                    if let Some(row) = self.row(child, marks) {
                        rows.push(row);
                    }
                }
                TagRule::TableCaption => {
                    captions.extend(split_inline(self.children(child, marks), Node::paragraph));
                }
                _ => {}
            }
        }
    }

    fn row(&mut self, tr: &Element, marks: &Marks) -> Option<Node> {
        let mut cells = Vec::new();
        for cell in tr.child_elements() {
            if let TagRule::TableCell { header } = TagRule::for_tag(&cell.name) {
                cells.push(self.cell(cell, header, marks));
            }
        }
        (!cells.is_empty()).then(|| Node::table_row(cells))
    }

    fn cell(&mut self, cell: &Element, header: bool, marks: &Marks) -> Node {
        let kind = if header {
            NodeKind::TableHeader
        } else {
            NodeKind::TableCell
        };
        let blocks = wrap_blocks(self.children(cell, marks));
        let mut blocks = self.fit_blocks(kind, blocks);
        if blocks.is_empty() {
            blocks.push(Node::paragraph(Vec::new()));
        }
        let mut node = Node::container(kind, blocks);
        for attr in ["colspan", "rowspan"] {
            let span = cell.attr(attr).and_then(|v| v.trim().parse::<u32>().ok());
            if let Some(span) = span.filter(|&n| n > 1) {
                node = node.with_attr(attr, span);
            }
        }
        node
    }

    fn link(&mut self, el: &Element, marks: &Marks) -> Vec<Node> {
        let href = el.attr("href").map(str::trim).unwrap_or_default();
        if href.is_empty() {
            return self.children(el, marks);
        }
        if has_scheme(href, "javascript:") {
            self.warn("a", "javascript: link dropped");
            return self.children(el, marks);
        }
        let marks = marks.with(Mark::link(href));
        let nodes = self.children(el, &marks);
        if nodes.iter().all(|n| n.text_value().is_some_and(|t| t.trim().is_empty())) {
            // Links without visible text show their target.
            let mut visible: Vec<Node> = nodes
                .into_iter()
                .filter(|n| n.text_value().is_none())
                .collect();
            visible.push(Node::text_with_marks(href, marks.for_text()));
            return visible;
        }
        nodes
    }

    /// Keep the blocks `container` accepts and flatten the rest.
    ///
    /// Headings become bold paragraphs, tables become one paragraph per
    /// row, blockquotes are unwrapped and rules are dropped. Each rewritten
    /// block is reported as a mapping warning.
    fn fit_blocks(&mut self, container: NodeKind, blocks: Vec<Node>) -> Vec<Node> {
        let mut out = Vec::with_capacity(blocks.len());
        for block in blocks {
            let kind = block.kind();
            if accepts(container, kind) {
                out.push(block);
                continue;
            }
            debug!("Flattening {kind} inside {container}");
            match kind {
                NodeKind::Heading => {
                    self.warn(kind.as_str(), &format!("heading inside {container} made bold"));
                    out.push(strong_paragraph(block));
                }
                NodeKind::Table => {
                    self.warn(kind.as_str(), &format!("table inside {container} flattened"));
                    out.extend(table_rows_as_text(&block));
                }
                NodeKind::Blockquote => {
                    self.warn(kind.as_str(), &format!("blockquote inside {container} unwrapped"));
                    let inner = self.fit_blocks(container, block.into_content());
                    out.extend(inner);
                }
                _ => self.warn(kind.as_str(), &format!("{kind} inside {container} dropped")),
            }
        }
        out
    }

    fn image(&mut self, el: &Element) -> Vec<Node> {
        let src = el.attr("src").map(str::trim).unwrap_or_default();
        if src.is_empty() {
            self.warn("img", "image without src dropped");
            return Vec::new();
        }
        let alt = el
            .attr("alt")
            .or_else(|| el.attr("title"))
            .map(str::trim)
            .filter(|a| !a.is_empty());

        match resolve_image(self.ctx, src, alt) {
            Ok(node) => vec![node],
            Err(failure) => {
                warn!("Image '{}' not resolved: {}", failure.key, failure.error);
                let placeholder = failure.placeholder();
                self.diagnostics.push(Diagnostic::ImageResolutionFailure {
                    key: failure.key,
                    reason: failure.error.to_string(),
                });
                vec![Node::text(placeholder)]
            }
        }
    }
}

/// Block children Confluence accepts inside `container`.
fn accepts(container: NodeKind, child: NodeKind) -> bool {
    match container {
        NodeKind::TableCell | NodeKind::TableHeader => child != NodeKind::Table,
        NodeKind::ListItem | NodeKind::Blockquote => matches!(
            child,
            NodeKind::Paragraph
                | NodeKind::BulletList
                | NodeKind::OrderedList
                | NodeKind::CodeBlock
                | NodeKind::MediaSingle
        ),
        _ => true,
    }
}

/// Paragraph with the heading's inline content, text made bold.
fn strong_paragraph(heading: Node) -> Node {
    let content = heading
        .into_content()
        .into_iter()
        .map(|node| {
            if node
                .marks()
                .iter()
                .any(|m| matches!(m.kind, MarkKind::Strong | MarkKind::Code))
            {
                return node;
            }
            let Some(text) = node.text_value() else {
                return node;
            };
            let mut marks = node.marks().to_vec();
            marks.push(Mark::new(MarkKind::Strong));
            marks.sort_by_key(|m| m.kind);
            Node::text_with_marks(text, marks)
        })
        .collect();
    Node::paragraph(merge_text_runs(content))
}

/// One paragraph per non-empty row, cell texts separated by ` | `.
fn table_rows_as_text(table: &Node) -> Vec<Node> {
    table
        .content()
        .iter()
        .filter_map(|row| {
            let cells: Vec<String> = row.content().iter().map(cell_text).collect();
            if cells.iter().all(String::is_empty) {
                return None;
            }
            Some(Node::paragraph(vec![Node::text(cells.join(" | "))]))
        })
        .collect()
}

fn cell_text(cell: &Node) -> String {
    let blocks: Vec<String> = cell
        .content()
        .iter()
        .map(|block| block.plain_text().trim().to_owned())
        .filter(|text| !text.is_empty())
        .collect();
    blocks.join(" ")
}

/// List item content: never empty, and starting with a paragraph when the
/// first block is a nested list.
fn item_content(mut blocks: Vec<Node>) -> Vec<Node> {
    let starts_with_list = blocks
        .first()
        .is_some_and(|n| matches!(n.kind(), NodeKind::BulletList | NodeKind::OrderedList));
    if blocks.is_empty() || starts_with_list {
        blocks.insert(0, Node::paragraph(Vec::new()));
    }
    blocks
}

fn code_block(pre: &Element) -> Node {
    let language = pre
        .child_elements()
        .find(|c| c.name == "code")
        .and_then(language_of)
        .or_else(|| language_of(pre));
    let mut text = String::new();
    preformatted_text(pre, &mut text);
    Node::code_block(language.as_deref(), text.trim_end_matches('\n'))
}

/// Text of a `pre` element with `br` elements read as line breaks.
fn preformatted_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            DomNode::Text(text) => out.push_str(text),
            DomNode::Element(br) if br.name == "br" => out.push('\n'),
            DomNode::Element(inner) => preformatted_text(inner, out),
        }
    }
}

/// Language from `data-lang`, then a `language-x` or `lang-x` class.
fn language_of(el: &Element) -> Option<String> {
    if let Some(lang) = el.attr("data-lang").map(str::trim).filter(|l| !l.is_empty()) {
        return Some(lang.to_owned());
    }
    el.classes()
        .find_map(|c| c.strip_prefix("language-").or_else(|| c.strip_prefix("lang-")))
        .filter(|l| !l.is_empty())
        .map(str::to_owned)
}

fn has_scheme(href: &str, scheme: &str) -> bool {
    href.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::UploadCache;
    use crate::dom::parse_html;
    use crate::images::{AttachmentUploader, CollaboratorError, DiagramArtifact};
    use pretty_assertions::assert_eq;

    struct NoUploads;

    impl AttachmentUploader for NoUploads {
        fn upload_or_replace(
            &self,
            _: &str,
            filename: &str,
            _: &[u8],
        ) -> Result<String, CollaboratorError> {
            Err(format!("uploads disabled for {filename}").into())
        }
    }

    fn no_artifacts(key: &str) -> Result<DiagramArtifact, CollaboratorError> {
        Err(format!("no artifact {key}").into())
    }

    fn map(html: &str) -> (Vec<Node>, Vec<Diagnostic>) {
        let root = parse_html(html).unwrap();
        let mut cache = UploadCache::new();
        let mut ctx = ConversionContext::new("42", &mut cache, &NoUploads, &no_artifacts);
        map_document(&root, &mut ctx)
    }

    fn nodes(html: &str) -> Vec<Node> {
        map(html).0
    }

    fn t(text: &str) -> Node {
        Node::text(text)
    }

    fn p(text: &str) -> Node {
        Node::paragraph(vec![t(text)])
    }

    #[test]
    fn test_heading_and_paragraph() {
        assert_eq!(
            nodes("<h2>Title</h2><p>Body</p>"),
            vec![Node::heading(2, vec![t("Title")]), p("Body")]
        );
    }

    #[test]
    fn test_nested_marks() {
        assert_eq!(
            nodes("<p><b>bold <i>both</i></b></p>"),
            vec![Node::paragraph(vec![
                Node::text_with_marks("bold ", vec![Mark::new(MarkKind::Strong)]),
                Node::text_with_marks(
                    "both",
                    vec![Mark::new(MarkKind::Strong), Mark::new(MarkKind::Em)]
                ),
            ])]
        );
    }

    #[test]
    fn test_bare_text_wrapped_in_paragraph() {
        assert_eq!(nodes("just text"), vec![p("just text")]);
    }

    #[test]
    fn test_block_inside_inline_hoisted() {
        assert_eq!(
            nodes("<p>before<span><hr></span>after</p>"),
            vec![p("before"), Node::rule(), p("after")]
        );
    }

    #[test]
    fn test_unordered_list() {
        assert_eq!(
            nodes("<ul><li>one</li><li>two</li></ul>"),
            vec![Node::bullet_list(vec![
                Node::list_item(vec![p("one")]),
                Node::list_item(vec![p("two")]),
            ])]
        );
    }

    #[test]
    fn test_ordered_list_start() {
        assert_eq!(
            nodes(r#"<ol start="3"><li>c</li></ol>"#),
            vec![Node::ordered_list(3, vec![Node::list_item(vec![p("c")])])]
        );
    }

    #[test]
    fn test_ordered_list_bad_start_warns() {
        let (nodes, diagnostics) = map(r#"<ol start="x"><li>a</li></ol>"#);
        assert_eq!(nodes, vec![Node::ordered_list(1, vec![Node::list_item(vec![p("a")])])]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_list_dropped() {
        assert_eq!(nodes("<ul></ul><p>x</p>"), vec![p("x")]);
    }

    #[test]
    fn test_empty_list_item_gets_paragraph() {
        assert_eq!(
            nodes("<ul><li></li></ul>"),
            vec![Node::bullet_list(vec![Node::list_item(vec![Node::paragraph(vec![])])])]
        );
    }

    #[test]
    fn test_nested_list() {
        assert_eq!(
            nodes("<ul><li>a<ul><li>b</li></ul></li></ul>"),
            vec![Node::bullet_list(vec![Node::list_item(vec![
                p("a"),
                Node::bullet_list(vec![Node::list_item(vec![p("b")])]),
            ])])]
        );
    }

    #[test]
    fn test_description_list() {
        assert_eq!(
            nodes("<dl><dt>Term</dt><dd>Meaning</dd></dl>"),
            vec![Node::bullet_list(vec![
                Node::list_item(vec![Node::paragraph(vec![Node::text_with_marks(
                    "Term",
                    vec![Mark::new(MarkKind::Strong)]
                )])]),
                Node::list_item(vec![p("Meaning")]),
            ])]
        );
    }

    #[test]
    fn test_table_header_cells() {
        assert_eq!(
            nodes("<table><tr><th>A</th></tr><tr><td>1</td></tr></table>"),
            vec![Node::table(vec![
                Node::table_row(vec![Node::table_header(vec![p("A")])]),
                Node::table_row(vec![Node::table_cell(vec![p("1")])]),
            ])]
        );
    }

    #[test]
    fn test_table_caption_and_spans() {
        assert_eq!(
            nodes(r#"<table><caption>Cap</caption><tr><td colspan="2"></td></tr></table>"#),
            vec![
                p("Cap"),
                Node::table(vec![Node::table_row(vec![
                    Node::table_cell(vec![Node::paragraph(vec![])]).with_attr("colspan", 2u32)
                ])]),
            ]
        );
    }

    #[test]
    fn test_code_block_language() {
        assert_eq!(
            nodes("<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"),
            vec![Node::code_block(Some("rust"), "fn main() {}")]
        );
        assert_eq!(
            nodes("<pre data-lang=\"java\">  indented\n    more</pre>"),
            vec![Node::code_block(Some("java"), "  indented\n    more")]
        );
    }

    #[test]
    fn test_inline_code_drops_other_marks() {
        assert_eq!(
            nodes("<p><b><code>x</code></b></p>"),
            vec![Node::paragraph(vec![Node::text_with_marks(
                "x",
                vec![Mark::new(MarkKind::Code)]
            )])]
        );
    }

    #[test]
    fn test_link() {
        assert_eq!(
            nodes(r#"<p><a href="https://example.com">site</a></p>"#),
            vec![Node::paragraph(vec![Node::text_with_marks(
                "site",
                vec![Mark::link("https://example.com")]
            )])]
        );
    }

    #[test]
    fn test_empty_link_shows_href() {
        assert_eq!(
            nodes(r#"<p><a href="https://example.com"></a></p>"#),
            vec![Node::paragraph(vec![Node::text_with_marks(
                "https://example.com",
                vec![Mark::link("https://example.com")]
            )])]
        );
    }

    #[test]
    fn test_link_without_href_flattened() {
        assert_eq!(nodes("<p><a name=\"x\">anchor</a></p>"), vec![p("anchor")]);
    }

    #[test]
    fn test_javascript_link_dropped_with_warning() {
        let (nodes, diagnostics) = map(r#"<p><a href="JavaScript:alert(1)">x</a></p>"#);
        assert_eq!(nodes, vec![p("x")]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(
            nodes("<blockquote>quoted</blockquote>"),
            vec![Node::blockquote(vec![p("quoted")])]
        );
        assert!(nodes("<blockquote> </blockquote>").is_empty());
    }

    #[test]
    fn test_hard_break() {
        assert_eq!(
            nodes("<p>a<br>b</p>"),
            vec![Node::paragraph(vec![t("a"), Node::hard_break(), t("b")])]
        );
    }

    #[test]
    fn test_unknown_tag_flattened_with_warning() {
        let (nodes, diagnostics) = map("<p><marquee>moving</marquee></p>");
        assert_eq!(nodes, vec![p("moving")]);
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MappingWarning {
                tag: "marquee".to_owned(),
                message: "unknown tag flattened".to_owned(),
            }]
        );
    }

    #[test]
    fn test_remote_image() {
        let (nodes, diagnostics) = map(r#"<img src="https://x/a.png" alt="A">"#);
        assert!(diagnostics.is_empty());
        assert_eq!(
            nodes,
            vec![Node::media_single(Node::external_media("https://x/a.png", Some("A")))]
        );
    }

    #[test]
    fn test_image_without_src_dropped() {
        let (nodes, diagnostics) = map(r#"<p>x<img alt="A"></p>"#);
        assert_eq!(nodes, vec![p("x")]);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_failed_diagram_becomes_placeholder() {
        let (nodes, diagnostics) = map(r#"<p><img src="local:diagram:Context"></p>"#);
        assert_eq!(nodes, vec![p("[image: Context] (upload failed)")]);
        assert!(matches!(
            &diagnostics[..],
            [Diagnostic::ImageResolutionFailure { key, .. }] if key == "Context"
        ));
    }

    fn strong(text: &str) -> Node {
        Node::text_with_marks(text, vec![Mark::new(MarkKind::Strong)])
    }

    #[test]
    fn test_code_block_line_breaks() {
        assert_eq!(
            nodes("<pre>line1<br>line2</pre>"),
            vec![Node::code_block(None, "line1\nline2")]
        );
        assert_eq!(
            nodes("<pre><code>a<br/><span>b</span></code></pre>"),
            vec![Node::code_block(None, "a\nb")]
        );
    }

    #[test]
    fn test_heading_in_list_item_made_bold() {
        let (nodes, diagnostics) = map("<ul><li><h3>Step <em>one</em></h3>details</li></ul>");
        assert_eq!(
            nodes,
            vec![Node::bullet_list(vec![Node::list_item(vec![
                Node::paragraph(vec![
                    strong("Step "),
                    Node::text_with_marks(
                        "one",
                        vec![Mark::new(MarkKind::Strong), Mark::new(MarkKind::Em)]
                    ),
                ]),
                p("details"),
            ])])]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MappingWarning {
                tag: "heading".to_owned(),
                message: "heading inside listItem made bold".to_owned(),
            }]
        );
    }

    #[test]
    fn test_table_in_cell_flattened_to_rows() {
        let (nodes, diagnostics) = map(
            "<table><tr><td><table>\
             <tr><th>Key</th><th>Value</th></tr>\
             <tr><td>a</td><td>1</td></tr>\
             <tr><td></td><td></td></tr>\
             </table></td></tr></table>",
        );
        assert_eq!(
            nodes,
            vec![Node::table(vec![Node::table_row(vec![Node::table_cell(vec![
                p("Key | Value"),
                p("a | 1"),
            ])])])]
        );
        assert_eq!(
            diagnostics,
            vec![Diagnostic::MappingWarning {
                tag: "table".to_owned(),
                message: "table inside tableCell flattened".to_owned(),
            }]
        );
    }

    #[test]
    fn test_table_in_blockquote_flattened() {
        let (nodes, diagnostics) = map(
            "<blockquote><h2>Note</h2>\
             <table><tr><td>x</td><td>y</td></tr></table></blockquote>",
        );
        assert_eq!(
            nodes,
            vec![Node::blockquote(vec![
                Node::paragraph(vec![strong("Note")]),
                p("x | y"),
            ])]
        );
        assert_eq!(diagnostics.len(), 2);
    }

    #[test]
    fn test_table_in_list_item_flattened() {
        assert_eq!(
            nodes("<ol><li><table><tr><td>a</td></tr></table></li></ol>"),
            vec![Node::ordered_list(1, vec![Node::list_item(vec![p("a")])])]
        );
    }

    #[test]
    fn test_blockquote_in_list_item_unwrapped() {
        let (nodes, diagnostics) = map("<ul><li><blockquote>q<hr></blockquote></li></ul>");
        assert_eq!(nodes, vec![Node::bullet_list(vec![Node::list_item(vec![p("q")])])]);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::MappingWarning {
                    tag: "rule".to_owned(),
                    message: "rule inside blockquote dropped".to_owned(),
                },
                Diagnostic::MappingWarning {
                    tag: "blockquote".to_owned(),
                    message: "blockquote inside listItem unwrapped".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn test_heading_in_cell_kept() {
        assert_eq!(
            nodes("<table><tr><td><h4>H</h4></td></tr></table>"),
            vec![Node::table(vec![Node::table_row(vec![Node::table_cell(vec![
                Node::heading(4, vec![t("H")])
            ])])])]
        );
    }
}
