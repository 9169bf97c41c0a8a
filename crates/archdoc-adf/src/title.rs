//! Page title extraction from heading content.

use crate::document::Document;
use crate::node::{Node, NodeKind};

/// Title of a node tree: the first heading at the lowest level present.
///
/// Level 1 wins whenever one exists; otherwise the first heading of the
/// next-lowest level is used. The heading's direct text runs are
/// concatenated in order and trimmed. Headings without text are ignored.
/// Returns an empty string when the tree has no titled heading.
pub fn extract_title(nodes: &[Node]) -> String {
    find_title_heading(nodes, &mut Vec::new())
        .map(|(heading, _)| heading_text(heading))
        .unwrap_or_default()
}

/// Remove the title heading from a document when it is a top-level node.
///
/// Returns the removed heading. Headings nested in lists, tables or quotes
/// stay in place and `None` is returned.
pub fn remove_title_heading(doc: &mut Document) -> Option<Node> {
    let (_, path) = find_title_heading(doc.content(), &mut Vec::new())?;
    match path.as_slice() {
        [index] => Some(doc.content_mut().remove(*index)),
        _ => None,
    }
}

/// Depth-first search for the title heading, returning it with its index path.
fn find_title_heading<'a>(
    nodes: &'a [Node],
    path: &mut Vec<usize>,
) -> Option<(&'a Node, Vec<usize>)> {
    let mut best: Option<(u8, &'a Node, Vec<usize>)> = None;
    visit(nodes, path, &mut |node, node_path| {
        let Some(level) = node.heading_level() else {
            return;
        };
        if best.as_ref().is_none_or(|(best_level, _, _)| level < *best_level)
            && !heading_text(node).is_empty()
        {
            best = Some((level, node, node_path.to_vec()));
        }
    });
    best.map(|(_, node, path)| (node, path))
}

fn visit<'a>(
    nodes: &'a [Node],
    path: &mut Vec<usize>,
    f: &mut impl FnMut(&'a Node, &[usize]),
) {
    for (index, node) in nodes.iter().enumerate() {
        path.push(index);
        f(node, path);
        if node.kind() != NodeKind::Heading {
            visit(node.content(), path, f);
        }
        path.pop();
    }
}

fn heading_text(heading: &Node) -> String {
    let text: String = heading
        .content()
        .iter()
        .filter_map(Node::text_value)
        .collect();
    text.trim().to_owned()
}
