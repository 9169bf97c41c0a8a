//! Inline content handling: mark stacks, text run cleanup and grouping of
//! inline runs into block containers.

use std::mem;

use archdoc_adf::{Mark, MarkKind, Node, NodeKind};

/// Marks active at a point of the DOM walk, kept in canonical order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Marks(Vec<Mark>);

impl Marks {
    /// Marks with `mark` added. An active mark of the same kind is replaced,
    /// so the innermost link wins.
    pub(crate) fn with(&self, mark: Mark) -> Self {
        let mut marks: Vec<Mark> = self
            .0
            .iter()
            .filter(|m| m.kind != mark.kind)
            .cloned()
            .collect();
        marks.push(mark);
        marks.sort_by_key(|m| m.kind);
        Self(marks)
    }

    /// Marks to put on a text leaf. ADF only combines `code` with `link`.
    pub(crate) fn for_text(&self) -> Vec<Mark> {
        if self.0.iter().any(|m| m.kind == MarkKind::Code) {
            self.0
                .iter()
                .filter(|m| matches!(m.kind, MarkKind::Code | MarkKind::Link))
                .cloned()
                .collect()
        } else {
            self.0.clone()
        }
    }
}

/// Clean up one run of inline nodes.
///
/// Leading and trailing spaces of the run are trimmed, spaces are trimmed
/// around hard breaks, a space that follows another space across a node
/// boundary is dropped, empty text leaves are removed and adjacent text
/// leaves with identical marks are merged.
pub(crate) fn normalize_inline(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    let mut after_space = true;
    for mut node in nodes {
        if node.kind() == NodeKind::HardBreak {
            trim_trailing(&mut out);
            out.push(node);
            after_space = true;
            continue;
        }
        if let Some(text) = node.text_mut() {
            if after_space {
                let trimmed = text.trim_start_matches(' ');
                if trimmed.len() != text.len() {
                    *text = trimmed.to_owned();
                }
            }
            if text.is_empty() {
                continue;
            }
            after_space = text.ends_with(' ');
        } else {
            after_space = false;
        }
        out.push(node);
    }
    trim_trailing(&mut out);
    merge_text_runs(out)
}

/// Trim spaces at the end of `nodes`, dropping text leaves left empty.
fn trim_trailing(nodes: &mut Vec<Node>) {
    while let Some(last) = nodes.last_mut() {
        let Some(text) = last.text_mut() else {
            return;
        };
        let len = text.trim_end_matches(' ').len();
        text.truncate(len);
        if !text.is_empty() {
            return;
        }
        nodes.pop();
    }
}

/// Merge adjacent text leaves that carry identical marks.
pub(crate) fn merge_text_runs(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if let (Some(last), Some(text)) = (out.last_mut(), node.text_value())
            && last.marks() == node.marks()
            && let Some(last_text) = last.text_mut()
        {
            last_text.push_str(text);
            continue;
        }
        out.push(node);
    }
    out
}

/// Split a mixed node list into blocks.
///
/// Each maximal run of inline nodes is normalized and wrapped with `make`;
/// runs that normalize to nothing are dropped. Block nodes pass through in
/// place, which is how a block nested in an inline context gets hoisted.
pub(crate) fn split_inline(nodes: Vec<Node>, make: impl Fn(Vec<Node>) -> Node) -> Vec<Node> {
    let mut out = Vec::new();
    let mut run = Vec::new();
    for node in nodes {
        if node.kind().is_inline() {
            run.push(node);
        } else {
            flush_run(&mut run, &mut out, &make);
            out.push(node);
        }
    }
    flush_run(&mut run, &mut out, &make);
    out
}

/// Block content for a container that only accepts blocks: inline runs
/// become paragraphs.
pub(crate) fn wrap_blocks(nodes: Vec<Node>) -> Vec<Node> {
    split_inline(nodes, Node::paragraph)
}

fn flush_run(run: &mut Vec<Node>, out: &mut Vec<Node>, make: &impl Fn(Vec<Node>) -> Node) {
    if run.is_empty() {
        return;
    }
    let inline = normalize_inline(mem::take(run));
    if !inline.is_empty() {
        out.push(make(inline));
    }
}
