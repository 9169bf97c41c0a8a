//! Architecture decision records in the adr-tools layout.
//!
//! Each record is a Markdown file named `NNNN-slug.md`:
//!
//! ```markdown
//! # 2. Use PostgreSQL
//!
//! Date: 2024-03-01
//!
//! ## Status
//!
//! Superseded by [5. Use CockroachDB](0005-use-cockroachdb.md)
//!
//! ## Context
//! ...
//! ```
//!
//! The number in the file name is the decision id. Links to other record
//! files become [`DecisionLink`]s, described by the text in front of the
//! link on the same line.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// One architecture decision record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Number from the file name, without leading zeros.
    pub id: String,
    pub title: String,
    /// First word of the `## Status` section, e.g. `Accepted`.
    pub status: Option<String>,
    /// Value of the `Date:` line, as written.
    pub date: Option<String>,
    /// Markdown source of the whole record.
    pub content: String,
    pub links: Vec<DecisionLink>,
}

/// Reference from one decision to another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionLink {
    /// Id of the referenced decision.
    pub id: String,
    /// Relationship, e.g. `Superseded by`.
    pub description: String,
}

/// Error reading a decisions directory.
#[derive(Debug, thiserror::Error)]
#[error("failed to read decisions from {}: {source}", .path.display())]
pub struct DecisionError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

impl Decision {
    /// Parse a record from its file name and Markdown source.
    ///
    /// Returns `None` when the file name does not start with a decision
    /// number.
    pub fn parse(filename: &str, markdown: &str) -> Option<Self> {
        let id = decision_id(filename)?;
        let title = markdown
            .lines()
            .find_map(|line| line.trim().strip_prefix("# "))
            .map(strip_numbering)
            .filter(|title| !title.is_empty())
            .map_or_else(|| title_from_filename(filename), str::to_owned);
        let date = markdown
            .lines()
            .find_map(|line| line.trim().strip_prefix("Date:"))
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .map(str::to_owned);

        let links = decision_links(markdown, &id);
        Some(Self {
            id,
            title,
            status: status(markdown),
            date,
            content: markdown.to_owned(),
            links,
        })
    }
}

/// Load every record of `dir`, ordered by decision number.
///
/// Files that are not Markdown or not numbered are skipped.
pub fn load_decisions(dir: &Path) -> Result<Vec<Decision>, DecisionError> {
    let io_error = |source| DecisionError {
        path: dir.to_owned(),
        source,
    };

    let mut decisions = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || !is_markdown(filename) {
            continue;
        }
        let markdown = fs::read_to_string(&path).map_err(|source| DecisionError {
            path: path.clone(),
            source,
        })?;
        match Decision::parse(filename, &markdown) {
            Some(decision) => decisions.push(decision),
            None => debug!("Skipping {}: not a numbered decision record", filename),
        }
    }

    decisions.sort_by_key(|d| d.id.parse::<u64>().unwrap_or(u64::MAX));
    info!("Loaded {} decision(s) from {}", decisions.len(), dir.display());
    Ok(decisions)
}

fn is_markdown(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Decision number from `NNNN-slug.md`, leading zeros removed.
fn decision_id(filename: &str) -> Option<String> {
    let end = filename
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(filename.len());
    let digits = &filename[..end];
    if digits.is_empty() {
        return None;
    }
    let id = digits.trim_start_matches('0');
    Some(if id.is_empty() { "0" } else { id }.to_owned())
}

/// `2. Use PostgreSQL` becomes `Use PostgreSQL`.
fn strip_numbering(heading: &str) -> &str {
    let heading = heading.trim();
    let rest = heading.trim_start_matches(|c: char| c.is_ascii_digit());
    match rest.strip_prefix('.') {
        Some(title) if rest.len() < heading.len() => title.trim(),
        _ => heading,
    }
}

/// `0002-use-postgresql.md` becomes `use postgresql`.
fn title_from_filename(filename: &str) -> String {
    let stem = filename.strip_suffix(".md").unwrap_or(filename);
    stem.trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches('-')
        .replace('-', " ")
}

/// First word of the first line below `## Status`.
fn status(markdown: &str) -> Option<String> {
    let mut lines = markdown.lines().map(str::trim);
    lines.find(|line| line.eq_ignore_ascii_case("## status"))?;
    let line = lines.find(|line| !line.is_empty())?;
    if line.starts_with('#') {
        return None;
    }
    line.split_whitespace().next().map(str::to_owned)
}

/// Links to other record files, in document order, without duplicates.
fn decision_links(markdown: &str, own_id: &str) -> Vec<DecisionLink> {
    let mut links: Vec<DecisionLink> = Vec::new();
    for line in markdown.lines() {
        let mut described_from = 0;
        for link in markdown_links(line) {
            let preceding = &line[described_from..link.start];
            described_from = link.end;

            let Some(id) = link_target_id(link.target) else {
                continue;
            };
            if id == own_id {
                continue;
            }
            let description = preceding
                .trim()
                .trim_start_matches(['-', '*'])
                .trim()
                .trim_end_matches(':')
                .trim();
            let description = if description.is_empty() {
                strip_numbering(link.text)
            } else {
                description
            };
            let link = DecisionLink {
                id,
                description: description.to_owned(),
            };
            if !links.contains(&link) {
                links.push(link);
            }
        }
    }
    links
}

/// Inline Markdown link with byte offsets into its line.
struct InlineLink<'a> {
    start: usize,
    end: usize,
    text: &'a str,
    target: &'a str,
}

/// `[text](target)` links of one line.
fn markdown_links(line: &str) -> Vec<InlineLink<'_>> {
    let mut links = Vec::new();
    let mut from = 0;
    while let Some(open) = line[from..].find('[') {
        let start = from + open;
        let Some(close) = line[start..].find("](") else {
            break;
        };
        let text_end = start + close;
        let target_start = text_end + 2;
        let Some(len) = line[target_start..].find(')') else {
            break;
        };
        let end = target_start + len + 1;
        links.push(InlineLink {
            start,
            end,
            text: &line[start + 1..text_end],
            target: line[target_start..end - 1].trim(),
        });
        from = end;
    }
    links
}

/// Decision id of a link to a record file such as `0005-use-x.md#context`.
fn link_target_id(target: &str) -> Option<String> {
    let path = target.split('#').next().unwrap_or_default();
    let filename = path.rsplit('/').next().unwrap_or_default();
    if !is_markdown(filename) || filename.contains(':') {
        return None;
    }
    decision_id(filename)
}
