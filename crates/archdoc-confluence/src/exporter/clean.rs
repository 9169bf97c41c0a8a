//! Removal of a page together with every page below it.

use std::iter;

use tracing::{info, warn};

use crate::error::ConfluenceError;
use crate::publisher::PagePublisher;

/// Outcome of cleaning a page tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// Deleted page ids, deepest pages first and the root last.
    pub deleted: Vec<String>,
    /// Pages that could not be deleted, with the reason.
    pub failed: Vec<(String, String)>,
}

impl CleanReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete `root_id` and all of its descendants.
///
/// Descendants are deleted before their parents. A page that cannot be
/// deleted is recorded in [`CleanReport::failed`] and the clean continues
/// with the remaining pages.
///
/// # Errors
///
/// Returns an error if the page tree cannot be listed. Nothing has been
/// deleted in that case.
pub fn clean_page_tree(
    publisher: &dyn PagePublisher,
    root_id: &str,
) -> Result<CleanReport, ConfluenceError> {
    let mut descendants = Vec::new();
    collect_descendants(publisher, root_id, &mut descendants)?;
    info!("Found {} page(s) below page {}", descendants.len(), root_id);

    // Pre-order reversed: every child comes before its parent
    descendants.reverse();

    let mut report = CleanReport::default();
    for page_id in descendants.into_iter().chain(iter::once(root_id.to_owned())) {
        match publisher.delete_page(&page_id) {
            Ok(()) => report.deleted.push(page_id),
            Err(e) => {
                warn!("Failed to delete page {}: {}", page_id, e);
                report.failed.push((page_id, e.to_string()));
            }
        }
    }
    info!(
        "Cleaned page tree {}: {} deleted, {} failed",
        root_id,
        report.deleted.len(),
        report.failed.len()
    );
    Ok(report)
}

/// Delete the page titled `title` and all of its descendants.
///
/// Returns `None` when no page has that title.
pub fn clean_page_tree_by_title(
    publisher: &dyn PagePublisher,
    title: &str,
) -> Result<Option<CleanReport>, ConfluenceError> {
    match publisher.find_page_by_title(title)? {
        Some(page_id) => clean_page_tree(publisher, &page_id).map(Some),
        None => {
            info!("Page '{}' not found, nothing to clean", title);
            Ok(None)
        }
    }
}

fn collect_descendants(
    publisher: &dyn PagePublisher,
    page_id: &str,
    out: &mut Vec<String>,
) -> Result<(), ConfluenceError> {
    for child in publisher.child_page_ids(page_id)? {
        out.push(child.clone());
        collect_descendants(publisher, &child, out)?;
    }
    Ok(())
}
