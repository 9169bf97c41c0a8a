//! In-memory collaborators for exporter tests.

use std::cell::RefCell;
use std::collections::HashMap;

use archdoc_adf::Document;
use archdoc_convert::{AttachmentUploader, CollaboratorError, DiagramArtifact};

use crate::error::ConfluenceError;
use crate::publisher::PagePublisher;

/// Publisher keeping a page tree in memory.
#[derive(Default)]
pub(super) struct MemoryPublisher {
    pub pages: RefCell<HashMap<String, String>>,
    /// `(page id, parent id)` in creation order.
    pub tree: RefCell<Vec<(String, Option<String>)>>,
    pub created: RefCell<Vec<(String, Option<String>)>>,
    pub updates: RefCell<Vec<(String, String, Document)>>,
    pub deleted: RefCell<Vec<String>>,
    /// Page whose deletion is refused.
    pub undeletable: Option<String>,
}

impl MemoryPublisher {
    pub fn with_page(title: &str, page_id: &str) -> Self {
        let publisher = Self::default();
        publisher.insert(title, page_id, None);
        publisher
    }

    pub fn insert(&self, title: &str, page_id: &str, parent_id: Option<&str>) {
        self.pages
            .borrow_mut()
            .insert(title.to_owned(), page_id.to_owned());
        self.tree
            .borrow_mut()
            .push((page_id.to_owned(), parent_id.map(str::to_owned)));
    }

    pub fn last_update(&self) -> (String, String, Document) {
        self.updates.borrow().last().cloned().unwrap()
    }

    pub fn parent_of(&self, page_id: &str) -> Option<String> {
        self.tree
            .borrow()
            .iter()
            .find(|(id, _)| id == page_id)
            .and_then(|(_, parent)| parent.clone())
    }
}

impl PagePublisher for MemoryPublisher {
    fn find_page_by_title(&self, title: &str) -> Result<Option<String>, ConfluenceError> {
        Ok(self.pages.borrow().get(title).cloned())
    }

    fn create_or_update_page(
        &self,
        title: &str,
        body: &Document,
        parent_id: Option<&str>,
    ) -> Result<String, ConfluenceError> {
        let existing = self.pages.borrow().get(title).cloned();
        let page_id = match existing {
            Some(page_id) => {
                self.updates
                    .borrow_mut()
                    .push((page_id.clone(), title.to_owned(), body.clone()));
                page_id
            }
            None => {
                let page_id = (100 + self.tree.borrow().len()).to_string();
                self.insert(title, &page_id, parent_id);
                self.created
                    .borrow_mut()
                    .push((title.to_owned(), parent_id.map(str::to_owned)));
                page_id
            }
        };
        Ok(page_id)
    }

    fn update_page_by_id(
        &self,
        page_id: &str,
        title: &str,
        body: &Document,
    ) -> Result<(), ConfluenceError> {
        self.updates
            .borrow_mut()
            .push((page_id.to_owned(), title.to_owned(), body.clone()));
        Ok(())
    }

    fn child_page_ids(&self, page_id: &str) -> Result<Vec<String>, ConfluenceError> {
        Ok(self
            .tree
            .borrow()
            .iter()
            .filter(|(_, parent)| parent.as_deref() == Some(page_id))
            .map(|(id, _)| id.clone())
            .collect())
    }

    fn delete_page(&self, page_id: &str) -> Result<(), ConfluenceError> {
        if self.undeletable.as_deref() == Some(page_id) {
            return Err(ConfluenceError::HttpResponse {
                status: 403,
                body: "not permitted".to_owned(),
            });
        }
        self.deleted.borrow_mut().push(page_id.to_owned());
        Ok(())
    }
}

/// Uploader recording `(page id, filename)` per call.
#[derive(Default)]
pub(super) struct CountingUploader {
    pub calls: RefCell<Vec<(String, String)>>,
}

impl AttachmentUploader for CountingUploader {
    fn upload_or_replace(
        &self,
        page_id: &str,
        filename: &str,
        _bytes: &[u8],
    ) -> Result<String, CollaboratorError> {
        let mut calls = self.calls.borrow_mut();
        calls.push((page_id.to_owned(), filename.to_owned()));
        Ok(format!("file-{}", calls.len()))
    }
}

/// Artifacts for every view key except `Missing`.
pub(super) fn artifacts(view_key: &str) -> Result<DiagramArtifact, CollaboratorError> {
    if view_key == "Missing" {
        return Err("not exported".into());
    }
    Ok(DiagramArtifact {
        bytes: vec![1, 2, 3],
        filename: format!("{view_key}.png"),
    })
}
