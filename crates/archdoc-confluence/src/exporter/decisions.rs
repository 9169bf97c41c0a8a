//! Export of architecture decision records as a page tree.
//!
//! The records are published below an index page, one child page per
//! decision. Each child page is assembled from three parts:
//!
//! 1. "Decision Information": id, title, status and date as a list
//! 2. The record's Markdown, converted like any other page
//! 3. "Related Decisions": the records it links to, when there are any

use archdoc_adf::{Document, Node};
use archdoc_convert::markdown_to_html;
use tracing::info;

use crate::decisions::Decision;

use super::error::ExportError;
use super::executor::{ExportRequest, PageExporter};
use super::result::ExportReport;

/// Default title of the decisions index page.
pub const DECISIONS_PAGE_TITLE: &str = "Architecture Decision Records";

/// Result of exporting a set of decisions.
#[derive(Debug, Clone)]
pub struct DecisionsReport {
    /// Id of the index page the decisions were published under.
    pub index_page_id: String,
    /// One report per decision, in input order.
    pub pages: Vec<ExportReport>,
}

impl DecisionsReport {
    /// Every decision page published without degradation.
    pub fn is_faithful(&self) -> bool {
        self.pages.iter().all(ExportReport::is_faithful)
    }
}

/// Title of a decision's page: `ADR <id> - <title>`.
pub fn decision_page_title(decision: &Decision) -> String {
    format!("ADR {} - {}", decision.id, decision.title)
}

/// Index page body listing the decision pages.
pub fn decisions_index(decisions: &[Decision]) -> Document {
    let mut doc = Document::new();
    doc.push(paragraph(
        "This page contains all architecture decision records for this project.",
    ));
    if !decisions.is_empty() {
        doc.push(bullet_list(decisions.iter().map(decision_page_title)));
    }
    doc
}

/// "Decision Information" section placed before the record's content.
pub fn decision_information(decision: &Decision) -> Document {
    let mut items = vec![
        format!("ID: {}", decision.id),
        format!("Title: {}", decision.title),
    ];
    if let Some(status) = decision.status.as_deref().filter(|s| !s.trim().is_empty()) {
        items.push(format!("Status: {status}"));
    }
    if let Some(date) = &decision.date {
        items.push(format!("Date: {date}"));
    }

    let mut doc = Document::new();
    doc.push(Node::heading(2, vec![Node::text("Decision Information")]));
    doc.push(bullet_list(items));
    if !decision.content.trim().is_empty() {
        doc.push(Node::heading(2, vec![Node::text("Content")]));
    }
    doc
}

/// "Related Decisions" section, `None` when the record links nowhere.
pub fn related_decisions(decision: &Decision) -> Option<Document> {
    if decision.links.is_empty() {
        return None;
    }
    let items = decision
        .links
        .iter()
        .map(|link| format!("{} (ID: {})", link.description, link.id));

    let mut doc = Document::new();
    doc.push(Node::heading(2, vec![Node::text("Related Decisions")]));
    doc.push(bullet_list(items));
    Some(doc)
}

fn paragraph(text: &str) -> Node {
    Node::paragraph(vec![Node::text(text)])
}

fn bullet_list(items: impl IntoIterator<Item = String>) -> Node {
    Node::bullet_list(
        items
            .into_iter()
            .map(|item| Node::list_item(vec![paragraph(&item)]))
            .collect(),
    )
}

impl PageExporter<'_> {
    /// Publish `decisions` below an index page titled `index_title`.
    ///
    /// The index page is created under the configured parent, or updated
    /// in place when it exists. Decision pages are exported in order with
    /// [`PageExporter::export`], titled by [`decision_page_title`].
    ///
    /// # Errors
    ///
    /// Stops at the first page that cannot be published. Pages exported
    /// before it stay published.
    pub fn export_decisions(
        &mut self,
        decisions: &[Decision],
        index_title: &str,
    ) -> Result<DecisionsReport, ExportError> {
        let parent = self.settings().parent_page_id.clone();
        let index_page_id = self.publisher().create_or_update_page(
            index_title,
            &decisions_index(decisions),
            parent.as_deref(),
        )?;
        info!(
            "Publishing {} decision(s) under '{}' ({})",
            decisions.len(),
            index_title,
            index_page_id
        );

        let mut pages = Vec::with_capacity(decisions.len());
        for decision in decisions {
            let mut request = ExportRequest::new(markdown_to_html(&decision.content))
                .with_title(Some(decision_page_title(decision)))
                .with_parent(Some(index_page_id.clone()))
                .prepend(decision_information(decision));
            if let Some(related) = related_decisions(decision) {
                request = request.append(related);
            }
            pages.push(self.export(&request)?);
        }

        Ok(DecisionsReport {
            index_page_id,
            pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use archdoc_adf::NodeKind;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::decisions::DecisionLink;
    use crate::exporter::ExportSettings;
    use crate::exporter::testing::{CountingUploader, MemoryPublisher, artifacts};

    fn decision(id: &str, title: &str, content: &str) -> Decision {
        Decision {
            id: id.to_owned(),
            title: title.to_owned(),
            status: Some("Accepted".to_owned()),
            date: Some("2024-03-01".to_owned()),
            content: content.to_owned(),
            links: Vec::new(),
        }
    }

    fn texts(doc: &Document) -> Vec<String> {
        doc.content().iter().map(Node::plain_text).collect()
    }

    #[test]
    fn test_decision_information() {
        let mut record = decision("2", "Use PostgreSQL", "# 2. Use PostgreSQL");
        record.date = None;

        let doc = decision_information(&record);

        assert_eq!(
            texts(&doc),
            vec![
                "Decision Information",
                "ID: 2Title: Use PostgreSQLStatus: Accepted",
                "Content",
            ]
        );
    }

    #[test]
    fn test_information_without_content() {
        let mut record = decision("7", "Empty", " \n");
        record.status = Some(" ".to_owned());

        let doc = decision_information(&record);

        assert_eq!(doc.content().len(), 2);
        assert_eq!(doc.content()[1].content().len(), 3);
    }

    #[test]
    fn test_related_decisions() {
        let mut record = decision("2", "Use PostgreSQL", "");
        assert_eq!(related_decisions(&record), None);

        record.links.push(DecisionLink {
            id: "5".to_owned(),
            description: "Superseded by".to_owned(),
        });
        let doc = related_decisions(&record).unwrap();
        assert_eq!(
            texts(&doc),
            vec!["Related Decisions", "Superseded by (ID: 5)"]
        );
    }

    #[test]
    fn test_export_decisions_as_page_tree() {
        let publisher = MemoryPublisher::default();
        let uploader = CountingUploader::default();
        let settings = ExportSettings {
            strip_title_heading: true,
            parent_page_id: Some("1".to_owned()),
        };
        let mut exporter = PageExporter::new(&publisher, &uploader, &artifacts, settings);

        let first = decision("1", "Record decisions", "# 1. Record decisions\n\nWe will.\n");
        let mut second = decision("2", "Use PostgreSQL", "# 2. Use PostgreSQL\n");
        second.links.push(DecisionLink {
            id: "1".to_owned(),
            description: "Amends".to_owned(),
        });

        let report = exporter
            .export_decisions(&[first, second], DECISIONS_PAGE_TITLE)
            .unwrap();

        assert_eq!(report.index_page_id, "100");
        assert!(report.is_faithful());
        let titles: Vec<&str> = report.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["ADR 1 - Record decisions", "ADR 2 - Use PostgreSQL"]
        );
        assert_eq!(publisher.parent_of("100").as_deref(), Some("1"));
        assert_eq!(publisher.parent_of("101").as_deref(), Some("100"));
        assert_eq!(publisher.parent_of("102").as_deref(), Some("100"));

        let (page_id, title, body) = publisher.last_update();
        assert_eq!((page_id.as_str(), title.as_str()), ("102", "ADR 2 - Use PostgreSQL"));
        let kinds: Vec<NodeKind> = body.content().iter().map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![
                // Decision Information
                NodeKind::Heading,
                NodeKind::BulletList,
                NodeKind::Heading,
                // record content, heading kept under a hinted title
                NodeKind::Heading,
                // Related Decisions
                NodeKind::Heading,
                NodeKind::BulletList,
            ]
        );
        assert_eq!(body.content()[3].plain_text(), "2. Use PostgreSQL");
        assert_eq!(body.content()[5].plain_text(), "Amends (ID: 1)");
    }

    #[test]
    fn test_index_page_updated_in_place() {
        let publisher = MemoryPublisher::with_page(DECISIONS_PAGE_TITLE, "50");
        let uploader = CountingUploader::default();
        let mut exporter =
            PageExporter::new(&publisher, &uploader, &artifacts, ExportSettings::default());

        let report = exporter
            .export_decisions(&[decision("1", "Only", "text")], DECISIONS_PAGE_TITLE)
            .unwrap();

        assert_eq!(report.index_page_id, "50");
        let created = publisher.created.borrow().clone();
        assert_eq!(
            created,
            vec![("ADR 1 - Only".to_owned(), Some("50".to_owned()))]
        );
        let index_update = &publisher.updates.borrow()[0];
        assert_eq!(index_update.0, "50");
        assert_eq!(
            texts(&index_update.2),
            vec![
                "This page contains all architecture decision records for this project.",
                "ADR 1 - Only",
            ]
        );
    }
}
