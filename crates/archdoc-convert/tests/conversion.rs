//! End-to-end conversion tests with recording collaborators.

use std::cell::{Cell, RefCell};

use archdoc_adf::{Body, Diagnostic, Document, Node, NodeKind};
use archdoc_convert::{
    AttachmentUploader, CollaboratorError, Conversion, ConversionContext, DiagramArtifact,
    DiagramArtifactProvider, HtmlConverter, UploadCache,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Uploader that records calls and hands out sequential ids.
#[derive(Default)]
struct RecordingUploader {
    calls: RefCell<Vec<(String, String)>>,
    fail: bool,
}

impl RecordingUploader {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.borrow().clone()
    }
}

impl AttachmentUploader for RecordingUploader {
    fn upload_or_replace(
        &self,
        page_id: &str,
        filename: &str,
        _bytes: &[u8],
    ) -> Result<String, CollaboratorError> {
        if self.fail {
            return Err("service unavailable".into());
        }
        let mut calls = self.calls.borrow_mut();
        calls.push((page_id.to_owned(), filename.to_owned()));
        Ok(format!("att-{}", calls.len()))
    }
}

/// Provider serving `<key>.png` for every key except `Missing`.
#[derive(Default)]
struct Artifacts {
    requests: Cell<usize>,
}

impl DiagramArtifactProvider for Artifacts {
    fn artifact(&self, view_key: &str) -> Result<DiagramArtifact, CollaboratorError> {
        self.requests.set(self.requests.get() + 1);
        if view_key == "Missing" {
            return Err(format!("no artifact for {view_key}").into());
        }
        Ok(DiagramArtifact {
            bytes: view_key.as_bytes().to_vec(),
            filename: format!("{view_key}.png"),
        })
    }
}

fn convert(
    html: &str,
    page_id: &str,
    cache: &mut UploadCache,
    uploader: &RecordingUploader,
    artifacts: &Artifacts,
) -> Conversion {
    let mut ctx = ConversionContext::new(page_id, cache, uploader, artifacts);
    HtmlConverter::new().convert(html, &mut ctx)
}

fn convert_offline(html: &str) -> Conversion {
    let mut cache = UploadCache::new();
    convert(
        html,
        "1",
        &mut cache,
        &RecordingUploader::default(),
        &Artifacts::default(),
    )
}

fn media_ids(doc: &Document) -> Vec<String> {
    let mut ids = Vec::new();
    collect_media_ids(doc.content(), &mut ids);
    ids
}

fn collect_media_ids(nodes: &[Node], ids: &mut Vec<String>) {
    for node in nodes {
        if node.kind() == NodeKind::Media {
            if let Some(id) = node.attr("id").and_then(|v| v.as_str()) {
                ids.push(id.to_owned());
            }
        }
        collect_media_ids(node.content(), ids);
    }
}

fn assert_shape(nodes: &[Node]) {
    for node in nodes {
        match node.body() {
            Body::Text { text, .. } => assert!(node.content().is_empty(), "text node {text:?}"),
            Body::Content(children) => assert_shape(children),
            Body::Void => {}
        }
    }
}

#[test]
fn test_heading_and_paragraph() {
    let conversion = convert_offline("<h1>Architecture</h1><p>Overview</p>");

    assert_eq!(conversion.title, "Architecture");
    assert!(conversion.is_faithful());
    assert_eq!(
        serde_json::to_value(&conversion.document).unwrap(),
        json!({
            "version": 1,
            "type": "doc",
            "content": [
                {
                    "type": "heading",
                    "attrs": {"level": 1},
                    "content": [{"type": "text", "text": "Architecture"}]
                },
                {
                    "type": "paragraph",
                    "content": [{"type": "text", "text": "Overview"}]
                }
            ]
        })
    );
}

#[test]
fn test_table_with_header_row() {
    let conversion = convert_offline("<table><tr><th>A</th></tr><tr><td>1</td></tr></table>");

    let [table] = conversion.document.content() else {
        panic!("expected a single table: {:?}", conversion.document);
    };
    assert_eq!(table.kind(), NodeKind::Table);
    let rows = table.content();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].content()[0].kind(), NodeKind::TableHeader);
    assert_eq!(rows[1].content()[0].kind(), NodeKind::TableCell);
    assert_eq!(rows[0].plain_text(), "A");
    assert_eq!(rows[1].plain_text(), "1");
}

#[test]
fn test_failed_artifact_becomes_placeholder() {
    let mut cache = UploadCache::new();
    let uploader = RecordingUploader::default();
    let conversion = convert(
        r#"<p>Before</p><img src="local:diagram:Missing"><p>After</p>"#,
        "7",
        &mut cache,
        &uploader,
        &Artifacts::default(),
    );

    let texts: Vec<String> = conversion
        .document
        .content()
        .iter()
        .map(Node::plain_text)
        .collect();
    assert_eq!(texts, vec!["Before", "[image: Missing] (upload failed)", "After"]);
    assert!(uploader.calls().is_empty());
    assert!(cache.is_empty());
    assert!(!conversion.parse_failed());
    assert!(matches!(
        &conversion.diagnostics[..],
        [Diagnostic::ImageResolutionFailure { key, .. }] if key == "Missing"
    ));
}

#[test]
fn test_failed_upload_is_isolated_and_not_cached() {
    let mut cache = UploadCache::new();
    let failing = RecordingUploader::failing();
    let artifacts = Artifacts::default();
    let html = r#"<img src="local:diagram:SystemContext"><p>Text</p>"#;

    let conversion = convert(html, "7", &mut cache, &failing, &artifacts);
    assert!(
        conversion.document.content()[0]
            .plain_text()
            .contains("SystemContext")
    );
    assert_eq!(conversion.document.content().len(), 2);
    assert!(cache.is_empty());

    // A later attempt with a working uploader retries the upload
    let uploader = RecordingUploader::default();
    let conversion = convert(html, "7", &mut cache, &uploader, &artifacts);
    assert!(conversion.is_faithful());
    assert_eq!(uploader.calls().len(), 1);
}

#[test]
fn test_same_key_twice_uploads_once() {
    let mut cache = UploadCache::new();
    let uploader = RecordingUploader::default();
    let artifacts = Artifacts::default();
    let conversion = convert(
        r#"<img src="local:diagram:Context"><p>x</p><img src="local:diagram:Context">"#,
        "7",
        &mut cache,
        &uploader,
        &artifacts,
    );

    assert_eq!(uploader.calls(), vec![("7".to_owned(), "Context.png".to_owned())]);
    assert_eq!(artifacts.requests.get(), 1);
    assert_eq!(media_ids(&conversion.document), vec!["att-1", "att-1"]);
}

#[test]
fn test_reconversion_is_idempotent() {
    let mut cache = UploadCache::new();
    let uploader = RecordingUploader::default();
    let artifacts = Artifacts::default();
    let html = concat!(
        r#"<h1>Views</h1>"#,
        r#"<img src="local:diagram:Context"><img src="local:diagram:Containers">"#,
    );

    let first = convert(html, "7", &mut cache, &uploader, &artifacts);
    let second = convert(html, "7", &mut cache, &uploader, &artifacts);

    assert_eq!(uploader.calls().len(), 2);
    assert_eq!(first.document, second.document);
    assert_eq!(media_ids(&second.document), vec!["att-1", "att-2"]);
}

#[test]
fn test_cache_is_per_page() {
    let mut cache = UploadCache::new();
    let uploader = RecordingUploader::default();
    let artifacts = Artifacts::default();
    let html = r#"<img src="local:diagram:Context">"#;

    convert(html, "1", &mut cache, &uploader, &artifacts);
    let other = convert(html, "2", &mut cache, &uploader, &artifacts);

    assert_eq!(
        uploader.calls(),
        vec![
            ("1".to_owned(), "Context.png".to_owned()),
            ("2".to_owned(), "Context.png".to_owned()),
        ]
    );
    let media = &other.document.content()[0].content()[0];
    assert_eq!(
        media.attr("collection").and_then(|v| v.as_str()),
        Some("contentId-2")
    );
}

#[test]
fn test_data_uri_uploaded_once_by_content() {
    let mut cache = UploadCache::new();
    let uploader = RecordingUploader::default();
    let html = r#"<img src="data:image/png;base64,AAAA"><img src="data:image/png;base64,AA AA">"#;
    let conversion = convert(html, "3", &mut cache, &uploader, &Artifacts::default());

    let calls = uploader.calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].1.starts_with("image-") && calls[0].1.ends_with(".png"));
    assert_eq!(media_ids(&conversion.document), vec!["att-1", "att-1"]);
}

#[test]
fn test_undecodable_data_uri_becomes_placeholder() {
    let mut cache = UploadCache::new();
    let uploader = RecordingUploader::default();
    let conversion = convert(
        r#"<p><img src="data:image/png;base64"></p>"#,
        "3",
        &mut cache,
        &uploader,
        &Artifacts::default(),
    );

    assert!(uploader.calls().is_empty());
    assert_eq!(
        conversion.document.content(),
        &[Node::paragraph(vec![Node::text(
            "[image: data URI] (upload failed)"
        )])]
    );
    assert!(matches!(
        &conversion.diagnostics[..],
        [Diagnostic::ImageResolutionFailure { key, .. }] if key == "data URI"
    ));
}

#[test]
fn test_remote_image_not_uploaded() {
    let mut cache = UploadCache::new();
    let uploader = RecordingUploader::default();
    let conversion = convert(
        r#"<img src="https://example.com/logo.png" alt="Logo">"#,
        "3",
        &mut cache,
        &uploader,
        &Artifacts::default(),
    );

    assert!(uploader.calls().is_empty());
    let media = &conversion.document.content()[0].content()[0];
    assert_eq!(media.attr("type").and_then(|v| v.as_str()), Some("external"));
    assert_eq!(
        media.attr("url").and_then(|v| v.as_str()),
        Some("https://example.com/logo.png")
    );
}

#[test]
fn test_unknown_tag_keeps_text() {
    let conversion = convert_offline("<marquee>text</marquee>");
    assert_eq!(
        conversion.document.content(),
        &[Node::paragraph(vec![Node::text("text")])]
    );
    assert!(!conversion.is_faithful());
    assert!(!conversion.parse_failed());
}

#[test]
fn test_nested_structure_order_preserved() {
    let conversion = convert_offline(
        "<h1>A</h1>\
         <ul><li>one<ol><li>two<ul><li>three</li></ul></li></ol></li><li>four</li></ul>\
         <h2>B</h2><p>end</p>",
    );
    let content = conversion.document.content();
    let kinds: Vec<NodeKind> = content.iter().map(Node::kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Heading,
            NodeKind::BulletList,
            NodeKind::Heading,
            NodeKind::Paragraph,
        ]
    );

    let list = &content[1];
    let first_item = &list.content()[0];
    let ordered = &first_item.content()[1];
    assert_eq!(ordered.kind(), NodeKind::OrderedList);
    let inner = &ordered.content()[0].content()[1];
    assert_eq!(inner.kind(), NodeKind::BulletList);
    assert_eq!(inner.plain_text(), "three");
    assert_eq!(list.content()[1].plain_text(), "four");
    assert_eq!(list.plain_text(), "onetwothreefour");
}

#[test]
fn test_text_and_content_never_both_present() {
    let conversion = convert_offline(
        r#"<h1>T <b>b</b></h1><p>a<br>b <code>c</code> <a href="x">l</a></p>
           <table><tr><td><ul><li>x</li></ul></td></tr></table>
           <pre><code class="language-sh">ls</code></pre><blockquote>q</blockquote><hr>"#,
    );
    assert_shape(conversion.document.content());

    let json = serde_json::to_value(&conversion.document).unwrap();
    let reparsed: Document = serde_json::from_value(json).unwrap();
    assert_eq!(reparsed, conversion.document);
}

#[test]
fn test_malformed_markup_tolerated() {
    let conversion = convert_offline("<p>open <b>bold<p>next</i><ul><li>a<li>b");
    assert!(!conversion.parse_failed());
    assert_eq!(conversion.document.content().len(), 3);
    assert_eq!(conversion.document.content()[2].kind(), NodeKind::BulletList);
}
