//! Combined page showing every exported diagram.

use archdoc_convert::LOCAL_DIAGRAM_SCHEME;

/// Default title of the all-views page.
pub const VIEWS_PAGE_TITLE: &str = "Views";

/// HTML with one diagram image per view key, in the given order.
///
/// Each key becomes `<p><img src="local:diagram:KEY" alt="KEY"></p>`, so the
/// converter uploads the diagrams to whatever page the HTML is exported to.
pub fn views_page_html<S: AsRef<str>>(keys: &[S]) -> String {
    let mut html = String::new();
    for key in keys {
        let key = escape_attr(key.as_ref());
        html.push_str(&format!(
            r#"<p><img src="{LOCAL_DIAGRAM_SCHEME}{key}" alt="{key}"></p>"#
        ));
    }
    html
}

fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
