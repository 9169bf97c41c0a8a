//! Markdown input support.

use pulldown_cmark::{Options, Parser, html};

/// Render Markdown to HTML for conversion.
///
/// Tables and strikethrough are enabled; fenced code blocks keep their info
/// string as a `language-*` class, which the converter picks up.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
