//! CLI command implementations.

pub(crate) mod adr;
pub(crate) mod clean;
pub(crate) mod convert;
pub(crate) mod export;
pub(crate) mod views;

pub(crate) use adr::AdrArgs;
pub(crate) use clean::CleanArgs;
pub(crate) use convert::ConvertArgs;
pub(crate) use export::ExportArgs;
pub(crate) use views::ViewsArgs;

use std::path::Path;

use archdoc_config::{Config, ConfluenceConfig};
use archdoc_confluence::exporter::ExportReport;
use archdoc_convert::markdown_to_html;
use archdoc_diagrams::DirectoryArtifacts;

use crate::error::CliError;
use crate::output::Output;

/// Read a page as HTML; `.md` files are rendered from Markdown first.
fn read_page_html(path: &Path) -> Result<String, CliError> {
    let text = std::fs::read_to_string(path)?;
    let is_markdown = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md") || ext.eq_ignore_ascii_case("markdown"));
    Ok(if is_markdown {
        markdown_to_html(&text)
    } else {
        text
    })
}

fn diagram_artifacts(config: &Config) -> DirectoryArtifacts {
    DirectoryArtifacts::new(&config.diagrams_resolved.dir)
        .with_workspace_id(config.diagrams_resolved.workspace_id.clone())
}

fn require_confluence_config<'a>(
    config: &'a Config,
    output: &Output,
) -> Result<&'a ConfluenceConfig, CliError> {
    config.require_confluence().inspect_err(|_| {
        if config.confluence.is_none() {
            output.error("Error: confluence configuration required in archdoc.toml");
            output.info("\nAdd the following to your archdoc.toml:");
            output.info("\n[confluence]");
            output.info(r#"base_url = "https://your-site.atlassian.net""#);
            output.info(r#"username = "you@example.com""#);
            output.info(r#"api_token = "${CONFLUENCE_API_TOKEN}""#);
            output.info(r#"space_key = "ARCH""#);
        }
    })
    .map_err(CliError::from)
}

fn print_export_report(output: &Output, report: &ExportReport, page_url: &str) {
    if report.created {
        output.success("\nPage created and published successfully!");
    } else {
        output.success("\nPage published successfully!");
    }
    output.info(&format!("ID: {}", report.page_id));
    output.info(&format!("Title: {}", report.title));
    output.info(&format!("URL: {page_url}"));
    if report.uploads > 0 {
        output.info(&format!("Attachments uploaded: {}", report.uploads));
    }
    output.diagnostics(&report.diagnostics);
}
