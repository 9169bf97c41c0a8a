//! `archdoc convert` command implementation.

use std::path::PathBuf;

use archdoc_config::{CliSettings, Config};
use archdoc_convert::{
    AttachmentUploader, CollaboratorError, ConversionContext, HtmlConverter, UploadCache,
};
use clap::Args;
use console::Term;
use tracing::info;

use super::{diagram_artifacts, read_page_html};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Path to the HTML or Markdown (`.md`) file.
    file: PathBuf,

    /// Page id used for media collections in the output.
    #[arg(long, default_value = "0")]
    page_id: String,

    /// Diagrams directory (overrides config).
    #[arg(long)]
    diagrams: Option<PathBuf>,

    /// Remove the title heading from the body.
    #[arg(long)]
    strip_title: bool,

    /// Pretty-print the JSON.
    #[arg(long)]
    pretty: bool,

    /// Path to configuration file (default: auto-discover archdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the HTML is rejected.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            diagrams_dir: self.diagrams.clone(),
            strip_title_heading: self.strip_title.then_some(true),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let html = read_page_html(&self.file)?;
        output.info(&format!("Converting {}...", self.file.display()));

        let artifacts = diagram_artifacts(&config);
        let uploader = DryRunUploader;
        let mut cache = UploadCache::new();
        let mut ctx = ConversionContext::new(&self.page_id, &mut cache, &uploader, &artifacts);
        let conversion = HtmlConverter::new()
            .strip_title_heading(config.export.strip_title_heading)
            .convert(&html, &mut ctx);
        let uploads = ctx.uploads();

        if conversion.parse_failed() {
            output.diagnostics(&conversion.diagnostics);
            return Err(CliError::Validation(format!(
                "{} could not be converted",
                self.file.display()
            )));
        }

        let json = if self.pretty {
            conversion.document.to_json_pretty()?
        } else {
            conversion.document.to_json()?
        };
        Term::stdout().write_line(&json)?;

        if conversion.title.is_empty() {
            output.warning("No title heading found");
        } else {
            output.info(&format!("Title: {}", conversion.title));
        }
        if uploads > 0 {
            output.info(&format!("Attachments (not uploaded): {uploads}"));
        }
        output.diagnostics(&conversion.diagnostics);
        Ok(())
    }
}

/// Uploader that only logs what would be uploaded.
///
/// Ids are derived from the filename so repeated runs print identical JSON.
struct DryRunUploader;

impl AttachmentUploader for DryRunUploader {
    fn upload_or_replace(
        &self,
        page_id: &str,
        filename: &str,
        bytes: &[u8],
    ) -> Result<String, CollaboratorError> {
        info!(
            "Would upload '{}' ({} bytes) to page {}",
            filename,
            bytes.len(),
            page_id
        );
        Ok(format!("dry-run:{filename}"))
    }
}
