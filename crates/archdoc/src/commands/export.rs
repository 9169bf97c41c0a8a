//! `archdoc export` command implementation.

use std::path::PathBuf;

use archdoc_config::{CliSettings, Config};
use archdoc_confluence::ConfluenceClient;
use archdoc_confluence::exporter::{ExportRequest, ExportSettings, PageExporter};
use clap::Args;

use super::{diagram_artifacts, print_export_report, read_page_html, require_confluence_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the export command.
#[derive(Args)]
pub(crate) struct ExportArgs {
    /// Path to the HTML or Markdown (`.md`) file.
    file: PathBuf,

    /// Page title (default: first heading of the page).
    #[arg(short, long)]
    title: Option<String>,

    /// Parent page id for a new page (overrides config).
    #[arg(long)]
    parent: Option<String>,

    /// Target space key (overrides config).
    #[arg(long, env = "ARCHDOC_SPACE_KEY")]
    space: Option<String>,

    /// Diagrams directory (overrides config).
    #[arg(long)]
    diagrams: Option<PathBuf>,

    /// Remove the title heading from the body.
    #[arg(long)]
    strip_title: bool,

    /// Path to configuration file (default: auto-discover archdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ExportArgs {
    /// Execute the export command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is incomplete or publishing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            diagrams_dir: self.diagrams.clone(),
            space_key: self.space.clone(),
            parent_page_id: self.parent.clone(),
            strip_title_heading: self.strip_title.then_some(true),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let conf_config = require_confluence_config(&config, &output)?;

        let client = ConfluenceClient::from_config(conf_config);
        let artifacts = diagram_artifacts(&config);

        let html = read_page_html(&self.file)?;
        output.info(&format!("Exporting {}...", self.file.display()));

        let mut exporter = PageExporter::new(
            &client,
            &client,
            &artifacts,
            ExportSettings::from(&config.export),
        );
        let report = exporter.export(&ExportRequest::new(html).with_title(self.title))?;

        print_export_report(&output, &report, &client.page_url(&report.page_id));
        Ok(())
    }
}
