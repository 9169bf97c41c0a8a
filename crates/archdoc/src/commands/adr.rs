//! `archdoc adr` command implementation.

use std::path::PathBuf;

use archdoc_config::{CliSettings, Config};
use archdoc_confluence::ConfluenceClient;
use archdoc_confluence::decisions::load_decisions;
use archdoc_confluence::exporter::{DECISIONS_PAGE_TITLE, ExportSettings, PageExporter};
use clap::Args;

use super::{diagram_artifacts, require_confluence_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the adr command.
#[derive(Args)]
pub(crate) struct AdrArgs {
    /// Directory with adr-tools records (`NNNN-title.md`).
    #[arg(default_value = "doc/adr")]
    dir: PathBuf,

    /// Title of the index page the records are published under.
    #[arg(short, long, default_value = DECISIONS_PAGE_TITLE)]
    title: String,

    /// Parent page id for the index page (overrides config).
    #[arg(long)]
    parent: Option<String>,

    /// Target space key (overrides config).
    #[arg(long, env = "ARCHDOC_SPACE_KEY")]
    space: Option<String>,

    /// Diagrams directory (overrides config).
    #[arg(long)]
    diagrams: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover archdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl AdrArgs {
    /// Execute the adr command.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory has no records or publishing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            diagrams_dir: self.diagrams.clone(),
            space_key: self.space.clone(),
            parent_page_id: self.parent.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let conf_config = require_confluence_config(&config, &output)?;

        let decisions = load_decisions(&self.dir)?;
        if decisions.is_empty() {
            return Err(CliError::Validation(format!(
                "no decision records found in {}",
                self.dir.display()
            )));
        }
        output.highlight(&format!("Decisions ({}):", decisions.len()));
        for decision in &decisions {
            output.info(&format!("  -> {}. {}", decision.id, decision.title));
        }

        let client = ConfluenceClient::from_config(conf_config);
        let artifacts = diagram_artifacts(&config);
        let mut exporter = PageExporter::new(
            &client,
            &client,
            &artifacts,
            ExportSettings::from(&config.export),
        );
        let report = exporter.export_decisions(&decisions, &self.title)?;

        output.success(&format!(
            "\nPublished {} decision page(s) under '{}'",
            report.pages.len(),
            self.title
        ));
        output.info(&format!("URL: {}", client.page_url(&report.index_page_id)));
        for page in &report.pages {
            let state = if page.created { "created" } else { "updated" };
            output.info(&format!("  {} ({state})", page.title));
            output.diagnostics(&page.diagnostics);
        }
        Ok(())
    }
}
