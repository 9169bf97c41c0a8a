//! `archdoc views` command implementation.

use std::path::PathBuf;

use archdoc_config::{CliSettings, Config};
use archdoc_confluence::ConfluenceClient;
use archdoc_confluence::exporter::{
    ExportRequest, ExportSettings, PageExporter, VIEWS_PAGE_TITLE, views_page_html,
};
use clap::Args;

use super::{diagram_artifacts, print_export_report, require_confluence_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the views command.
#[derive(Args)]
pub(crate) struct ViewsArgs {
    /// Title of the views page.
    #[arg(short, long, default_value = VIEWS_PAGE_TITLE)]
    title: String,

    /// Parent page id for a new page (overrides config).
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

impl ViewsArgs {
    /// Execute the views command.
    ///
    /// # Errors
    ///
    /// Returns an error if no diagrams are found or publishing fails.
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

        let artifacts = diagram_artifacts(&config);
        let keys = artifacts.list_view_keys()?;
        if keys.is_empty() {
            return Err(CliError::Validation(format!(
                "no diagrams found in {}",
                artifacts.dir().display()
            )));
        }
        output.highlight(&format!("Views ({}):", keys.len()));
        for key in &keys {
            output.info(&format!("  -> {key}"));
        }

        let client = ConfluenceClient::from_config(conf_config);
        let mut exporter = PageExporter::new(
            &client,
            &client,
            &artifacts,
            ExportSettings::from(&config.export),
        );
        let request = ExportRequest::new(views_page_html(&keys)).with_title(Some(self.title));
        let report = exporter.export(&request)?;

        print_export_report(&output, &report, &client.page_url(&report.page_id));
        Ok(())
    }
}
