//! `archdoc clean` command implementation.

use std::path::PathBuf;

use archdoc_config::{CliSettings, Config};
use archdoc_confluence::ConfluenceClient;
use archdoc_confluence::exporter::{CleanReport, clean_page_tree, clean_page_tree_by_title};
use clap::Args;

use super::require_confluence_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the clean command.
#[derive(Args)]
pub(crate) struct CleanArgs {
    /// Id of the root page to delete.
    #[arg(long, conflicts_with = "title", required_unless_present = "title")]
    page_id: Option<String>,

    /// Title of the root page to delete.
    #[arg(short, long)]
    title: Option<String>,

    /// Confirm deletion of the page and all pages below it.
    #[arg(long)]
    confirm: bool,

    /// Target space key (overrides config).
    #[arg(long, env = "ARCHDOC_SPACE_KEY")]
    space: Option<String>,

    /// Path to configuration file (default: auto-discover archdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CleanArgs {
    /// Execute the clean command.
    ///
    /// # Errors
    ///
    /// Returns an error without `--confirm`, or if the page tree cannot be
    /// listed.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let target = match (&self.page_id, &self.title) {
            (Some(page_id), _) => format!("page {page_id}"),
            (None, Some(title)) => format!("page '{title}'"),
            (None, None) => {
                return Err(CliError::Validation("pass --page-id or --title".to_owned()));
            }
        };
        if !self.confirm {
            output.warning(&format!("This deletes {target} and every page below it."));
            return Err(CliError::Validation(
                "pass --confirm to proceed with deletion".to_owned(),
            ));
        }

        let cli_settings = CliSettings {
            space_key: self.space.clone(),
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let conf_config = require_confluence_config(&config, &output)?;
        let client = ConfluenceClient::from_config(conf_config);

        output.info(&format!("Cleaning {target}..."));
        let report = match (&self.page_id, &self.title) {
            (Some(page_id), _) => Some(clean_page_tree(&client, page_id)?),
            (None, Some(title)) => clean_page_tree_by_title(&client, title)?,
            (None, None) => None,
        };

        match report {
            Some(report) => print_clean_report(&output, &report),
            None => output.warning(&format!("No {target} found, nothing to clean")),
        }
        Ok(())
    }
}

fn print_clean_report(output: &Output, report: &CleanReport) {
    if report.is_complete() {
        output.success(&format!("\nDeleted {} page(s)", report.deleted.len()));
    } else {
        output.warning(&format!(
            "\nDeleted {} page(s), {} could not be deleted:",
            report.deleted.len(),
            report.failed.len()
        ));
        for (page_id, reason) in &report.failed {
            output.error(&format!("  - {page_id}: {reason}"));
        }
    }
}
