//! CLI error types.

use archdoc_config::ConfigError;
use archdoc_confluence::ConfluenceError;
use archdoc_confluence::decisions::DecisionError;
use archdoc_confluence::exporter::ExportError;
use archdoc_diagrams::ArtifactError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Confluence(#[from] ConfluenceError),

    #[error("{0}")]
    Export(#[from] ExportError),

    #[error("{0}")]
    Diagrams(#[from] ArtifactError),

    #[error("{0}")]
    Decisions(#[from] DecisionError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
