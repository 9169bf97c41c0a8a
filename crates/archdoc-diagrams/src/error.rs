use std::path::PathBuf;

/// Error resolving a diagram artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("no diagram for view '{key}' in {}", dir.display())]
    NotFound { key: String, dir: PathBuf },

    #[error("invalid view key '{0}'")]
    InvalidKey(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
