//! Filesystem diagram provider.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use archdoc_convert::{CollaboratorError, DiagramArtifact, DiagramArtifactProvider};
use tracing::debug;

use crate::error::ArtifactError;
use crate::filename::{
    DIAGRAM_EXTENSIONS, diagram_extension, is_legend, view_key_from_filename, workspace_of,
};

/// Diagrams exported into one directory.
#[derive(Debug, Clone)]
pub struct DirectoryArtifacts {
    dir: PathBuf,
    workspace_id: Option<String>,
}

impl DirectoryArtifacts {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            workspace_id: None,
        }
    }

    /// Only serve `structurizr-<id>-*` files of this workspace.
    #[must_use]
    pub fn with_workspace_id(mut self, workspace_id: Option<String>) -> Self {
        self.workspace_id = workspace_id.filter(|id| !id.is_empty());
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the image for `view_key`.
    ///
    /// Lookup order: `<key>.png`, `<key>.svg`, then workspace-qualified files
    /// in name order. Legend images are never returned.
    pub fn find(&self, view_key: &str) -> Result<PathBuf, ArtifactError> {
        validate_key(view_key)?;

        for ext in DIAGRAM_EXTENSIONS {
            let path = self.dir.join(format!("{view_key}.{ext}"));
            if path.is_file() {
                return Ok(path);
            }
        }

        self.diagram_files()?
            .into_iter()
            .find(|name| {
                view_key_from_filename(name) == Some(view_key) && self.in_workspace(name)
            })
            .map(|name| self.dir.join(name))
            .ok_or_else(|| ArtifactError::NotFound {
                key: view_key.to_owned(),
                dir: self.dir.clone(),
            })
    }

    /// Read the image for `view_key`.
    pub fn load(&self, view_key: &str) -> Result<DiagramArtifact, ArtifactError> {
        let path = self.find(view_key)?;
        let bytes = fs::read(&path).map_err(|source| ArtifactError::Io {
            path: path.clone(),
            source,
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{view_key}.png"));
        debug!("Loaded diagram {} from {}", view_key, path.display());
        Ok(DiagramArtifact { bytes, filename })
    }

    /// View keys available in the directory, sorted and deduplicated.
    pub fn list_view_keys(&self) -> Result<Vec<String>, ArtifactError> {
        let keys: BTreeSet<String> = self
            .diagram_files()?
            .iter()
            .filter(|name| self.in_workspace(name))
            .filter_map(|name| match view_key_from_filename(name) {
                Some(key) => Some(key.to_owned()),
                None => name.rsplit_once('.').map(|(stem, _)| stem.to_owned()),
            })
            .collect();
        Ok(keys.into_iter().collect())
    }

    /// Names of non-legend image files, sorted.
    fn diagram_files(&self) -> Result<Vec<String>, ArtifactError> {
        let io_err = |source| ArtifactError::Io {
            path: self.dir.clone(),
            source,
        };
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if diagram_extension(&name).is_some() && !is_legend(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    fn in_workspace(&self, filename: &str) -> bool {
        match (&self.workspace_id, workspace_of(filename)) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        }
    }
}

impl DiagramArtifactProvider for DirectoryArtifacts {
    fn artifact(&self, view_key: &str) -> Result<DiagramArtifact, CollaboratorError> {
        Ok(self.load(view_key)?)
    }
}

/// Keys are plain file stems: no separators, no parent references.
fn validate_key(view_key: &str) -> Result<(), ArtifactError> {
    let invalid = view_key.trim().is_empty()
        || view_key.contains(['/', '\\', '\0'])
        || view_key == "."
        || view_key == "..";
    if invalid {
        return Err(ArtifactError::InvalidKey(view_key.to_owned()));
    }
    Ok(())
}
