//! Rendered architecture view artifacts.
//!
//! Diagram exporters write one image per architecture view into a directory,
//! either as `<viewKey>.png` or as `structurizr-<workspaceId>-<viewKey>.png`
//! with an optional `-key.png` legend next to it. [`DirectoryArtifacts`]
//! serves these files to the converter by view key.
//!
//! # Example
//!
//! ```no_run
//! use archdoc_diagrams::DirectoryArtifacts;
//!
//! let artifacts = DirectoryArtifacts::new("diagrams").with_workspace_id(Some("123".to_owned()));
//! for key in artifacts.list_view_keys()? {
//!     println!("{key}: {}", artifacts.find(&key)?.display());
//! }
//! # Ok::<(), archdoc_diagrams::ArtifactError>(())
//! ```

mod directory;
mod error;
mod filename;

pub use directory::DirectoryArtifacts;
pub use error::ArtifactError;
pub use filename::{is_legend, view_key_from_filename};
